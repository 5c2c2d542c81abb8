//! Scores candidate guesses using how often their letters appear at each location in the answers.

use crate::data::PositionFreqTable;
use crate::data::Word;
use crate::data::WORD_LENGTH;
use std::collections::BTreeSet;

/// Points for every distinct letter in the word.
pub const UNIQUE_LETTER_BONUS: i64 = 2000;
/// Points for every known-present letter that the word uses.
pub const PRESENT_LETTER_BONUS: i64 = 5000;
/// Penalty for every repeated letter.
pub const REPEAT_PENALTY: i64 = 10000;
/// Penalty for every repeated letter once the word already uses a known-present letter.
pub const REPEAT_PENALTY_WITH_PRESENT_LETTERS: i64 = 1000;

/// Selects how words are scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreMode {
    /// Scoring a first guess: only words with five distinct letters are eligible.
    Starter,
    /// Scoring a guess once some feedback is known.
    Constrained,
}

/// Gives words a score, where the maximum score indicates the best guess.
///
/// The score for a word is computed as:
///
/// * 1 point for every answer with the same letter at the same location, summed over each letter.
/// * [`UNIQUE_LETTER_BONUS`] points for each distinct letter.
/// * In [`ScoreMode::Constrained`] mode, [`PRESENT_LETTER_BONUS`] points for each letter in
///   `present_letters` that the word contains.
/// * Minus a penalty for each repeated letter: [`REPEAT_PENALTY_WITH_PRESENT_LETTERS`] if the word
///   uses any present letter in `Constrained` mode, else [`REPEAT_PENALTY`].
///
/// ```
/// use std::collections::BTreeSet;
/// use wordle_engine::Dictionary;
/// use wordle_engine::Word;
/// use wordle_engine::scorers::{PositionalScorer, ScoreMode};
///
/// let dictionary = Dictionary::new(["crane", "crate"], Vec::<&str>::new()).unwrap();
/// let present = BTreeSet::new();
/// let scorer = PositionalScorer::new(dictionary.position_freq(), &present, ScoreMode::Starter);
///
/// assert_eq!(scorer.score_word(&Word::new("crane").unwrap()), Some(2 + 2 + 2 + 1 + 2 + 10000));
/// assert_eq!(scorer.score_word(&Word::new("geese").unwrap()), None);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PositionalScorer<'a> {
    position_freq: &'a PositionFreqTable,
    present_letters: &'a BTreeSet<char>,
    mode: ScoreMode,
}

impl<'a> PositionalScorer<'a> {
    pub fn new(
        position_freq: &'a PositionFreqTable,
        present_letters: &'a BTreeSet<char>,
        mode: ScoreMode,
    ) -> PositionalScorer<'a> {
        PositionalScorer {
            position_freq,
            present_letters,
            mode,
        }
    }

    pub fn mode(&self) -> ScoreMode {
        self.mode
    }

    /// Determines a score for the given word. The higher the score, the better the guess.
    ///
    /// Returns `None` if the word is not eligible, i.e. when scoring a starter with repeated
    /// letters.
    pub fn score_word(&self, word: &Word) -> Option<i64> {
        let num_unique = word.num_unique_letters() as i64;
        let num_repeats = WORD_LENGTH as i64 - num_unique;
        let positional: i64 = word
            .letters()
            .enumerate()
            .map(|(index, letter)| self.position_freq.count(index, letter) as i64)
            .sum();
        let bonus = num_unique * UNIQUE_LETTER_BONUS;
        match self.mode {
            ScoreMode::Starter => {
                if num_repeats > 0 {
                    return None;
                }
                Some(positional + bonus)
            }
            ScoreMode::Constrained => {
                let num_present_used = self
                    .present_letters
                    .iter()
                    .filter(|letter| word.contains(**letter))
                    .count() as i64;
                let penalty = if num_present_used > 0 {
                    num_repeats * REPEAT_PENALTY_WITH_PRESENT_LETTERS
                } else {
                    num_repeats * REPEAT_PENALTY
                };
                Some(positional + bonus + num_present_used * PRESENT_LETTER_BONUS - penalty)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(texts: &[&str]) -> Vec<Word> {
        texts.iter().map(|text| Word::new(text).unwrap()).collect()
    }

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    #[test]
    fn starter_rejects_repeated_letters() {
        let table = PositionFreqTable::new(&words(&["alpha", "allot", "begot"]));
        let present = BTreeSet::new();
        let scorer = PositionalScorer::new(&table, &present, ScoreMode::Starter);

        assert_eq!(scorer.score_word(&word("alpha")), None);
        assert_eq!(scorer.score_word(&word("allot")), None);
        assert_eq!(scorer.score_word(&word("begot")), Some(1 + 1 + 1 + 2 + 2 + 10000));
    }

    #[test]
    fn starter_ignores_present_letters() {
        let table = PositionFreqTable::new(&words(&["alpha", "allot", "begot"]));
        let present = BTreeSet::from(['B', 'G']);
        let scorer = PositionalScorer::new(&table, &present, ScoreMode::Starter);

        assert_eq!(scorer.score_word(&word("begot")), Some(1 + 1 + 1 + 2 + 2 + 10000));
    }

    #[test]
    fn constrained_without_present_letters() {
        let table = PositionFreqTable::new(&words(&["alpha", "allot", "begot"]));
        let present = BTreeSet::new();
        let scorer = PositionalScorer::new(&table, &present, ScoreMode::Constrained);

        // Four distinct letters and one repeat.
        assert_eq!(scorer.score_word(&word("alpha")), Some(2 + 2 + 1 + 1 + 1 + 8000 - 10000));
        assert_eq!(scorer.score_word(&word("begot")), Some(1 + 1 + 1 + 2 + 2 + 10000));
    }

    #[test]
    fn constrained_with_present_letters() {
        let table = PositionFreqTable::new(&words(&["alpha", "allot", "begot"]));
        let present = BTreeSet::from(['L', 'T', 'Z']);
        let scorer = PositionalScorer::new(&table, &present, ScoreMode::Constrained);

        // Uses L and T, with one repeat.
        assert_eq!(
            scorer.score_word(&word("allot")),
            Some(2 + 2 + 1 + 2 + 2 + 8000 + 10000 - 1000)
        );
        // Uses L, with one repeat.
        assert_eq!(scorer.score_word(&word("alpha")), Some(2 + 2 + 1 + 1 + 1 + 8000 + 5000 - 1000));
        // Uses T, with no repeats.
        assert_eq!(scorer.score_word(&word("begot")), Some(1 + 1 + 1 + 2 + 2 + 10000 + 5000));
    }

    #[test]
    fn fewer_repeats_score_higher() {
        let table = PositionFreqTable::new(&words(&["lemon", "melee", "demon"]));
        let present = BTreeSet::from(['E']);
        let scorer = PositionalScorer::new(&table, &present, ScoreMode::Constrained);

        let lemon = scorer.score_word(&word("lemon")).unwrap();
        let melee = scorer.score_word(&word("melee")).unwrap();
        assert!(lemon > melee);
        assert_eq!(scorer.mode(), ScoreMode::Constrained);
    }
}
