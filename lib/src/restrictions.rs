use crate::data::Word;
use crate::results::GuessResult;
use crate::results::LetterResult;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::iter::zip;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Defines letter restrictions that a word must adhere to, as learned from the guesses so far.
///
/// A letter may be required at some locations while being forbidden at others, so the same letter
/// can appear in several of these fields at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConstraintSet {
    /// Letters that must occur at specific locations, keyed by zero-based location.
    pub green: BTreeMap<usize, char>,
    /// Locations where a letter is known not to be.
    pub yellow_forbidden: BTreeMap<char, BTreeSet<usize>>,
    /// Letters known to be in the word.
    pub present: BTreeSet<char>,
    /// Letters known not to be in the word at all.
    pub absent: BTreeSet<char>,
    /// The fewest times each present letter must occur in the word.
    pub min_count: BTreeMap<char, u8>,
    /// Set when two guesses required different letters at the same location.
    conflicting: bool,
}

impl ConstraintSet {
    /// Creates an empty `ConstraintSet` that every word satisfies.
    pub fn new() -> ConstraintSet {
        ConstraintSet::default()
    }

    /// Aggregates the given history of guesses into a single set of constraints.
    ///
    /// ```
    /// use wordle_engine::{ConstraintSet, GuessResult, Word};
    ///
    /// let rows = [GuessResult::parse("crane", "XGXXY").unwrap()];
    /// let constraints = ConstraintSet::from_results(&rows);
    ///
    /// assert_eq!(constraints.green.get(&1), Some(&'R'));
    /// assert!(constraints.absent.contains(&'C'));
    /// assert!(!constraints.is_satisfied_by(&Word::new("oread").unwrap()));
    /// assert!(constraints.is_satisfied_by(&Word::new("freed").unwrap()));
    /// ```
    pub fn from_results<'a, I>(results: I) -> ConstraintSet
    where
        I: IntoIterator<Item = &'a GuessResult>,
    {
        let mut constraints = ConstraintSet::new();
        for result in results {
            constraints.update(result);
        }
        constraints
    }

    /// Adds the constraints arising from the given guess result.
    pub fn update(&mut self, guess_result: &GuessResult) {
        let guess = &guess_result.guess;
        let results = guess_result.feedback.results();
        let mut counts_in_row: BTreeMap<char, u8> = BTreeMap::new();
        for (index, (letter, result)) in zip(guess.letters(), results.iter()).enumerate() {
            match result {
                LetterResult::Correct => {
                    match self.green.entry(index) {
                        Entry::Vacant(entry) => {
                            entry.insert(letter);
                        }
                        Entry::Occupied(entry) => {
                            if *entry.get() != letter {
                                self.conflicting = true;
                            }
                        }
                    }
                    self.present.insert(letter);
                    *counts_in_row.entry(letter).or_insert(0) += 1;
                }
                LetterResult::PresentNotHere => {
                    self.yellow_forbidden
                        .entry(letter)
                        .or_default()
                        .insert(index);
                    self.present.insert(letter);
                    *counts_in_row.entry(letter).or_insert(0) += 1;
                }
                LetterResult::NotPresent => {
                    // A gray copy only rules the letter out when no other copy in this guess was
                    // matched. Otherwise it just marks a surplus copy.
                    if !is_marked_elsewhere(guess_result, index) {
                        self.absent.insert(letter);
                    }
                }
            }
        }
        for (letter, count) in counts_in_row {
            let min_count = self.min_count.entry(letter).or_insert(0);
            if *min_count < count {
                *min_count = count;
            }
        }
        let min_count = &self.min_count;
        self.absent.retain(|letter| !min_count.contains_key(letter));
    }

    /// Returns `true` iff nothing is known yet.
    pub fn is_empty(&self) -> bool {
        self.green.is_empty()
            && self.yellow_forbidden.is_empty()
            && self.present.is_empty()
            && self.absent.is_empty()
            && self.min_count.is_empty()
            && !self.conflicting
    }

    /// Returns `true` iff the given word satisfies these restrictions.
    pub fn is_satisfied_by(&self, word: &Word) -> bool {
        !self.conflicting
            && self
                .green
                .iter()
                .all(|(index, letter)| letter_at(word, *index) == Some(*letter))
            && self.yellow_forbidden.iter().all(|(letter, locations)| {
                locations
                    .iter()
                    .all(|index| letter_at(word, *index) != Some(*letter))
            })
            && self
                .present
                .iter()
                .all(|letter| word.count(*letter) >= self.required_count(*letter))
            && self
                .min_count
                .iter()
                .all(|(letter, count)| word.count(*letter) >= *count as usize)
            && self.absent.iter().all(|letter| {
                self.present.contains(letter)
                    || self.green.values().any(|green| green == letter)
                    || !word.contains(*letter)
            })
    }

    fn required_count(&self, letter: char) -> usize {
        self.min_count
            .get(&letter)
            .map_or(1, |count| (*count as usize).max(1))
    }
}

/// Locations past the end of the word hold no letter, so a green there can never be met.
fn letter_at(word: &Word, index: usize) -> Option<char> {
    word.letters().nth(index)
}

fn is_marked_elsewhere(guess_result: &GuessResult, index: usize) -> bool {
    let letter = guess_result.guess.letter(index);
    zip(
        guess_result.guess.letters(),
        guess_result.feedback.results().iter(),
    )
    .enumerate()
    .any(|(other_index, (other_letter, result))| {
        other_index != index && other_letter == letter && *result != LetterResult::NotPresent
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(guess: &str, feedback: &str) -> GuessResult {
        GuessResult::parse(guess, feedback).unwrap()
    }

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    #[test]
    fn constraint_set_new_is_empty() {
        let constraints = ConstraintSet::new();

        assert!(constraints.is_empty());
        assert!(constraints.is_satisfied_by(&word("abcde")));
        assert!(constraints.is_satisfied_by(&word("zzzzz")));
    }

    #[test]
    fn update_records_each_kind_of_result() {
        let constraints = ConstraintSet::from_results(&[row("crane", "XGXXY")]);

        assert_eq!(constraints.green, BTreeMap::from([(1, 'R')]));
        assert_eq!(
            constraints.yellow_forbidden,
            BTreeMap::from([('E', BTreeSet::from([4]))])
        );
        assert_eq!(constraints.present, BTreeSet::from(['R', 'E']));
        assert_eq!(constraints.absent, BTreeSet::from(['C', 'A', 'N']));
        assert_eq!(constraints.min_count, BTreeMap::from([('R', 1), ('E', 1)]));
        assert!(!constraints.is_empty());
    }

    #[test]
    fn surplus_gray_does_not_mark_absent() {
        // Answer "LATER": the second L has nothing left to pair with.
        let constraints = ConstraintSet::from_results(&[row("alley", "YYXGX")]);

        assert_eq!(constraints.absent, BTreeSet::from(['Y']));
        assert_eq!(constraints.min_count.get(&'L'), Some(&1));
        assert_eq!(constraints.yellow_forbidden.get(&'L'), Some(&BTreeSet::from([1])));
    }

    #[test]
    fn min_count_is_max_across_rows() {
        let constraints =
            ConstraintSet::from_results(&[row("speed", "XXYXX"), row("eerie", "YXXXG")]);

        assert_eq!(constraints.min_count.get(&'E'), Some(&2));
        assert!(constraints.is_satisfied_by(&word("LEAVE")));
        assert!(!constraints.is_satisfied_by(&word("ABOVE")));
    }

    #[test]
    fn later_presence_removes_earlier_absence() {
        let constraints =
            ConstraintSet::from_results(&[row("stair", "XXXXX"), row("trope", "XXXXY")]);

        assert!(constraints.absent.contains(&'S'));
        assert!(constraints.absent.contains(&'O'));
        assert!(!constraints.absent.contains(&'E'));

        // An inconsistent history where E is first gray and later yellow.
        let constraints =
            ConstraintSet::from_results(&[row("enemy", "XXXXX"), row("crepe", "XXYXX")]);
        assert!(!constraints.absent.contains(&'E'));
        assert!(constraints.absent.contains(&'N'));
        assert!(constraints.absent.contains(&'C'));
    }

    #[test]
    fn is_satisfied_by_green() {
        let mut constraints = ConstraintSet::new();
        constraints.green.insert(1, 'O');
        constraints.green.insert(4, 'B');

        assert!(constraints.is_satisfied_by(&word("WORDB")));
        assert!(!constraints.is_satisfied_by(&word("WORDA")));
        assert!(!constraints.is_satisfied_by(&word("OTHER")));
    }

    #[test]
    fn is_satisfied_by_yellow_forbidden() {
        let mut constraints = ConstraintSet::new();
        constraints
            .yellow_forbidden
            .insert('O', BTreeSet::from([0, 2]));

        assert!(constraints.is_satisfied_by(&word("WORDA")));
        assert!(constraints.is_satisfied_by(&word("ZZZZZ")));
        assert!(!constraints.is_satisfied_by(&word("OTHER")));
        assert!(!constraints.is_satisfied_by(&word("SNORE")));
    }

    #[test]
    fn is_satisfied_by_out_of_range_locations() {
        let mut constraints = ConstraintSet::new();
        constraints.green.insert(7, 'A');

        assert!(!constraints.is_satisfied_by(&word("ALPHA")));

        let mut constraints = ConstraintSet::new();
        constraints
            .yellow_forbidden
            .insert('A', BTreeSet::from([1, 9]));

        assert!(constraints.is_satisfied_by(&word("ALPHA")));
        assert!(!constraints.is_satisfied_by(&word("BASIC")));
    }

    #[test]
    fn is_satisfied_by_present_and_min_count() {
        let mut constraints = ConstraintSet::new();
        constraints.present.insert('E');
        constraints.present.insert('L');
        constraints.min_count.insert('E', 2);

        assert!(constraints.is_satisfied_by(&word("LEVEE")));
        assert!(constraints.is_satisfied_by(&word("EXCEL")));
        assert!(!constraints.is_satisfied_by(&word("LEMON")));
        assert!(!constraints.is_satisfied_by(&word("EERIE")));
    }

    #[test]
    fn is_satisfied_by_absent() {
        let mut constraints = ConstraintSet::new();
        constraints.absent.insert('W');

        assert!(constraints.is_satisfied_by(&word("OTHER")));
        assert!(!constraints.is_satisfied_by(&word("WORDA")));
        assert!(!constraints.is_satisfied_by(&word("ARROW")));
    }

    #[test]
    fn is_satisfied_by_absent_letter_that_is_also_green() {
        let mut constraints = ConstraintSet::new();
        constraints.absent.insert('L');
        constraints.green.insert(0, 'L');

        assert!(constraints.is_satisfied_by(&word("LEMON")));
        assert!(constraints.is_satisfied_by(&word("LEVEL")));
    }

    #[test]
    fn conflicting_greens_match_nothing() {
        let constraints =
            ConstraintSet::from_results(&[row("crane", "XGXXY"), row("stern", "XGYXY")]);

        assert_eq!(constraints.green.get(&1), Some(&'R'));
        assert!(!constraints.is_empty());
        assert!(!constraints.is_satisfied_by(&word("TREND")));
        assert!(!constraints.is_satisfied_by(&word("ERNST")));
    }

    #[test]
    fn duplicated_history_adds_nothing() {
        let rows = [row("crane", "XGXXY"), row("berth", "XYGXX")];
        let doubled: Vec<GuessResult> = rows.iter().chain(rows.iter()).copied().collect();

        assert_eq!(
            ConstraintSet::from_results(&doubled),
            ConstraintSet::from_results(&rows)
        );
    }
}
