use crate::data::Dictionary;
use crate::data::Word;
use crate::restrictions::ConstraintSet;
use crate::results::get_result_for_guess;
use crate::results::GameResult;
use crate::results::GuessResult;
use crate::scorers::PositionalScorer;
use crate::scorers::ScoreMode;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A word along with its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScoredWord {
    pub word: Word,
    pub score: i64,
}

impl ScoredWord {
    /// Orders by score descending, then by word ascending.
    fn rank_cmp(&self, other: &ScoredWord) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.word.cmp(&other.word))
    }
}

/// Gets the list of playable words in the dictionary that meet the given constraints.
pub fn get_possible_words(constraints: &ConstraintSet, dictionary: &Dictionary) -> Vec<Word> {
    dictionary
        .playable()
        .par_iter()
        .filter(|word| constraints.is_satisfied_by(word))
        .copied()
        .collect()
}

/// Ranks the playable words and returns the best `n`, highest score first.
///
/// With no constraints, this ranks starting words: only words with five distinct letters are
/// considered. Otherwise only words that satisfy the constraints are considered, and words that
/// use letters known to be present are favoured. Ties are broken alphabetically.
///
/// An empty result means no playable word fits the constraints.
///
/// ```
/// use wordle_engine::{top_n, ConstraintSet, Dictionary};
///
/// let dictionary = Dictionary::new(["crane", "slate", "geese"], ["soare"]).unwrap();
/// let starters = top_n(&dictionary, &ConstraintSet::new(), 2);
///
/// assert_eq!(starters.len(), 2);
/// assert!(starters[0].score >= starters[1].score);
/// ```
pub fn top_n(dictionary: &Dictionary, constraints: &ConstraintSet, n: usize) -> Vec<ScoredWord> {
    rank_words(dictionary, constraints, &BTreeSet::new(), n)
}

/// Returns the single best guess, or `None` if no playable word fits the constraints.
pub fn optimal_guess(dictionary: &Dictionary, constraints: &ConstraintSet) -> Option<Word> {
    top_n(dictionary, constraints, 1)
        .first()
        .map(|scored| scored.word)
}

fn rank_words(
    dictionary: &Dictionary,
    constraints: &ConstraintSet,
    excluded: &BTreeSet<Word>,
    n: usize,
) -> Vec<ScoredWord> {
    let is_starter = constraints.is_empty();
    let mode = if is_starter {
        ScoreMode::Starter
    } else {
        ScoreMode::Constrained
    };
    let scorer = PositionalScorer::new(dictionary.position_freq(), &constraints.present, mode);
    let mut scored: Vec<ScoredWord> = dictionary
        .playable()
        .par_iter()
        .filter(|word| !excluded.contains(*word))
        .filter(|word| is_starter || constraints.is_satisfied_by(*word))
        .filter_map(|word| {
            scorer.score_word(word).map(|score| ScoredWord {
                word: *word,
                score,
            })
        })
        .collect();
    scored.par_sort_unstable_by(ScoredWord::rank_cmp);
    scored.truncate(n);
    scored
}

/// Suggests guesses based on the feedback received so far.
///
/// ```
/// use wordle_engine::{Dictionary, GuessResult, Solver};
///
/// let dictionary = Dictionary::new(["crane", "crate", "slate"], Vec::<&str>::new()).unwrap();
/// let mut solver = Solver::new(&dictionary);
/// solver.update(GuessResult::parse("crane", "GGGXG").unwrap());
///
/// assert_eq!(solver.select_next_guess().map(|word| word.to_string()), Some("CRATE".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct Solver<'a> {
    dictionary: &'a Dictionary,
    history: Vec<GuessResult>,
    guessed: BTreeSet<Word>,
    constraints: ConstraintSet,
}

impl<'a> Solver<'a> {
    pub fn new(dictionary: &'a Dictionary) -> Solver<'a> {
        Solver {
            dictionary,
            history: Vec::new(),
            guessed: BTreeSet::new(),
            constraints: ConstraintSet::new(),
        }
    }

    /// Adds the feedback for one guess.
    pub fn update(&mut self, result: GuessResult) {
        self.constraints.update(&result);
        self.guessed.insert(result.guess);
        self.history.push(result);
    }

    pub fn history(&self) -> &[GuessResult] {
        &self.history
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    /// Every playable word that is still consistent with the feedback.
    pub fn possible_words(&self) -> Vec<Word> {
        get_possible_words(&self.constraints, self.dictionary)
    }

    /// The best `n` guesses, excluding words that were already guessed.
    pub fn top_n_guesses(&self, n: usize) -> Vec<ScoredWord> {
        rank_words(self.dictionary, &self.constraints, &self.guessed, n)
    }

    pub fn select_next_guess(&self) -> Option<Word> {
        self.top_n_guesses(1).first().map(|scored| scored.word)
    }
}

/// Lets the [`Solver`] guess the given answer within the maximum number of guesses.
///
/// Returns [`GameResult::UnknownWord`] if the answer is not a playable word.
pub fn play_game_with_solver(
    answer: &Word,
    max_num_guesses: u32,
    dictionary: &Dictionary,
) -> GameResult {
    if !dictionary.is_playable(answer) {
        return GameResult::UnknownWord;
    }
    play_game(Solver::new(dictionary), answer, max_num_guesses)
}

/// Continues a game from the solver's current state. Running out of candidates is a failure.
fn play_game(mut solver: Solver, answer: &Word, max_num_guesses: u32) -> GameResult {
    let mut guesses: Vec<Word> = Vec::new();
    for _ in 1..=max_num_guesses {
        let guess = match solver.select_next_guess() {
            Some(guess) => guess,
            None => return GameResult::Failure(guesses),
        };
        guesses.push(guess);
        let result = get_result_for_guess(answer, &guess);
        if result.feedback.is_win() {
            return GameResult::Success(guesses);
        }
        solver.update(result);
    }
    GameResult::Failure(guesses)
}
