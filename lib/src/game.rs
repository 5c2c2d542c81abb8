use crate::data::Dictionary;
use crate::data::Word;
use crate::engine::optimal_guess;
use crate::engine::top_n;
use crate::engine::ScoredWord;
use crate::restrictions::ConstraintSet;
use crate::results::get_result_for_guess;
use crate::results::GuessResult;
use crate::results::LetterResult;
use crate::results::WordleError;
use log::debug;
use rand::Rng;
use std::collections::BTreeMap;

/// The number of guesses a player gets.
pub const MAX_GUESSES: usize = 5;

/// The state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

/// What the player has learned about a letter on the keyboard.
///
/// States are ordered so that a key only ever moves to a more informative state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum KeyState {
    Unused,
    Absent,
    Present,
    Correct,
}

impl From<LetterResult> for KeyState {
    fn from(result: LetterResult) -> KeyState {
        match result {
            LetterResult::Correct => KeyState::Correct,
            LetterResult::PresentNotHere => KeyState::Present,
            LetterResult::NotPresent => KeyState::Absent,
        }
    }
}

/// A single game against a hidden answer.
///
/// ```
/// use wordle_engine::{Dictionary, Game, GameStatus, Word};
///
/// let dictionary = Dictionary::new(["crane", "slate"], Vec::<&str>::new()).unwrap();
/// let mut game = Game::new(&dictionary, Word::new("slate").unwrap());
///
/// assert_eq!(game.guess("crane").unwrap().feedback.to_string(), "XXGXG");
/// game.guess("slate").unwrap();
/// assert_eq!(game.status(), GameStatus::Won);
/// ```
#[derive(Debug, Clone)]
pub struct Game<'a> {
    dictionary: &'a Dictionary,
    answer: Word,
    history: Vec<GuessResult>,
    keyboard: BTreeMap<char, KeyState>,
    status: GameStatus,
}

impl<'a> Game<'a> {
    /// Starts a game against the given answer.
    pub fn new(dictionary: &'a Dictionary, answer: Word) -> Game<'a> {
        Game {
            dictionary,
            answer,
            history: Vec::new(),
            keyboard: BTreeMap::new(),
            status: GameStatus::Playing,
        }
    }

    /// Starts a game against an answer chosen with the given random number generator.
    pub fn new_random<R: Rng + ?Sized>(dictionary: &'a Dictionary, rng: &mut R) -> Game<'a> {
        Game::new(dictionary, dictionary.random_answer(rng))
    }

    /// Submits a guess.
    ///
    /// The input is trimmed and converted to upper case. It must be a playable word, and the game
    /// must still be in progress.
    pub fn guess(&mut self, input: &str) -> Result<GuessResult, WordleError> {
        if self.status != GameStatus::Playing {
            return Err(WordleError::GameOver);
        }
        let guess = Word::new(input.trim())?;
        if !self.dictionary.is_playable(&guess) {
            return Err(WordleError::UnknownWord(guess.to_string()));
        }
        let result = get_result_for_guess(&self.answer, &guess);
        for (letter, letter_result) in guess.letters().zip(result.feedback.results().iter()) {
            let state = self.keyboard.entry(letter).or_insert(KeyState::Unused);
            *state = (*state).max(KeyState::from(*letter_result));
        }
        self.history.push(result);
        if result.feedback.is_win() {
            self.status = GameStatus::Won;
        } else if self.history.len() >= MAX_GUESSES {
            self.status = GameStatus::Lost;
        }
        debug!(
            "Guess {} of {}: {} -> {} ({:?})",
            self.history.len(),
            MAX_GUESSES,
            guess,
            result.feedback,
            self.status
        );
        Ok(result)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn answer(&self) -> Word {
        self.answer
    }

    pub fn history(&self) -> &[GuessResult] {
        &self.history
    }

    pub fn guesses_left(&self) -> usize {
        MAX_GUESSES.saturating_sub(self.history.len())
    }

    /// The best-known state of the given letter.
    pub fn key_state(&self, letter: char) -> KeyState {
        self.keyboard
            .get(&letter.to_ascii_uppercase())
            .copied()
            .unwrap_or(KeyState::Unused)
    }

    /// The constraints implied by the guesses so far.
    pub fn constraints(&self) -> ConstraintSet {
        ConstraintSet::from_results(&self.history)
    }

    /// The single best next guess given the feedback so far.
    pub fn optimal_guess(&self) -> Option<Word> {
        optimal_guess(self.dictionary, &self.constraints())
    }

    /// The best `n` next guesses given the feedback so far.
    pub fn top_guesses(&self, n: usize) -> Vec<ScoredWord> {
        top_n(self.dictionary, &self.constraints(), n)
    }
}
