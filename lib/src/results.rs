use crate::data::Word;
use crate::data::WORD_LENGTH;
use std::fmt;
use std::io;
use std::str::FromStr;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The result of a given letter at a specific location.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LetterResult {
    /// Green: the letter is at this location in the answer.
    Correct,
    /// Yellow: an unmatched copy of the letter is somewhere else in the answer.
    PresentNotHere,
    /// Gray: there is no unmatched copy of this letter left in the answer.
    NotPresent,
}

impl LetterResult {
    /// Returns the wire symbol for this result: `G`, `Y` or `X`.
    pub fn to_char(self) -> char {
        match self {
            LetterResult::Correct => 'G',
            LetterResult::PresentNotHere => 'Y',
            LetterResult::NotPresent => 'X',
        }
    }

    /// Parses a wire symbol. Only the uppercase symbols `G`, `Y` and `X` are accepted.
    pub fn from_char(symbol: char) -> Option<LetterResult> {
        match symbol {
            'G' => Some(LetterResult::Correct),
            'Y' => Some(LetterResult::PresentNotHere),
            'X' => Some(LetterResult::NotPresent),
            _ => None,
        }
    }
}

/// The per-letter feedback for a whole guess.
///
/// This serializes to the five-character `G`/`Y`/`X` wire format with [`fmt::Display`], and can be
/// parsed back with [`FromStr`].
///
/// ```
/// use wordle_engine::Feedback;
///
/// let feedback: Feedback = "XGXXY".parse().unwrap();
/// assert_eq!(feedback.to_string(), "XGXXY");
/// assert!(!feedback.is_win());
/// ```
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Feedback([LetterResult; WORD_LENGTH]);

impl Feedback {
    /// Feedback for a guess that is exactly the answer.
    pub const ALL_CORRECT: Feedback = Feedback([LetterResult::Correct; WORD_LENGTH]);

    pub fn new(results: [LetterResult; WORD_LENGTH]) -> Feedback {
        Feedback(results)
    }

    /// The result of each letter, in the same order as the letters of the guess.
    pub fn results(&self) -> &[LetterResult; WORD_LENGTH] {
        &self.0
    }

    pub fn is_win(&self) -> bool {
        *self == Feedback::ALL_CORRECT
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for result in self.0 {
            fmt::Write::write_char(f, result.to_char())?;
        }
        Ok(())
    }
}

impl FromStr for Feedback {
    type Err = WordleError;

    fn from_str(text: &str) -> Result<Feedback, WordleError> {
        let invalid = || WordleError::InvalidFeedback(text.to_string());
        if text.chars().count() != WORD_LENGTH {
            return Err(invalid());
        }
        let mut results = [LetterResult::NotPresent; WORD_LENGTH];
        for (result, symbol) in results.iter_mut().zip(text.chars()) {
            *result = LetterResult::from_char(symbol).ok_or_else(invalid)?;
        }
        Ok(Feedback(results))
    }
}

impl TryFrom<String> for Feedback {
    type Error = WordleError;

    fn try_from(text: String) -> Result<Feedback, WordleError> {
        text.parse()
    }
}

impl From<Feedback> for String {
    fn from(feedback: Feedback) -> String {
        feedback.to_string()
    }
}

/// The result of a single word guess: one row of the game history.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GuessResult {
    pub guess: Word,
    pub feedback: Feedback,
}

impl GuessResult {
    pub fn new(guess: Word, feedback: Feedback) -> GuessResult {
        GuessResult { guess, feedback }
    }

    /// Builds a row from its wire representation, e.g. `("crane", "XGXXY")`.
    pub fn parse(guess: &str, feedback: &str) -> Result<GuessResult, WordleError> {
        Ok(GuessResult {
            guess: guess.parse()?,
            feedback: feedback.parse()?,
        })
    }
}

/// Whether the game was won or lost by the guesser.
#[derive(Debug, Eq, PartialEq)]
pub enum GameResult {
    /// Indicates that the guesser won the game, and provides the guesses that were given.
    Success(Vec<Word>),
    /// Indicates that the guesser failed to guess the word, and provides the guesses that were given.
    Failure(Vec<Word>),
    /// Indicates that the given word was not in the dictionary.
    UnknownWord,
}

/// Indicates that an error occurred while validating input or loading words.
#[derive(Debug, Error)]
pub enum WordleError {
    /// The text is not exactly five letters `A-Z` after uppercasing.
    #[error("invalid word {0:?}: expected exactly {WORD_LENGTH} letters A-Z")]
    InvalidWord(String),
    /// The text is not exactly five symbols from `G`, `Y` and `X`.
    #[error("invalid feedback {0:?}: expected exactly {WORD_LENGTH} symbols from G, Y, X")]
    InvalidFeedback(String),
    /// A dictionary was built without any answers.
    #[error("the answers list is empty")]
    DictionaryEmpty,
    /// The word is well formed, but is not a playable word.
    #[error("{0} is not in the word list")]
    UnknownWord(String),
    /// A guess was submitted after the game finished.
    #[error("the game is already over")]
    GameOver,
    #[error("failed to read word list: {0}")]
    Io(#[from] io::Error),
}

/// Determines the feedback for the given `guess` when applied to the given `answer`.
///
/// Greens are assigned first. Each remaining guess letter is then paired, left to right, with the
/// first unmatched copy of that letter in the answer. Letters that find no partner are marked
/// [`LetterResult::NotPresent`], so a letter guessed more often than it occurs only gets as many
/// green or yellow marks as the answer has copies.
///
/// ```
/// use wordle_engine::{get_feedback, Word};
///
/// let guess: Word = "speed".parse().unwrap();
/// let answer: Word = "erase".parse().unwrap();
/// assert_eq!(get_feedback(&guess, &answer).to_string(), "YXYYX");
/// ```
pub fn get_feedback(guess: &Word, answer: &Word) -> Feedback {
    let mut results = [LetterResult::NotPresent; WORD_LENGTH];
    let mut available = [true; WORD_LENGTH];
    for index in 0..WORD_LENGTH {
        if guess.letter(index) == answer.letter(index) {
            results[index] = LetterResult::Correct;
            available[index] = false;
        }
    }
    for index in 0..WORD_LENGTH {
        if results[index] == LetterResult::Correct {
            continue;
        }
        let letter = guess.letter(index);
        if let Some(answer_index) =
            (0..WORD_LENGTH).find(|&j| available[j] && answer.letter(j) == letter)
        {
            results[index] = LetterResult::PresentNotHere;
            available[answer_index] = false;
        }
    }
    Feedback(results)
}

/// Determines the full result row for the given `guess` when applied to the given `objective`.
pub fn get_result_for_guess(objective: &Word, guess: &Word) -> GuessResult {
    GuessResult {
        guess: *guess,
        feedback: get_feedback(guess, objective),
    }
}
