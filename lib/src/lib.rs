//! An engine for a five-letter word guessing game: feedback for guesses, constraint tracking,
//! candidate filtering, guess ranking and letter statistics.

mod data;
mod engine;
mod game;
mod restrictions;
mod results;
pub mod scorers;
mod stats;

pub use data::parse_word_list;
pub use data::Dictionary;
pub use data::Word;
pub use data::WORD_LENGTH;
pub use engine::*;
pub use game::*;
pub use restrictions::ConstraintSet;
pub use results::*;
pub use stats::*;

/// Lower-level building blocks.
pub mod details {
    pub use crate::data::PositionFreqTable;
}
