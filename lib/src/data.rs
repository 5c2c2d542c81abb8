use crate::results::WordleError;
use log::debug;
use rand::Rng;
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The number of letters in every word.
pub const WORD_LENGTH: usize = 5;

const NUM_LETTERS: usize = 26;

/// A five-letter word made of the uppercase letters `A-Z`.
///
/// Words are ordered lexicographically.
///
/// ```
/// use wordle_engine::Word;
///
/// let word = Word::new("crane").unwrap();
/// assert_eq!(word.to_string(), "CRANE");
/// assert_eq!(word.letter(1), 'R');
/// assert!(Word::new("cranes").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Word([u8; WORD_LENGTH]);

impl Word {
    /// Validates and uppercases the given text.
    pub fn new(text: &str) -> Result<Word, WordleError> {
        let upper = text.to_uppercase();
        let bytes = upper.as_bytes();
        if bytes.len() != WORD_LENGTH || !bytes.iter().all(u8::is_ascii_uppercase) {
            return Err(WordleError::InvalidWord(text.to_string()));
        }
        let mut letters = [0; WORD_LENGTH];
        letters.copy_from_slice(bytes);
        Ok(Word(letters))
    }

    /// The letter at the given zero-based location.
    ///
    /// Panics if `index >= WORD_LENGTH`.
    pub fn letter(&self, index: usize) -> char {
        self.0[index] as char
    }

    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().map(|byte| *byte as char)
    }

    /// The number of times the letter occurs in this word.
    pub fn count(&self, letter: char) -> usize {
        self.letters().filter(|other| *other == letter).count()
    }

    pub fn contains(&self, letter: char) -> bool {
        self.letters().any(|other| other == letter)
    }

    /// The number of distinct letters in this word, from 1 to 5.
    pub fn num_unique_letters(&self) -> usize {
        (0..WORD_LENGTH)
            .filter(|&index| !self.0[..index].contains(&self.0[index]))
            .count()
    }

    /// The first `len` letters of this word.
    pub fn prefix(&self, len: usize) -> String {
        self.letters().take(len).collect()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in self.letters() {
            fmt::Write::write_char(f, letter)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({})", self)
    }
}

impl FromStr for Word {
    type Err = WordleError;

    fn from_str(text: &str) -> Result<Word, WordleError> {
        Word::new(text)
    }
}

impl TryFrom<&str> for Word {
    type Error = WordleError;

    fn try_from(text: &str) -> Result<Word, WordleError> {
        Word::new(text)
    }
}

impl TryFrom<String> for Word {
    type Error = WordleError;

    fn try_from(text: String) -> Result<Word, WordleError> {
        Word::new(&text)
    }
}

impl From<Word> for String {
    fn from(word: Word) -> String {
        word.to_string()
    }
}

fn letter_index(letter: char) -> Option<usize> {
    if letter.is_ascii_uppercase() {
        Some(letter as usize - 'A' as usize)
    } else {
        None
    }
}

fn index_letter(index: usize) -> char {
    (b'A' + index as u8) as char
}

/// Reads a word list with one word per line.
///
/// Each line is trimmed and converted to upper case, and empty lines are skipped. Any other line
/// must be a valid [`Word`].
pub fn parse_word_list<R: BufRead>(reader: R) -> Result<Vec<Word>, WordleError> {
    reader
        .lines()
        .filter_map(|maybe_line| match maybe_line {
            Ok(line) => normalize_entry(&line).transpose(),
            Err(err) => Some(Err(err.into())),
        })
        .collect()
}

fn normalize_entry(entry: &str) -> Result<Option<Word>, WordleError> {
    let trimmed = entry.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Word::new(trimmed).map(Some)
}

fn normalize_list<I, S>(words: I) -> Result<Vec<Word>, WordleError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .filter_map(|word| normalize_entry(word.as_ref()).transpose())
        .collect::<Result<Vec<Word>, WordleError>>()
}

fn sorted_unique(mut words: Vec<Word>) -> Vec<Word> {
    words.sort_unstable();
    words.dedup();
    words
}

/// Counts, for each location, how many words have each letter there.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionFreqTable {
    counts: [[u32; NUM_LETTERS]; WORD_LENGTH],
}

impl PositionFreqTable {
    /// Builds the table over the given words.
    pub fn new(words: &[Word]) -> PositionFreqTable {
        let mut counts = [[0; NUM_LETTERS]; WORD_LENGTH];
        for word in words {
            for (index, letter) in word.letters().enumerate() {
                if let Some(letter_index) = letter_index(letter) {
                    counts[index][letter_index] += 1;
                }
            }
        }
        PositionFreqTable { counts }
    }

    /// Retrieves the count of words with the given letter at the given location.
    ///
    /// Letters outside `A-Z` and locations past the end of a word count as zero.
    pub fn count(&self, index: usize, letter: char) -> u32 {
        match (self.counts.get(index), letter_index(letter)) {
            (Some(row), Some(letter_index)) => row[letter_index],
            _ => 0,
        }
    }

    /// All 26 `(letter, count)` pairs for the given location, in alphabetical order.
    pub fn letter_counts(&self, index: usize) -> Vec<(char, u32)> {
        self.counts
            .get(index)
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(letter_index, count)| (index_letter(letter_index), *count))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Contains all the words for this Wordle game.
///
/// The *answers* may be chosen as the hidden word, while *accepted* words are additional legal
/// guesses. Together they form the playable words. Letter statistics are always computed over the
/// answers.
#[derive(Clone, Debug)]
pub struct Dictionary {
    answers: Vec<Word>,
    accepted: Vec<Word>,
    playable: Vec<Word>,
    position_freq: PositionFreqTable,
}

impl Dictionary {
    /// Constructs a new `Dictionary` from the given answer and accepted word lists.
    ///
    /// Each word is trimmed and converted to upper case, empty entries are skipped, and duplicates
    /// are removed. Fails if any entry is not a valid [`Word`], or if there are no answers.
    ///
    /// ```
    /// use wordle_engine::Dictionary;
    ///
    /// let dictionary = Dictionary::new(["crane", "slate"], ["soare", "crane"]).unwrap();
    /// assert_eq!(dictionary.answers().len(), 2);
    /// assert_eq!(dictionary.playable().len(), 3);
    /// ```
    pub fn new<A, B, S, T>(answers: A, accepted: B) -> Result<Dictionary, WordleError>
    where
        A: IntoIterator<Item = S>,
        B: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Dictionary::from_words(normalize_list(answers)?, normalize_list(accepted)?)
    }

    /// Constructs a new `Dictionary` by reading the given answer and accepted word lists.
    ///
    /// The readers should provide one word per line, as described in [`parse_word_list`].
    pub fn from_readers<R, S>(answers: R, accepted: S) -> Result<Dictionary, WordleError>
    where
        R: BufRead,
        S: BufRead,
    {
        let answers = parse_word_list(answers)?;
        debug!("Loaded {} answers", answers.len());
        let accepted = parse_word_list(accepted)?;
        debug!("Loaded {} accepted words", accepted.len());
        Dictionary::from_words(answers, accepted)
    }

    fn from_words(answers: Vec<Word>, accepted: Vec<Word>) -> Result<Dictionary, WordleError> {
        let answers = sorted_unique(answers);
        let accepted = sorted_unique(accepted);
        if answers.is_empty() {
            return Err(WordleError::DictionaryEmpty);
        }
        let mut playable: Vec<Word> = answers.iter().chain(accepted.iter()).copied().collect();
        playable.sort_unstable();
        playable.dedup();
        let position_freq = PositionFreqTable::new(&answers);
        Ok(Dictionary {
            answers,
            accepted,
            playable,
            position_freq,
        })
    }

    /// The words that may be chosen as the answer, in alphabetical order.
    pub fn answers(&self) -> &[Word] {
        &self.answers
    }

    /// The additional legal guesses, in alphabetical order.
    pub fn accepted(&self) -> &[Word] {
        &self.accepted
    }

    /// The union of answers and accepted words, in alphabetical order and without duplicates.
    pub fn playable(&self) -> &[Word] {
        &self.playable
    }

    /// Per-location letter counts over the answers.
    pub fn position_freq(&self) -> &PositionFreqTable {
        &self.position_freq
    }

    pub fn is_playable(&self, word: &Word) -> bool {
        self.playable.binary_search(word).is_ok()
    }

    pub fn is_answer(&self, word: &Word) -> bool {
        self.answers.binary_search(word).is_ok()
    }

    /// Picks an answer uniformly at random using the given random number generator.
    pub fn random_answer<R: Rng + ?Sized>(&self, rng: &mut R) -> Word {
        self.answers[rng.gen_range(0..self.answers.len())]
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use assert_matches::assert_matches;
    use rand::rngs::mock::StepRng;
    use std::io::Cursor;

    fn words(texts: &[&str]) -> Vec<Word> {
        texts.iter().map(|text| Word::new(text).unwrap()).collect()
    }

    #[test]
    fn word_new_uppercases() -> Result<(), WordleError> {
        let word = Word::new("hElLo")?;

        assert_eq!(word.to_string(), "HELLO");
        assert_eq!(format!("{:?}", word), "Word(HELLO)");
        Ok(())
    }

    #[test]
    fn word_new_rejects_bad_words() {
        assert_matches!(Word::new("four"), Err(WordleError::InvalidWord(_)));
        assert_matches!(Word::new("sixsix"), Err(WordleError::InvalidWord(_)));
        assert_matches!(Word::new("ab-cd"), Err(WordleError::InvalidWord(_)));
        assert_matches!(Word::new("abcd1"), Err(WordleError::InvalidWord(_)));
        assert_matches!(Word::new(" abcd"), Err(WordleError::InvalidWord(_)));
        assert_matches!(Word::new("ÉCLAT"), Err(WordleError::InvalidWord(_)));
    }

    #[test]
    fn word_letter_helpers() -> Result<(), WordleError> {
        let word = Word::new("melee")?;

        assert_eq!(word.letter(0), 'M');
        assert_eq!(word.count('E'), 3);
        assert_eq!(word.count('Z'), 0);
        assert!(word.contains('L'));
        assert!(!word.contains('A'));
        assert_eq!(word.num_unique_letters(), 3);
        assert_eq!(Word::new("lemon")?.num_unique_letters(), 5);
        assert_eq!(word.prefix(3), "MEL");
        Ok(())
    }

    #[test]
    fn words_order_lexicographically() -> Result<(), WordleError> {
        assert!(Word::new("abbey")? < Word::new("abide")?);
        assert!(Word::new("zebra")? > Word::new("young")?);
        Ok(())
    }

    #[test]
    fn parse_word_list_trims_and_skips_empty_lines() -> Result<(), WordleError> {
        let cursor = Cursor::new(String::from("\n\ncrane\n  Slate \n\t\n"));

        assert_eq!(parse_word_list(cursor)?, words(&["CRANE", "SLATE"]));
        Ok(())
    }

    #[test]
    fn parse_word_list_rejects_bad_entries() {
        let cursor = Cursor::new(String::from("crane\nlongword\n"));

        assert_matches!(
            parse_word_list(cursor),
            Err(WordleError::InvalidWord(word)) if word == "longword"
        );
    }

    #[test]
    fn position_freq_table_counts() {
        let table = PositionFreqTable::new(&words(&["HELLO", "HALLO", "WORDA"]));

        assert_eq!(table.count(0, 'H'), 2);
        assert_eq!(table.count(1, 'E'), 1);
        assert_eq!(table.count(2, 'L'), 2);
        assert_eq!(table.count(3, 'L'), 2);
        assert_eq!(table.count(4, 'O'), 2);
        assert_eq!(table.count(4, 'A'), 1);
        assert_eq!(table.count(0, 'W'), 1);

        // Missing letters:
        assert_eq!(table.count(1, 'H'), 0);
        assert_eq!(table.count(0, 'Z'), 0);
        assert_eq!(table.count(0, 'h'), 0);
        assert_eq!(table.count(5, 'H'), 0);
    }

    #[test]
    fn position_freq_table_letter_counts() {
        let table = PositionFreqTable::new(&words(&["HELLO", "HALLO", "WORDA"]));

        let counts = table.letter_counts(0);
        assert_eq!(counts.len(), 26);
        assert_eq!(counts[0], ('A', 0));
        assert_eq!(counts[7], ('H', 2));
        assert_eq!(counts[22], ('W', 1));
        assert!(table.letter_counts(5).is_empty());
    }

    #[test]
    fn dictionary_normalizes_lists() -> Result<(), WordleError> {
        let dictionary = Dictionary::new(
            vec!["slate", "", " Crane", "CRANE"],
            vec!["soare", "crane", "adieu"],
        )?;

        assert_eq!(dictionary.answers(), &words(&["CRANE", "SLATE"])[..]);
        assert_eq!(dictionary.accepted(), &words(&["ADIEU", "CRANE", "SOARE"])[..]);
        assert_eq!(
            dictionary.playable(),
            &words(&["ADIEU", "CRANE", "SLATE", "SOARE"])[..]
        );
        Ok(())
    }

    #[test]
    fn dictionary_membership() -> Result<(), WordleError> {
        let dictionary = Dictionary::new(["slate"], ["soare"])?;

        assert!(dictionary.is_playable(&Word::new("slate")?));
        assert!(dictionary.is_playable(&Word::new("soare")?));
        assert!(!dictionary.is_playable(&Word::new("crane")?));
        assert!(dictionary.is_answer(&Word::new("slate")?));
        assert!(!dictionary.is_answer(&Word::new("soare")?));
        Ok(())
    }

    #[test]
    fn dictionary_frequencies_use_answers_only() -> Result<(), WordleError> {
        let dictionary = Dictionary::new(["slate", "spine"], ["zzzzz"])?;

        assert_eq!(dictionary.position_freq().count(0, 'S'), 2);
        assert_eq!(dictionary.position_freq().count(0, 'Z'), 0);
        Ok(())
    }

    #[test]
    fn dictionary_without_answers_fails() {
        assert_matches!(
            Dictionary::new(Vec::<&str>::new(), vec!["crane"]),
            Err(WordleError::DictionaryEmpty)
        );
        assert_matches!(
            Dictionary::new(vec!["", "  "], vec!["crane"]),
            Err(WordleError::DictionaryEmpty)
        );
    }

    #[test]
    fn dictionary_from_readers() -> Result<(), WordleError> {
        let dictionary = Dictionary::from_readers(
            Cursor::new("crane\nslate\n"),
            Cursor::new("soare\n\n"),
        )?;

        assert_eq!(dictionary.answers().len(), 2);
        assert_eq!(dictionary.accepted(), &words(&["SOARE"])[..]);
        Ok(())
    }

    #[test]
    fn dictionary_random_answer_is_an_answer() -> Result<(), WordleError> {
        let dictionary = Dictionary::new(["crane", "slate", "spine"], ["soare"])?;
        let mut rng = StepRng::new(0, 1 << 40);

        for _ in 0..10 {
            let answer = dictionary.random_answer(&mut rng);
            assert!(dictionary.is_answer(&answer));
        }
        Ok(())
    }
}
