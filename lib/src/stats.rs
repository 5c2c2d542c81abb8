use crate::data::Dictionary;
use crate::data::WORD_LENGTH;
use crate::engine::top_n;
use crate::engine::ScoredWord;
use crate::restrictions::ConstraintSet;
use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const NUM_TOP_ENTRIES: usize = 10;
const PREFIX_LENGTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LetterCount {
    pub letter: char,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrefixCount {
    pub prefix: String,
    pub count: u32,
}

/// Letter statistics over the answers in a [`Dictionary`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StatsReport {
    pub total_answers: usize,
    pub total_accepted: usize,
    /// For each location, the ten most common letters there, most common first.
    pub positional: Vec<Vec<LetterCount>>,
    /// How often each of the 26 letters occurs across all answers, most common first.
    pub letter_frequency: Vec<LetterCount>,
    /// The ten most common three-letter prefixes, most common first.
    pub top_prefixes: Vec<PrefixCount>,
    /// The ten best first guesses.
    pub best_starters: Vec<ScoredWord>,
}

/// Computes the statistics report for the given dictionary.
///
/// Ties are listed alphabetically. The per-location and prefix lists leave out zero counts.
pub fn compute_stats(dictionary: &Dictionary) -> StatsReport {
    let position_freq = dictionary.position_freq();
    let positional = (0..WORD_LENGTH)
        .map(|index| {
            let mut counts: Vec<LetterCount> = position_freq
                .letter_counts(index)
                .into_iter()
                .filter(|(_, count)| *count > 0)
                .map(|(letter, count)| LetterCount { letter, count })
                .collect();
            sort_letter_counts(&mut counts);
            counts.truncate(NUM_TOP_ENTRIES);
            counts
        })
        .collect();

    let mut letter_totals: BTreeMap<char, u32> = ('A'..='Z').map(|letter| (letter, 0)).collect();
    let mut prefix_totals: BTreeMap<String, u32> = BTreeMap::new();
    for word in dictionary.answers() {
        for letter in word.letters() {
            *letter_totals.entry(letter).or_insert(0) += 1;
        }
        *prefix_totals.entry(word.prefix(PREFIX_LENGTH)).or_insert(0) += 1;
    }
    let mut letter_frequency: Vec<LetterCount> = letter_totals
        .into_iter()
        .map(|(letter, count)| LetterCount { letter, count })
        .collect();
    sort_letter_counts(&mut letter_frequency);

    let mut top_prefixes: Vec<PrefixCount> = prefix_totals
        .into_iter()
        .map(|(prefix, count)| PrefixCount { prefix, count })
        .collect();
    top_prefixes.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.prefix.cmp(&b.prefix)));
    top_prefixes.truncate(NUM_TOP_ENTRIES);

    StatsReport {
        total_answers: dictionary.answers().len(),
        total_accepted: dictionary.accepted().len(),
        positional,
        letter_frequency,
        top_prefixes,
        best_starters: top_n(dictionary, &ConstraintSet::new(), NUM_TOP_ENTRIES),
    }
}

fn sort_letter_counts(counts: &mut [LetterCount]) {
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.letter.cmp(&b.letter)));
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total answers: {}", self.total_answers)?;
        writeln!(f, "Total accepted words: {}", self.total_accepted)?;

        writeln!(f, "\nMost common letters by position:")?;
        for (index, counts) in self.positional.iter().enumerate() {
            write!(f, "  Position {}:", index + 1)?;
            for LetterCount { letter, count } in counts {
                write!(f, " {}({})", letter, count)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "\nOverall letter frequency:")?;
        for chunk in self.letter_frequency.chunks(9) {
            let line: Vec<String> = chunk
                .iter()
                .map(|LetterCount { letter, count }| format!("{}: {}", letter, count))
                .collect();
            writeln!(f, "  {}", line.join(", "))?;
        }

        writeln!(f, "\nMost common {}-letter prefixes:", PREFIX_LENGTH)?;
        for PrefixCount { prefix, count } in &self.top_prefixes {
            writeln!(f, "  {}: {}", prefix, count)?;
        }

        writeln!(f, "\nBest starting words:")?;
        for (rank, ScoredWord { word, score }) in self.best_starters.iter().enumerate() {
            writeln!(f, "  {:>2}. {} ({})", rank + 1, word, score)?;
        }
        Ok(())
    }
}
