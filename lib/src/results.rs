use crate::letters::LetterDraw;
use std::io;
use std::sync::Arc;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Indicates that an error occurred while preparing or running a search.
#[derive(Debug, Error)]
pub enum LuckyLettersError {
    /// The requested number of draws must be at least 1.
    #[error("invalid number of combinations requested: {0}")]
    InvalidCount(i64),
    /// No words were available after loading and normalizing every origin.
    #[error("no words could be loaded from any word source")]
    EmptyWordSource,
    /// The given letters do not form a valid draw.
    #[error("invalid letter draw: {0}")]
    InvalidDraw(String),
    /// The search configuration is inconsistent.
    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),
    /// Reading a word origin failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A draw that met the qualifying threshold, along with the words it can spell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QualifyingDraw {
    pub draw: LetterDraw,
    /// Matching words, in word-source order.
    pub words: Vec<Arc<str>>,
}

/// Why a search stopped drawing letters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStop {
    /// The requested number of qualifying draws was found.
    Satisfied,
    /// The attempt ceiling was reached first.
    AttemptsExhausted,
    /// The wall-clock limit was reached first.
    TimeLimit,
}

/// The qualifying draws found by a search, keyed by each draw's uppercase form.
///
/// Entries are kept in the order they were first accepted. The number of entries is advisory: a
/// search that runs out of attempts returns whatever it found, possibly nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResults {
    entries: Vec<QualifyingDraw>,
    attempts: u32,
    duplicate_draws: u32,
    stop: SearchStop,
}

impl SearchResults {
    pub(crate) fn new() -> SearchResults {
        SearchResults {
            entries: Vec::new(),
            attempts: 0,
            duplicate_draws: 0,
            stop: SearchStop::AttemptsExhausted,
        }
    }

    /// Inserts the entry, replacing the words of an existing entry with the same key in place.
    ///
    /// Returns `true` iff a previous entry was replaced.
    pub(crate) fn insert_or_replace(&mut self, entry: QualifyingDraw) -> bool {
        match self.entries.iter_mut().find(|e| e.draw == entry.draw) {
            Some(existing) => {
                existing.words = entry.words;
                self.duplicate_draws += 1;
                true
            }
            None => {
                self.entries.push(entry);
                false
            }
        }
    }

    pub(crate) fn record_attempt(&mut self) {
        self.attempts += 1;
    }

    pub(crate) fn finish(&mut self, stop: SearchStop) {
        self.stop = stop;
    }

    /// Returns the number of qualifying draws.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` iff no qualifying draw was found.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` iff a draw with this key is in the results.
    pub fn contains_draw(&self, draw: &LetterDraw) -> bool {
        self.entries.iter().any(|e| e.draw == *draw)
    }

    /// Looks up the matching words by the draw's key. The key is case-insensitive.
    pub fn get(&self, key: &str) -> Option<&[Arc<str>]> {
        self.entries
            .iter()
            .find(|e| e.draw.key().eq_ignore_ascii_case(key))
            .map(|e| e.words.as_slice())
    }

    /// Iterates over the qualifying draws in acceptance order.
    pub fn iter(&self) -> std::slice::Iter<'_, QualifyingDraw> {
        self.entries.iter()
    }

    /// The number of sample/filter cycles the search performed.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// The number of qualifying draws that repeated an earlier draw. Each of them used up an
    /// attempt without adding an entry.
    pub fn duplicate_draws(&self) -> u32 {
        self.duplicate_draws
    }

    /// Why the search stopped.
    pub fn stop(&self) -> SearchStop {
        self.stop
    }
}

impl<'a> IntoIterator for &'a SearchResults {
    type Item = &'a QualifyingDraw;
    type IntoIter = std::slice::Iter<'a, QualifyingDraw>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Serializes as a map from each uppercase draw key to its list of lowercase words.
#[cfg(feature = "serde")]
impl Serialize for SearchResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.draw.key(), &entry.words)?;
        }
        map.end()
    }
}
