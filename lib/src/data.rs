use crate::results::LuckyLettersError;
use rayon::prelude::*;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fs;
use std::io::BufRead;
use std::ops::Deref;
use std::path::Path;
use std::result::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Supplies the candidate words to match against.
///
/// Implementations should provide trimmed, lower-case, non-empty, duplicate-free words. The
/// order of the words is significant: when a draw matches more words than are kept, the earlier
/// words win.
pub trait WordSource {
    /// The candidate words, in their natural order.
    fn words(&self) -> &[Arc<str>];
}

impl WordSource for [Arc<str>] {
    fn words(&self) -> &[Arc<str>] {
        self
    }
}

impl WordSource for Vec<Arc<str>> {
    fn words(&self) -> &[Arc<str>] {
        self
    }
}

/// Trims the word and converts it to lower case.
///
/// Returns a borrowed value iff the word was already normalized.
pub fn normalize_word(word: &str) -> Cow<'_, str> {
    let trimmed = word.trim();
    if trimmed.chars().any(char::is_uppercase) {
        return Cow::Owned(trimmed.to_lowercase());
    }
    if trimmed.len() != word.len() {
        return Cow::Owned(trimmed.to_string());
    }
    Cow::Borrowed(word)
}

/// Normalizes the words, dropping empty words and any repeats after the first occurrence.
fn normalize_all<S: AsRef<str> + Sync>(raw_words: &[S]) -> Vec<Arc<str>> {
    let normalized: Vec<Cow<'_, str>> = raw_words
        .par_iter()
        .map(|word| normalize_word(word.as_ref()))
        .collect();
    let mut seen: HashSet<&str> = HashSet::with_capacity(normalized.len());
    let mut all_words = Vec::with_capacity(normalized.len());
    for word in &normalized {
        let word: &str = word;
        if !word.is_empty() && seen.insert(word) {
            all_words.push(Arc::from(word));
        }
    }
    all_words
}

/// Contains all the candidate words, normalized and deduplicated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordBank {
    all_words: Vec<Arc<str>>,
}

impl WordBank {
    /// Constructs a new `WordBank` by reading words from the given reader.
    ///
    /// The reader should provide one word per line. Each word is trimmed and converted to lower
    /// case; empty lines and repeated words are dropped.
    pub fn from_reader<R: BufRead>(word_reader: R) -> Result<Self, LuckyLettersError> {
        WordBankBuilder::new().add_reader(word_reader)?.build()
    }

    /// Constructs a new `WordBank` using the words from the given iterator.
    ///
    /// Each word is trimmed and converted to lower case; empty and repeated words are dropped.
    pub fn from_iterator<S>(words: impl IntoIterator<Item = S>) -> Result<Self, LuckyLettersError>
    where
        S: AsRef<str>,
    {
        WordBankBuilder::new().add_words(words).build()
    }

    /// Returns the number of candidate words.
    pub fn len(&self) -> usize {
        self.all_words.len()
    }

    /// Returns `true` iff the bank holds no words. Banks built through this crate never do.
    pub fn is_empty(&self) -> bool {
        self.all_words.is_empty()
    }
}

impl Deref for WordBank {
    type Target = [Arc<str>];

    fn deref(&self) -> &Self::Target {
        &self.all_words
    }
}

impl WordSource for WordBank {
    fn words(&self) -> &[Arc<str>] {
        &self.all_words
    }
}

/// Merges words from any number of origins into a single [`WordBank`].
///
/// Words keep the order of their origins, and within an origin the order of its lines. A word
/// that appears more than once keeps the position of its first occurrence.
///
/// ```
/// use lucky_letters::WordBankBuilder;
///
/// let bank = WordBankBuilder::new()
///     .add_file("/no/such/word/list.txt")
///     .add_words(["Stone", "notes"])
///     .add_words(["stone", "onset"])
///     .build()
///     .unwrap();
///
/// assert_eq!(bank.len(), 3);
/// ```
#[derive(Debug, Default)]
pub struct WordBankBuilder {
    raw_words: Vec<String>,
    num_origins: usize,
    num_failed_origins: usize,
}

impl WordBankBuilder {
    /// Creates a builder with no origins.
    pub fn new() -> WordBankBuilder {
        WordBankBuilder::default()
    }

    /// Adds the given words as one origin.
    pub fn add_words<S: AsRef<str>>(mut self, words: impl IntoIterator<Item = S>) -> Self {
        self.num_origins += 1;
        self.raw_words
            .extend(words.into_iter().map(|word| word.as_ref().to_string()));
        self
    }

    /// Adds one word per line from the reader as one origin.
    ///
    /// Fails if the reader fails.
    pub fn add_reader<R: BufRead>(mut self, word_reader: R) -> Result<Self, LuckyLettersError> {
        for line in word_reader.lines() {
            self.raw_words.push(line?);
        }
        self.num_origins += 1;
        Ok(self)
    }

    /// Adds one word per line from the file as one origin.
    ///
    /// A file that cannot be read is skipped and logged, so that other origins may still supply
    /// words. Bytes that are not valid UTF-8 are replaced rather than rejected.
    pub fn add_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref();
        self.num_origins += 1;
        match fs::read(path) {
            Ok(bytes) => {
                let contents = String::from_utf8_lossy(&bytes);
                let before = self.raw_words.len();
                self.raw_words
                    .extend(contents.lines().map(|line| line.to_string()));
                debug!(
                    path = %path.display(),
                    lines = self.raw_words.len() - before,
                    "read word file"
                );
            }
            Err(err) => {
                self.num_failed_origins += 1;
                warn!(path = %path.display(), error = %err, "skipping unreadable word file");
            }
        }
        self
    }

    /// Normalizes and deduplicates all the words added so far.
    ///
    /// Fails with [`LuckyLettersError::EmptyWordSource`] if no words remain.
    pub fn build(self) -> Result<WordBank, LuckyLettersError> {
        let all_words = normalize_all(&self.raw_words);
        if all_words.is_empty() {
            return Err(LuckyLettersError::EmptyWordSource);
        }
        info!(
            words = all_words.len(),
            origins = self.num_origins,
            failed_origins = self.num_failed_origins,
            "built word bank"
        );
        Ok(WordBank { all_words })
    }
}
