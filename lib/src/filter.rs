use crate::data::normalize_word;
use crate::letters::LetterDraw;
use crate::matcher::LetterCounts;
use std::borrow::Cow;
use std::sync::Arc;

/// The default maximum number of words returned for one draw.
pub const DEFAULT_MAX_WORDS: usize = 27;
/// The shortest word that counts as a match.
pub const MIN_WORD_LENGTH: usize = 5;
/// The longest word that counts as a match.
pub const MAX_WORD_LENGTH: usize = 6;

/// Selects the words that can be spelled from a draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordFilter {
    /// Stop once this many words have matched.
    pub max_words: usize,
    /// Inclusive bounds on the number of letters in a matching word.
    pub min_word_len: usize,
    pub max_word_len: usize,
}

impl Default for WordFilter {
    fn default() -> Self {
        WordFilter {
            max_words: DEFAULT_MAX_WORDS,
            min_word_len: MIN_WORD_LENGTH,
            max_word_len: MAX_WORD_LENGTH,
        }
    }
}

impl WordFilter {
    /// Creates a filter with the default word lengths and the given limit.
    pub fn with_max_words(max_words: usize) -> WordFilter {
        WordFilter {
            max_words,
            ..WordFilter::default()
        }
    }

    /// Returns the words that have an allowed length and can be spelled from the draw, in the
    /// order they appear in `words`.
    ///
    /// Scanning stops as soon as `max_words` words have matched, so when there are more matches
    /// than that, the order of `words` decides which ones are returned.
    pub fn filter(&self, draw: &LetterDraw, words: &[Arc<str>]) -> Vec<Arc<str>> {
        let available = LetterCounts::from(draw);
        let mut matches = Vec::new();
        if self.max_words == 0 {
            return matches;
        }
        for word in words {
            let normalized = normalize_word(word);
            let length = normalized.chars().count();
            if length < self.min_word_len || length > self.max_word_len {
                continue;
            }
            if !available.can_spell(&normalized) {
                continue;
            }
            matches.push(match normalized {
                Cow::Borrowed(_) => Arc::clone(word),
                Cow::Owned(owned) => Arc::from(owned.as_str()),
            });
            if matches.len() >= self.max_words {
                break;
            }
        }
        matches
    }
}

/// Returns up to `max_words` words of five or six letters that can be spelled from the draw.
///
/// ```
/// use lucky_letters::{filter_words, WordBank};
///
/// let bank = WordBank::from_iterator(["stone", "set", "tones", "tents"]).unwrap();
/// let draw = "TONESA".parse().unwrap();
///
/// let words = filter_words(&draw, &bank, 27);
/// assert_eq!(words.len(), 2);
/// assert_eq!(&*words[0], "stone");
/// ```
pub fn filter_words(draw: &LetterDraw, words: &[Arc<str>], max_words: usize) -> Vec<Arc<str>> {
    WordFilter::with_max_words(max_words).filter(draw, words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::can_form;
    use proptest::prelude::*;

    fn arc_words(words: &[&str]) -> Vec<Arc<str>> {
        words.iter().map(|word| Arc::from(*word)).collect()
    }

    fn draw(key: &str) -> LetterDraw {
        key.parse().unwrap()
    }

    #[test]
    fn filter_keeps_five_and_six_letter_anagrams() {
        let words = arc_words(&["stone", "tones", "notes", "onset", "tonse", "set", "a"]);

        let matches = filter_words(&draw("TONESA"), &words, DEFAULT_MAX_WORDS);

        assert_eq!(matches, arc_words(&["stone", "tones", "notes", "onset", "tonse"]));
    }

    #[test]
    fn filter_stops_at_max_words() {
        let words = arc_words(&["stone", "tones", "notes", "onset", "atones"]);

        let matches = filter_words(&draw("TONESA"), &words, 3);

        assert_eq!(matches, arc_words(&["stone", "tones", "notes"]));
    }

    #[test]
    fn filter_zero_max_words() {
        let words = arc_words(&["stone"]);

        assert!(filter_words(&draw("TONESA"), &words, 0).is_empty());
    }

    #[test]
    fn filter_ignores_other_lengths() {
        let words = arc_words(&["tone", "seat", "atoness", "sonatas"]);

        assert!(filter_words(&draw("TONESA"), &words, DEFAULT_MAX_WORDS).is_empty());
    }

    #[test]
    fn filter_normalizes_words() {
        let words = arc_words(&[" Stone ", "NOTES"]);

        let matches = filter_words(&draw("TONESA"), &words, DEFAULT_MAX_WORDS);

        assert_eq!(matches, arc_words(&["stone", "notes"]));
    }

    #[test]
    fn filter_reuses_normalized_words() {
        let words = arc_words(&["stone"]);

        let matches = filter_words(&draw("TONESA"), &words, DEFAULT_MAX_WORDS);

        assert!(Arc::ptr_eq(&matches[0], &words[0]));
    }

    #[test]
    fn filter_custom_lengths() {
        let words = arc_words(&["tone", "stone", "atones"]);
        let filter = WordFilter {
            max_words: 10,
            min_word_len: 4,
            max_word_len: 5,
        };

        assert_eq!(
            filter.filter(&draw("TONESA"), &words),
            arc_words(&["tone", "stone"])
        );
    }

    proptest! {
        #[test]
        fn filter_results_are_bounded_and_formable(
            words in proptest::collection::vec("[aeinorst]{3,7}", 0..60),
            max_words in 1usize..30,
        ) {
            let words: Vec<Arc<str>> = words.iter().map(|w| Arc::from(w.as_str())).collect();
            let draw = draw("SATIRE");

            let matches = filter_words(&draw, &words, max_words);

            prop_assert!(matches.len() <= max_words);
            for word in &matches {
                prop_assert!(word.len() == 5 || word.len() == 6);
                prop_assert!(can_form(word, &draw.to_lowercase()));
            }
        }
    }
}
