use crate::data::WordSource;
use crate::filter::{WordFilter, DEFAULT_MAX_WORDS, MAX_WORD_LENGTH, MIN_WORD_LENGTH};
use crate::letters::{LetterSampler, WeightedLetterSampler};
use crate::results::*;
use std::result::Result;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// The default number of matching words a draw needs in order to qualify.
pub const DEFAULT_MIN_QUALIFYING_MATCHES: usize = 9;
/// The default maximum number of draws a search may try.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// Controls how a search draws and judges letters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// A draw qualifies iff it matches at least this many words.
    pub min_qualifying_matches: usize,
    /// The search stops after trying this many draws, found or not.
    pub max_attempts: u32,
    /// At most this many words are kept for each draw.
    pub max_words: usize,
    /// Inclusive bounds on the number of letters in a matching word.
    pub min_word_len: usize,
    pub max_word_len: usize,
    /// If set, the search also stops once it has run for this long.
    pub time_limit: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            min_qualifying_matches: DEFAULT_MIN_QUALIFYING_MATCHES,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_words: DEFAULT_MAX_WORDS,
            min_word_len: MIN_WORD_LENGTH,
            max_word_len: MAX_WORD_LENGTH,
            time_limit: None,
        }
    }
}

impl SearchConfig {
    pub fn with_min_qualifying_matches(mut self, min_qualifying_matches: usize) -> Self {
        self.min_qualifying_matches = min_qualifying_matches;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = max_words;
        self
    }

    pub fn with_word_lengths(mut self, min_word_len: usize, max_word_len: usize) -> Self {
        self.min_word_len = min_word_len;
        self.max_word_len = max_word_len;
        self
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    /// Checks that a search with this configuration can make progress.
    pub fn validate(&self) -> Result<(), LuckyLettersError> {
        if self.max_attempts == 0 {
            return Err(LuckyLettersError::InvalidConfig(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        if self.max_words == 0 {
            return Err(LuckyLettersError::InvalidConfig(
                "max_words must be at least 1".to_string(),
            ));
        }
        if self.min_word_len == 0 || self.min_word_len > self.max_word_len {
            return Err(LuckyLettersError::InvalidConfig(format!(
                "word lengths must satisfy 1 <= min ({}) <= max ({})",
                self.min_word_len, self.max_word_len
            )));
        }
        if self.min_qualifying_matches > self.max_words {
            return Err(LuckyLettersError::InvalidConfig(format!(
                "min_qualifying_matches ({}) can never be reached with max_words ({})",
                self.min_qualifying_matches, self.max_words
            )));
        }
        Ok(())
    }

    /// The filter used to match each draw.
    pub fn word_filter(&self) -> WordFilter {
        WordFilter {
            max_words: self.max_words,
            min_word_len: self.min_word_len,
            max_word_len: self.max_word_len,
        }
    }
}

/// Repeatedly draws letters until `requested_count` distinct draws each match at least
/// `min_qualifying_matches` words, or until the attempt ceiling (or time limit) is reached.
///
/// Running out of attempts is not an error: the result simply holds fewer draws than requested.
/// A qualifying draw that repeats an earlier one replaces that entry, uses up its attempt, and
/// does not grow the result.
///
/// Fails without drawing any letters if `requested_count` is less than 1, the word source is
/// empty, or the configuration is invalid.
pub fn search_draws<S, L>(
    requested_count: i64,
    word_source: &S,
    sampler: &mut L,
    config: &SearchConfig,
) -> Result<SearchResults, LuckyLettersError>
where
    S: WordSource + ?Sized,
    L: LetterSampler + ?Sized,
{
    if requested_count < 1 {
        return Err(LuckyLettersError::InvalidCount(requested_count));
    }
    let words = word_source.words();
    if words.is_empty() {
        return Err(LuckyLettersError::EmptyWordSource);
    }
    config.validate()?;

    let requested_count = usize::try_from(requested_count).unwrap_or(usize::MAX);
    let filter = config.word_filter();
    let start_time = Instant::now();
    let mut results = SearchResults::new();
    loop {
        if results.len() >= requested_count {
            results.finish(SearchStop::Satisfied);
            break;
        }
        if results.attempts() >= config.max_attempts {
            results.finish(SearchStop::AttemptsExhausted);
            break;
        }
        if config
            .time_limit
            .map_or(false, |limit| start_time.elapsed() >= limit)
        {
            results.finish(SearchStop::TimeLimit);
            break;
        }

        let draw = sampler.sample();
        let matches = filter.filter(&draw, words);
        results.record_attempt();
        if matches.len() < config.min_qualifying_matches {
            continue;
        }
        let num_matches = matches.len();
        if results.insert_or_replace(QualifyingDraw {
            draw,
            words: matches,
        }) {
            debug!(draw = %draw, "qualifying draw repeated an earlier draw");
        } else {
            debug!(draw = %draw, matches = num_matches, "accepted draw");
        }
    }

    info!(
        requested = requested_count,
        found = results.len(),
        attempts = results.attempts(),
        duplicates = results.duplicate_draws(),
        stop = ?results.stop(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "search finished"
    );
    Ok(results)
}

/// Finds up to `requested_count` lucky draws using the default configuration and the thread-local
/// random number generator.
///
/// ```
/// use lucky_letters::{find_lucky_draws, LuckyLettersError, WordBank};
///
/// let bank = WordBank::from_iterator(["stone", "notes", "onset"]).unwrap();
///
/// let results = find_lucky_draws(2, &bank).unwrap();
/// assert!(results.len() <= 2);
/// assert!(matches!(find_lucky_draws(0, &bank), Err(LuckyLettersError::InvalidCount(0))));
/// ```
pub fn find_lucky_draws<S>(
    requested_count: i64,
    word_source: &S,
) -> Result<SearchResults, LuckyLettersError>
where
    S: WordSource + ?Sized,
{
    search_draws(
        requested_count,
        word_source,
        &mut WeightedLetterSampler::from_thread_rng(),
        &SearchConfig::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letters::SequenceSampler;
    use assert_matches::assert_matches;
    use std::sync::Arc;

    fn arc_words(words: &[&str]) -> Vec<Arc<str>> {
        words.iter().map(|word| Arc::from(*word)).collect()
    }

    #[test]
    fn search_stops_when_satisfied() -> Result<(), LuckyLettersError> {
        let words = arc_words(&["stone", "notes", "onset"]);
        let mut sampler = SequenceSampler::from_keys(["TONESA", "BBBBBB", "EARTHS"])?;
        let config = SearchConfig::default().with_min_qualifying_matches(3);

        let results = search_draws(1, &words, &mut sampler, &config)?;

        assert_eq!(results.len(), 1);
        assert_eq!(results.attempts(), 1);
        assert_eq!(results.stop(), SearchStop::Satisfied);
        assert_eq!(sampler.samples_taken(), 1);
        Ok(())
    }

    #[test]
    fn search_rejects_invalid_count_without_sampling() -> Result<(), LuckyLettersError> {
        let words = arc_words(&["stone"]);
        let mut sampler = SequenceSampler::from_keys(["TONESA"])?;

        for count in [0, -1, i64::MIN] {
            assert_matches!(
                search_draws(count, &words, &mut sampler, &SearchConfig::default()),
                Err(LuckyLettersError::InvalidCount(c)) if c == count
            );
        }
        assert_eq!(sampler.samples_taken(), 0);
        Ok(())
    }

    #[test]
    fn search_rejects_empty_source() -> Result<(), LuckyLettersError> {
        let words: Vec<Arc<str>> = Vec::new();
        let mut sampler = SequenceSampler::from_keys(["TONESA"])?;

        assert_matches!(
            search_draws(1, &words, &mut sampler, &SearchConfig::default()),
            Err(LuckyLettersError::EmptyWordSource)
        );
        assert_eq!(sampler.samples_taken(), 0);
        Ok(())
    }

    #[test]
    fn search_zero_time_limit_draws_nothing() -> Result<(), LuckyLettersError> {
        let words = arc_words(&["stone"]);
        let mut sampler = SequenceSampler::from_keys(["TONESA"])?;
        let config = SearchConfig::default().with_time_limit(Duration::ZERO);

        let results = search_draws(1, &words, &mut sampler, &config)?;

        assert!(results.is_empty());
        assert_eq!(results.stop(), SearchStop::TimeLimit);
        assert_eq!(sampler.samples_taken(), 0);
        Ok(())
    }

    #[test]
    fn validate_default_config() {
        assert_matches!(SearchConfig::default().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_inconsistent_config() {
        for config in [
            SearchConfig::default().with_max_attempts(0),
            SearchConfig::default().with_max_words(0),
            SearchConfig::default().with_word_lengths(0, 6),
            SearchConfig::default().with_word_lengths(7, 6),
            SearchConfig::default()
                .with_max_words(5)
                .with_min_qualifying_matches(6),
        ] {
            assert_matches!(config.validate(), Err(LuckyLettersError::InvalidConfig(_)));
        }
    }

    #[test]
    fn word_filter_uses_config() {
        let filter = SearchConfig::default()
            .with_max_words(12)
            .with_word_lengths(4, 7)
            .word_filter();

        assert_eq!(
            filter,
            WordFilter {
                max_words: 12,
                min_word_len: 4,
                max_word_len: 7,
            }
        );
    }
}
