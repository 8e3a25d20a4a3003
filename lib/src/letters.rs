use crate::results::LuckyLettersError;
use rand::rngs::ThreadRng;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// The number of letters in every draw.
pub const DRAW_LENGTH: usize = 6;

/// Relative sampling weights for each letter, roughly following English letter frequency.
///
/// J, Q, X, and Z are never drawn.
pub const LETTER_WEIGHTS: [(char, u32); 22] = [
    ('e', 10),
    ('a', 8),
    ('r', 6),
    ('i', 6),
    ('o', 6),
    ('t', 6),
    ('n', 5),
    ('s', 5),
    ('l', 4),
    ('c', 4),
    ('u', 4),
    ('d', 4),
    ('p', 3),
    ('m', 3),
    ('h', 3),
    ('g', 3),
    ('b', 2),
    ('f', 2),
    ('y', 2),
    ('w', 2),
    ('k', 2),
    ('v', 2),
];

/// Returns the sampling weight of the given lowercase letter, or `None` if it is never drawn.
pub fn letter_weight(letter: char) -> Option<u32> {
    LETTER_WEIGHTS
        .iter()
        .find(|(l, _)| *l == letter)
        .map(|(_, weight)| *weight)
}

/// An immutable set of six letters, kept in the order they were drawn.
///
/// Letters are stored in lower case. The draw's key (and its `Display` form) is upper case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LetterDraw {
    letters: [char; DRAW_LENGTH],
}

impl LetterDraw {
    /// Creates a draw from letters that are known to be in [`LETTER_WEIGHTS`].
    fn from_letters(letters: [char; DRAW_LENGTH]) -> LetterDraw {
        LetterDraw { letters }
    }

    /// The drawn letters, in lower case.
    pub fn letters(&self) -> &[char; DRAW_LENGTH] {
        &self.letters
    }

    /// The draw as a lower-case string, as used for matching.
    pub fn to_lowercase(&self) -> String {
        self.letters.iter().collect()
    }

    /// The draw as an upper-case string, as used to key search results.
    pub fn key(&self) -> String {
        self.letters.iter().map(|l| l.to_ascii_uppercase()).collect()
    }
}

impl fmt::Display for LetterDraw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl FromStr for LetterDraw {
    type Err = LuckyLettersError;

    /// Parses six letters from the weighted alphabet, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut letters = ['\0'; DRAW_LENGTH];
        let mut count = 0;
        for letter in trimmed.chars().map(|c| c.to_ascii_lowercase()) {
            if count == DRAW_LENGTH {
                return Err(LuckyLettersError::InvalidDraw(format!(
                    "\"{}\" has more than {} letters",
                    trimmed, DRAW_LENGTH
                )));
            }
            if letter_weight(letter).is_none() {
                return Err(LuckyLettersError::InvalidDraw(format!(
                    "'{}' is not a drawable letter",
                    letter
                )));
            }
            letters[count] = letter;
            count += 1;
        }
        if count < DRAW_LENGTH {
            return Err(LuckyLettersError::InvalidDraw(format!(
                "\"{}\" has fewer than {} letters",
                trimmed, DRAW_LENGTH
            )));
        }
        Ok(LetterDraw::from_letters(letters))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for LetterDraw {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.key())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for LetterDraw {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = <String as serde::Deserialize>::deserialize(deserializer)?;
        key.parse().map_err(serde::de::Error::custom)
    }
}

/// Produces letter draws.
pub trait LetterSampler {
    /// Draws a new set of [`DRAW_LENGTH`] letters.
    fn sample(&mut self) -> LetterDraw;
}

/// Draws each letter independently, with replacement, in proportion to its weight in
/// [`LETTER_WEIGHTS`].
#[derive(Clone, Debug)]
pub struct WeightedLetterSampler<R: Rng> {
    rng: R,
    pool: Vec<char>,
}

impl<R: Rng> WeightedLetterSampler<R> {
    /// Creates a sampler drawing from the given random number generator.
    ///
    /// ```
    /// use lucky_letters::{LetterSampler, WeightedLetterSampler};
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    ///
    /// let mut sampler = WeightedLetterSampler::new(StdRng::seed_from_u64(7));
    /// assert_eq!(sampler.sample().key().len(), 6);
    /// ```
    pub fn new(rng: R) -> WeightedLetterSampler<R> {
        let pool = LETTER_WEIGHTS
            .iter()
            .flat_map(|(letter, weight)| std::iter::repeat(*letter).take(*weight as usize))
            .collect();
        WeightedLetterSampler { rng, pool }
    }
}

impl WeightedLetterSampler<ThreadRng> {
    /// Creates a sampler backed by the thread-local random number generator.
    pub fn from_thread_rng() -> WeightedLetterSampler<ThreadRng> {
        WeightedLetterSampler::new(rand::thread_rng())
    }
}

impl<R: Rng> LetterSampler for WeightedLetterSampler<R> {
    fn sample(&mut self) -> LetterDraw {
        let mut letters = ['\0'; DRAW_LENGTH];
        for letter in letters.iter_mut() {
            *letter = self.pool[self.rng.gen_range(0..self.pool.len())];
        }
        LetterDraw::from_letters(letters)
    }
}

/// Replays a fixed sequence of draws, starting over once the sequence runs out.
#[derive(Clone, Debug)]
pub struct SequenceSampler {
    draws: Vec<LetterDraw>,
    next: usize,
    samples_taken: usize,
}

impl SequenceSampler {
    /// Creates a sampler that cycles through the given draws.
    pub fn new(draws: Vec<LetterDraw>) -> Result<SequenceSampler, LuckyLettersError> {
        if draws.is_empty() {
            return Err(LuckyLettersError::InvalidConfig(
                "a sequence sampler needs at least one draw".to_string(),
            ));
        }
        Ok(SequenceSampler {
            draws,
            next: 0,
            samples_taken: 0,
        })
    }

    /// Parses each string as a [`LetterDraw`] and cycles through them.
    pub fn from_keys<S: AsRef<str>>(
        keys: impl IntoIterator<Item = S>,
    ) -> Result<SequenceSampler, LuckyLettersError> {
        let draws = keys
            .into_iter()
            .map(|key| key.as_ref().parse())
            .collect::<Result<Vec<LetterDraw>, LuckyLettersError>>()?;
        SequenceSampler::new(draws)
    }

    /// The number of draws handed out so far.
    pub fn samples_taken(&self) -> usize {
        self.samples_taken
    }
}

impl LetterSampler for SequenceSampler {
    fn sample(&mut self) -> LetterDraw {
        let draw = self.draws[self.next];
        self.next = (self.next + 1) % self.draws.len();
        self.samples_taken += 1;
        draw
    }
}
