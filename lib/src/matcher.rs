use crate::letters::LetterDraw;

const ASCII_LETTERS: usize = 26;

/// Counts how many times each letter occurs in a set of available letters.
///
/// Lower-case ASCII letters are counted in a fixed table; any other character is tracked
/// separately so that arbitrary strings can still be compared.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LetterCounts {
    ascii: [u32; ASCII_LETTERS],
    other: Vec<(char, u32)>,
}

impl LetterCounts {
    /// Counts the letters in the given string.
    pub fn new(letters: &str) -> LetterCounts {
        let mut counts = LetterCounts::default();
        for letter in letters.chars() {
            counts.add(letter);
        }
        counts
    }

    fn add(&mut self, letter: char) {
        if letter.is_ascii_lowercase() {
            self.ascii[ascii_index(letter)] += 1;
            return;
        }
        match self.other.iter_mut().find(|(other, _)| *other == letter) {
            Some((_, count)) => *count += 1,
            None => self.other.push((letter, 1)),
        }
    }

    /// Returns the number of times the letter occurs.
    pub fn count(&self, letter: char) -> u32 {
        if letter.is_ascii_lowercase() {
            return self.ascii[ascii_index(letter)];
        }
        self.other
            .iter()
            .find(|(other, _)| *other == letter)
            .map_or(0, |(_, count)| *count)
    }

    /// Returns the total number of letters counted.
    pub fn len(&self) -> usize {
        (self.ascii.iter().sum::<u32>() + self.other.iter().map(|(_, count)| count).sum::<u32>())
            as usize
    }

    /// Returns `true` iff no letters were counted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` iff every letter here occurs at least as often in `available`.
    pub fn is_subset_of(&self, available: &LetterCounts) -> bool {
        self.ascii
            .iter()
            .zip(available.ascii.iter())
            .all(|(needed, have)| needed <= have)
            && self
                .other
                .iter()
                .all(|(letter, needed)| *needed <= available.count(*letter))
    }

    /// Returns `true` iff the word can be spelled with these letters, using each letter no more
    /// often than it was counted.
    ///
    /// Stops at the first letter that has run out.
    pub fn can_spell(&self, word: &str) -> bool {
        let mut remaining = self.ascii;
        let mut other_remaining: Option<Vec<(char, u32)>> = None;
        for letter in word.chars() {
            if letter.is_ascii_lowercase() {
                let count = &mut remaining[ascii_index(letter)];
                if *count == 0 {
                    return false;
                }
                *count -= 1;
                continue;
            }
            let other = other_remaining.get_or_insert_with(|| self.other.clone());
            match other.iter_mut().find(|(other, _)| *other == letter) {
                Some((_, count)) if *count > 0 => *count -= 1,
                _ => return false,
            }
        }
        true
    }
}

impl From<&LetterDraw> for LetterCounts {
    fn from(draw: &LetterDraw) -> LetterCounts {
        let mut counts = LetterCounts::default();
        for letter in draw.letters() {
            counts.add(*letter);
        }
        counts
    }
}

fn ascii_index(letter: char) -> usize {
    (letter as u8 - b'a') as usize
}

/// Returns `true` iff `word` can be spelled from `available_letters`, where each available letter
/// may be used at most as many times as it occurs.
///
/// Word length is not checked here.
///
/// ```
/// use lucky_letters::can_form;
///
/// assert!(can_form("stone", "tonesa"));
/// assert!(!can_form("tents", "tonesa"));
/// ```
pub fn can_form(word: &str, available_letters: &str) -> bool {
    LetterCounts::new(available_letters).can_spell(word)
}


#[cfg(all(feature = "unstable", test))]
mod benches {

    extern crate test;

    use super::*;
    use test::Bencher;

    #[bench]
    fn bench_can_spell_by_counts(b: &mut Bencher) {
        let counts = LetterCounts::new("tonesa");

        b.iter(|| counts.can_spell("sonate") && !counts.can_spell("tonnes"));
    }

    #[bench]
    fn bench_can_form_from_str(b: &mut Bencher) {
        b.iter(|| can_form("sonate", "tonesa") && !can_form("tonnes", "tonesa"));
    }
}
