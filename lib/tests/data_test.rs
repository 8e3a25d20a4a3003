#[macro_use]
extern crate assert_matches;

use lucky_letters::*;

use std::fs::File;
use std::io;
use std::io::Cursor;
use std::result::Result;
use std::sync::Arc;

macro_rules! assert_arc_eq {
    ($arc_vec:expr, $non_arc_vec:expr) => {
        assert_eq!(
            $arc_vec as &[Arc<str>],
            $non_arc_vec
                .iter()
                .map(|thing| Arc::<str>::from(*thing))
                .collect::<Vec<Arc<str>>>()
        );
    };
}

#[test]
fn word_bank_from_reader_succeeds() -> Result<(), LuckyLettersError> {
    let mut cursor = Cursor::new(String::from("\n\nstone\n Notes\nstone \n"));

    let word_bank = WordBank::from_reader(&mut cursor)?;

    assert_eq!(word_bank.len(), 2);
    assert_arc_eq!(&word_bank, &["stone", "notes"]);
    Ok(())
}

#[test]
fn word_bank_from_iterator_succeeds() -> Result<(), LuckyLettersError> {
    let word_bank = WordBank::from_iterator(vec!["", "stone", "Notes "])?;

    assert_eq!(word_bank.len(), 2);
    assert_arc_eq!(&word_bank, &["stone", "notes"]);
    Ok(())
}

#[test]
fn word_bank_from_string_iterator_succeeds() -> Result<(), LuckyLettersError> {
    let word_bank = WordBank::from_iterator(vec![
        "".to_string(),
        "stone".to_string(),
        "Notes ".to_string(),
    ])?;

    assert_arc_eq!(word_bank.words(), &["stone", "notes"]);
    Ok(())
}

#[test]
fn word_bank_from_blank_reader_fails() {
    let mut cursor = Cursor::new(String::from("\n  \n\t\n"));

    assert_matches!(
        WordBank::from_reader(&mut cursor),
        Err(LuckyLettersError::EmptyWordSource)
    );
}

#[test]
fn word_bank_from_sample_file() -> Result<(), LuckyLettersError> {
    let words_reader = io::BufReader::new(File::open("../data/sample-words.txt")?);

    let bank = WordBank::from_reader(words_reader)?;

    assert_eq!(bank.len(), 141);
    assert_eq!(&*bank[0], "stone");
    Ok(())
}

#[test]
fn word_bank_builder_merges_files_and_words() -> Result<(), LuckyLettersError> {
    let bank = WordBankBuilder::new()
        .add_file("../data/sample-words.txt")
        .add_file("../data/missing-words.txt")
        .add_words(["STONE", "zebras"])
        .build()?;

    assert_eq!(bank.len(), 142);
    assert_eq!(&*bank[141], "zebras");
    Ok(())
}

#[test]
fn missing_file_is_an_io_error() {
    let error: LuckyLettersError = File::open("../data/missing-words.txt").unwrap_err().into();

    assert_matches!(error, LuckyLettersError::Io(_));
}
