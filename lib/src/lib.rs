#![cfg_attr(feature = "unstable", feature(test))]

//! Finds "lucky" letter draws: random sets of six letters, weighted by English letter frequency,
//! that can spell many five and six letter words from a dictionary.
//!
//! ```
//! use lucky_letters::{search_draws, SearchConfig, SequenceSampler, WordBank};
//!
//! let bank = WordBank::from_iterator(["stone", "notes", "onset", "set"]).unwrap();
//! let mut sampler = SequenceSampler::from_keys(["TONESA"]).unwrap();
//! let config = SearchConfig::default().with_min_qualifying_matches(3);
//!
//! let results = search_draws(1, &bank, &mut sampler, &config).unwrap();
//! assert_eq!(results.get("TONESA").unwrap().len(), 3);
//! ```

mod data;
mod filter;
mod letters;
mod matcher;
mod results;
mod search;

pub use data::normalize_word;
pub use data::WordBank;
pub use data::WordBankBuilder;
pub use data::WordSource;
pub use filter::*;
pub use letters::*;
pub use matcher::*;
pub use results::*;
pub use search::*;
