//! Query engines, one per upstream lookup.

pub mod anagrams;
pub mod find_words;
pub mod synonyms;

pub use anagrams::AnagramEngine;
pub use find_words::{FindWordsEngine, PAGE_SIZE};
pub use synonyms::SynonymEngine;
