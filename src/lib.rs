//! # crossie
//!
//! Crossword-solving helpers built on third-party word-reference sites.
//!
//! Three lookups are provided:
//!
//! - Synonyms of a word, with length/prefix/suffix/regex filters
//! - Words matching a letter frame such as `CR.SS`, page by page, optionally
//!   cross-checked against the synonyms of up to two other words
//! - Anagrams of a phrase
//!
//! Each lookup fetches an upstream page, extracts results from its HTML and
//! applies filtering and ordering locally.
//!
//! ## Example
//!
//! ```rust,no_run
//! use crossie::{ClientConfig, Crossie, SortOrder, SynonymQuery};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let crossie = Crossie::new(&ClientConfig::default())?;
//!
//!     let query = SynonymQuery::new("happy")
//!         .with_starts_with("j")
//!         .with_sort(SortOrder::Alpha);
//!     for synonym in crossie.synonyms(query).await?.synonyms() {
//!         println!("{synonym}");
//!     }
//!     Ok(())
//! }
//! ```

mod config;
mod crossie;
mod error;
mod query;
mod result;

pub mod document;
pub mod engines;
pub mod fetcher;
pub mod fetcher_http;
pub mod loader;
pub mod server;

pub use config::ClientConfig;
pub use crossie::Crossie;
pub use error::{CrosswordError, Result};
pub use query::{AnagramQuery, PatternQuery, SortOrder, SynonymQuery, MAX_PATTERN_SYNONYMS};
pub use result::{
    AnagramResult, PatternResult, SynonymEntry, SynonymResult, EXTENDED_PRIORITY_OFFSET,
};
