//! Result types returned by the query engines.

use serde::{Serialize, Serializer};

use crate::{PatternQuery, SynonymQuery};

/// Priority offset applied to synonyms hidden behind the "more" disclosure.
pub const EXTENDED_PRIORITY_OFFSET: u32 = 10_000;

/// A single synonym with its display rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynonymEntry {
    pub synonym: String,
    /// Position on the source page, 1-based; extended entries are offset
    /// by [`EXTENDED_PRIORITY_OFFSET`].
    pub priority: u32,
    #[serde(skip)]
    extended: bool,
}

impl SynonymEntry {
    /// An entry from the primary section at 1-based page `position`.
    pub fn new(synonym: impl Into<String>, position: u32) -> Self {
        Self {
            synonym: synonym.into(),
            priority: position,
            extended: false,
        }
    }

    /// An entry from the extended section at 1-based page `position`;
    /// its priority is offset so it ranks after every primary entry.
    pub fn extended(synonym: impl Into<String>, position: u32) -> Self {
        Self {
            synonym: synonym.into(),
            priority: position.saturating_add(EXTENDED_PRIORITY_OFFSET),
            extended: true,
        }
    }

    /// Whether the entry came from the extended section of the page.
    pub fn is_extended(&self) -> bool {
        self.extended
    }
}

/// Synonyms found for a query, in the requested order.
#[derive(Debug, Clone, Serialize)]
pub struct SynonymResult {
    pub query: SynonymQuery,
    pub entries: Vec<SynonymEntry>,
}

impl SynonymResult {
    /// The synonyms alone, in result order.
    pub fn synonyms(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.synonym.as_str())
    }
}

/// One page of words matching a frame.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternResult {
    pub query: PatternQuery,
    /// Words on this page that are also synonyms of the auxiliary words.
    pub synonym_matches: Vec<String>,
    pub words: Vec<String>,
    /// Next page to request; serialized as `0` when this is the last page.
    #[serde(serialize_with = "serialize_next_page")]
    pub next_page: Option<u32>,
    pub total_words: usize,
}

fn serialize_next_page<S: Serializer>(page: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u32(page.unwrap_or(0))
}

/// Anagrams found for a phrase, longest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnagramResult {
    pub phrases: Vec<String>,
}
