//! Synonym lookups scraped from wordhippo.

use std::collections::HashSet;

use regex::Regex;
use tracing::debug;

use crate::document::Document;
use crate::fetcher::PageRequest;
use crate::loader::DocumentLoader;
use crate::{
    CrosswordError, Result, SortOrder, SynonymEntry, SynonymQuery, SynonymResult,
};

const BASE_URL: &str = "https://wordhippo.com/what-is/another-word-for";

/// One related-word block; an `id` attribute marks a "more..." entry.
const RELATED_WORD_SELECTOR: &str = "div.relatedwords > div.wb";

/// Builds the wordhippo page URL for a (normalized) word.
pub fn synonyms_url(word: &str) -> String {
    format!("{}/{}.html", BASE_URL, urlencoding::encode(word))
}

/// Finds synonyms for a word, filtered and sorted per the query.
#[derive(Clone)]
pub struct SynonymEngine {
    loader: DocumentLoader,
}

impl SynonymEngine {
    pub fn new(loader: DocumentLoader) -> Self {
        Self { loader }
    }

    pub async fn run(&self, mut query: SynonymQuery) -> Result<SynonymResult> {
        query.normalize();
        if query.word.is_empty() {
            return Err(CrosswordError::InvalidInput("no word specified".into()));
        }
        let filter = SynonymFilter::new(&query)?;

        let request = PageRequest::get(synonyms_url(&query.word));
        let doc = self.loader.load(&request).await?;
        let mut entries = extract_entries(&doc, &filter)?;
        if entries.is_empty() {
            return Err(CrosswordError::NoResults(format!(
                "no synonyms for word {:?} that match the supplied filters ({})",
                query.word,
                describe_filters(&query)
            )));
        }
        sort_entries(&mut entries, query.sort);
        debug!(word = %query.word, count = entries.len(), "synonyms found");

        Ok(SynonymResult { query, entries })
    }
}

/// Inclusion rules for a normalized query.
struct SynonymFilter<'q> {
    query: &'q SynonymQuery,
    pattern: Option<Regex>,
}

impl<'q> SynonymFilter<'q> {
    fn new(query: &'q SynonymQuery) -> Result<Self> {
        let pattern = query
            .pattern
            .as_deref()
            .map(Regex::new)
            .transpose()
            .map_err(|e| CrosswordError::Configuration(format!("bad regex: {e}")))?;
        Ok(Self { query, pattern })
    }

    fn includes(&self, synonym: &str, extended: bool) -> bool {
        let q = self.query;
        let letters = synonym.chars().count();
        if extended && !q.all {
            return false;
        }
        if q.min_letters.is_some_and(|min| letters < min) {
            return false;
        }
        if q.max_letters.is_some_and(|max| letters > max) {
            return false;
        }
        if q.starts_with.as_deref().is_some_and(|p| !synonym.starts_with(p)) {
            return false;
        }
        if q.ends_with.as_deref().is_some_and(|s| !synonym.ends_with(s)) {
            return false;
        }
        if self.pattern.as_ref().is_some_and(|re| !re.is_match(synonym)) {
            return false;
        }
        true
    }
}

/// Walks the related-word blocks in page order, keeping the first
/// occurrence of each included synonym.
fn extract_entries(doc: &Document, filter: &SynonymFilter<'_>) -> Result<Vec<SynonymEntry>> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    for (index, node) in doc.find_all(RELATED_WORD_SELECTOR)?.iter().enumerate() {
        let extended = !node.attribute_value("id").is_empty();
        let synonym = node.inner_text().to_lowercase();
        if synonym.is_empty() || !filter.includes(&synonym, extended) {
            continue;
        }
        let position = index as u32 + 1;
        if seen.insert(synonym.clone()) {
            entries.push(if extended {
                SynonymEntry::extended(synonym, position)
            } else {
                SynonymEntry::new(synonym, position)
            });
        }
    }
    Ok(entries)
}

/// Human-readable list of the filters a query applied.
fn describe_filters(query: &SynonymQuery) -> String {
    let mut parts = Vec::new();
    if let Some(prefix) = &query.starts_with {
        parts.push(format!("starts with {prefix:?}"));
    }
    if let Some(suffix) = &query.ends_with {
        parts.push(format!("ends with {suffix:?}"));
    }
    if let Some(pattern) = &query.pattern {
        parts.push(format!("pattern {pattern:?}"));
    }
    if let Some(min) = query.min_letters {
        parts.push(format!("min letters {min}"));
    }
    if let Some(max) = query.max_letters {
        parts.push(format!("max letters {max}"));
    }
    if !query.all {
        parts.push("primary only".to_string());
    }
    if parts.is_empty() {
        return "none".to_string();
    }
    parts.join(", ")
}

fn sort_entries(entries: &mut [SynonymEntry], sort: SortOrder) {
    match sort {
        SortOrder::Alpha => entries.sort_by_key(|e| e.synonym.to_lowercase()),
        SortOrder::Display => entries.sort_by_key(|e| e.priority),
    }
}
