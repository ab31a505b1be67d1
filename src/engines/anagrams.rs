//! Anagram solving via thewordfinder's anagram solver.

use tracing::debug;

use crate::document::Document;
use crate::fetcher::PageRequest;
use crate::loader::DocumentLoader;
use crate::{AnagramQuery, AnagramResult, CrosswordError, Result};

const SOLVER_URL: &str = "https://www.thewordfinder.com/anagram-solver/";
const RESULT_SELECTOR: &str = "p.result a";

/// Builds the solver form POST for a normalized phrase.
pub fn solver_request(letters: &str) -> PageRequest {
    PageRequest::post(SOLVER_URL)
        .with_param("letters", letters)
        .with_param("extra", "")
        .with_param("pos", "beg")
        .with_param("dict", "wwf")
        .with_param("dic", "1")
        .with_param("order", "length")
}

/// Finds anagrams of a phrase.
#[derive(Clone)]
pub struct AnagramEngine {
    loader: DocumentLoader,
}

impl AnagramEngine {
    pub fn new(loader: DocumentLoader) -> Self {
        Self { loader }
    }

    pub async fn run(&self, mut query: AnagramQuery) -> Result<AnagramResult> {
        query.normalize()?;

        let doc = self.loader.load(&solver_request(&query.phrase)).await?;
        let mut phrases = collect_candidates(&doc, &query)?;
        if phrases.is_empty() {
            return Err(CrosswordError::NoResults(format!(
                "no anagrams found for {:?}",
                query.phrase
            )));
        }
        phrases.sort_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        });
        debug!(phrase = %query.phrase, count = phrases.len(), "anagrams found");

        Ok(AnagramResult { phrases })
    }
}

/// Reads candidates in page order. The solver lists longer results first,
/// so the first too-short candidate ends the scan.
fn collect_candidates(doc: &Document, query: &AnagramQuery) -> Result<Vec<String>> {
    let target = query.phrase.chars().count();
    let mut phrases = Vec::new();
    for node in doc.find_all(RESULT_SELECTOR)? {
        let text = node.inner_text();
        if !query.partial && text.chars().count() < target {
            break;
        }
        if text.to_lowercase() == query.phrase.to_lowercase() {
            continue;
        }
        phrases.push(text);
    }
    Ok(phrases)
}
