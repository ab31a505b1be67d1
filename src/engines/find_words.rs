//! Word lookups by letter pattern, scraped from thewordfinder.
//!
//! A frame such as `CR.SS` names known letters and `.` wildcards. Results
//! come one page at a time; the caller follows `next_page` to read more.
//! When auxiliary synonym words are given they are resolved concurrently
//! with the page fetch, and page words that are also synonyms are reported
//! as synonym matches.

use std::collections::HashSet;
use std::sync::LazyLock;

use futures::future::join_all;
use regex::Regex;
use tracing::debug;

use crate::document::Document;
use crate::engines::SynonymEngine;
use crate::fetcher::PageRequest;
use crate::loader::DocumentLoader;
use crate::{CrosswordError, PatternQuery, PatternResult, Result, SynonymQuery};

const BASE_URL: &str = "https://www.thewordfinder.com/wordlist/at-position-";

/// Results per upstream page.
pub const PAGE_SIZE: usize = 250;

const WORD_COUNT_SELECTOR: &str = "div.word-criteria-heading";
const WORD_SELECTOR: &str = "div.word-results li.word a > span:first-child";

static TOTAL_WORDS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"There\s+are\s+(\d+)\s+").unwrap());

/// Trailing score annotation such as `(12)`.
static SCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[(].*").unwrap());

/// Builds the request for one page of a (validated) frame.
pub fn page_request(frame: &str, page: u32) -> PageRequest {
    let position = frame.replace('.', "_");
    PageRequest::get(format!("{BASE_URL}{position}/"))
        .with_param("dir", "ascending")
        .with_param("field", "word")
        .with_param("pg", page.to_string())
        .with_param("size", frame.len().to_string())
}

/// Computes the page after `page`, or fails if `page` is past the end.
pub fn next_page(page: u32, total_words: usize) -> Result<Option<u32>> {
    let page_index = page.saturating_sub(1) as usize;
    if page_index * PAGE_SIZE >= total_words {
        return Err(CrosswordError::Pagination { page, total_words });
    }
    if page as usize * PAGE_SIZE >= total_words {
        Ok(None)
    } else {
        Ok(Some(page + 1))
    }
}

/// One parsed result page.
#[derive(Debug, Clone, PartialEq, Eq)]
struct WordPage {
    words: Vec<String>,
    next_page: Option<u32>,
    total_words: usize,
}

/// Finds words matching a frame.
#[derive(Clone)]
pub struct FindWordsEngine {
    loader: DocumentLoader,
    synonyms: SynonymEngine,
}

impl FindWordsEngine {
    pub fn new(loader: DocumentLoader, synonyms: SynonymEngine) -> Self {
        Self { loader, synonyms }
    }

    /// Reads the query's page and cross-checks it against the synonyms
    /// of the auxiliary words.
    ///
    /// Both branches always run to completion. Any failure fails the
    /// whole query; a page error is reported ahead of a synonym error.
    pub async fn run(&self, mut query: PatternQuery) -> Result<PatternResult> {
        query.validate()?;

        let (page, synonyms) = tokio::join!(
            self.read_page(&query.frame, query.page),
            self.resolve_synonyms(&query.synonyms)
        );
        let page = page?;
        let synonyms = synonyms?;

        Ok(PatternResult {
            synonym_matches: synonym_matches(&page.words, &synonyms),
            query,
            words: page.words,
            next_page: page.next_page,
            total_words: page.total_words,
        })
    }

    /// Reads every page from the query's page onwards.
    ///
    /// The auxiliary synonyms are looked up once, alongside the first page;
    /// later pages only fetch words. The result carries the last page read
    /// and no next page.
    pub async fn run_all(&self, mut query: PatternQuery) -> Result<PatternResult> {
        query.validate()?;

        let (page, synonyms) = tokio::join!(
            self.read_page(&query.frame, query.page),
            self.resolve_synonyms(&query.synonyms)
        );
        let mut page = page?;
        let synonyms = synonyms?;

        let mut words = std::mem::take(&mut page.words);
        while let Some(next) = page.next_page {
            debug!(frame = %query.frame, page = next, "reading next page");
            page = self.read_page(&query.frame, next).await?;
            words.append(&mut page.words);
            query.page = next;
        }

        Ok(PatternResult {
            synonym_matches: synonym_matches(&words, &synonyms),
            query,
            words,
            next_page: None,
            total_words: page.total_words,
        })
    }

    async fn read_page(&self, frame: &str, page: u32) -> Result<WordPage> {
        let request = page_request(frame, page);
        let doc = self.loader.load(&request).await?;
        let parsed = parse_page(&doc, page)?;
        debug!(
            frame,
            page,
            count = parsed.words.len(),
            total = parsed.total_words,
            "word page read"
        );
        Ok(parsed)
    }

    /// Union of the synonym sets of every word, looked up concurrently.
    async fn resolve_synonyms(&self, words: &[String]) -> Result<HashSet<String>> {
        let lookups = words
            .iter()
            .map(|word| self.synonyms.run(SynonymQuery::new(word.as_str())));
        let mut union = HashSet::new();
        for result in join_all(lookups).await {
            union.extend(result?.entries.into_iter().map(|e| e.synonym));
        }
        Ok(union)
    }
}

/// Words that also appear in the synonym set, in word order.
fn synonym_matches(words: &[String], synonyms: &HashSet<String>) -> Vec<String> {
    words
        .iter()
        .filter(|w| synonyms.contains(w.as_str()))
        .cloned()
        .collect()
}

fn parse_page(doc: &Document, page: u32) -> Result<WordPage> {
    let heading = doc.find(WORD_COUNT_SELECTOR)?.ok_or_else(|| {
        CrosswordError::Parse("word count heading not found on results page".into())
    })?;
    let heading_text = heading.inner_text();
    let total_words = TOTAL_WORDS_RE
        .captures(&heading_text)
        .and_then(|c| c[1].parse::<usize>().ok())
        .ok_or_else(|| {
            CrosswordError::Parse(format!("could not find word count in {heading_text:?}"))
        })?;

    let words = doc
        .find_all(WORD_SELECTOR)?
        .iter()
        .map(|node| clean_word(&node.inner_text()))
        .collect();

    Ok(WordPage {
        words,
        next_page: next_page(page, total_words)?,
        total_words,
    })
}

/// Removes embedded spaces and any score suffix, then lower-cases.
fn clean_word(text: &str) -> String {
    let compact = text.replace(' ', "");
    SCORE_RE.replace(&compact, "").to_lowercase()
}
