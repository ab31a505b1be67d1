//! Entry point bundling the three query engines.

use std::sync::Arc;

use crate::engines::{AnagramEngine, FindWordsEngine, SynonymEngine};
use crate::fetcher::PageFetcher;
use crate::fetcher_http::HttpFetcher;
use crate::loader::DocumentLoader;
use crate::{
    AnagramQuery, AnagramResult, ClientConfig, PatternQuery, PatternResult, Result, SynonymQuery,
    SynonymResult,
};

/// Crossword helper backed by the upstream word-reference sites.
///
/// Cloning is cheap; clones share the fetcher and selector cache.
#[derive(Clone)]
pub struct Crossie {
    synonyms: SynonymEngine,
    find_words: FindWordsEngine,
    anagrams: AnagramEngine,
}

impl Crossie {
    /// Creates an instance that talks to the real sites over HTTP.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self::with_fetcher(Arc::new(HttpFetcher::new(config)?)))
    }

    /// Creates an instance on top of a custom fetcher.
    pub fn with_fetcher(fetcher: Arc<dyn PageFetcher>) -> Self {
        let loader = DocumentLoader::new(fetcher);
        let synonyms = SynonymEngine::new(loader.clone());
        Self {
            find_words: FindWordsEngine::new(loader.clone(), synonyms.clone()),
            anagrams: AnagramEngine::new(loader),
            synonyms,
        }
    }

    /// Synonyms of a word, filtered and sorted per the query.
    pub async fn synonyms(&self, query: SynonymQuery) -> Result<SynonymResult> {
        self.synonyms.run(query).await
    }

    /// One page of words matching a frame.
    pub async fn find_words(&self, query: PatternQuery) -> Result<PatternResult> {
        self.find_words.run(query).await
    }

    /// Every page of words matching a frame, read in order.
    ///
    /// The auxiliary synonyms are looked up once for the whole drain; the
    /// returned result carries the last page's query and no next page.
    pub async fn find_all_words(&self, query: PatternQuery) -> Result<PatternResult> {
        self.find_words.run_all(query).await
    }

    /// Anagrams of a phrase, longest first.
    pub async fn anagrams(&self, query: AnagramQuery) -> Result<AnagramResult> {
        self.anagrams.run(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::find_words::page_request;
    use crate::engines::synonyms::synonyms_url;
    use crate::fetcher::mock::CannedFetcher;

    fn page(total: usize, words: &[&str]) -> String {
        let items: String = words
            .iter()
            .map(|w| format!(r#"<li class="word"><a><span>{w}</span></a></li>"#))
            .collect();
        format!(
            r#"<div class="word-criteria-heading">There are {total} words</div>
            <div class="word-results"><ul>{items}</ul></div>"#
        )
    }

    fn url(frame: &str, page: u32) -> String {
        page_request(frame, page).full_url().unwrap()
    }

    #[test]
    fn test_crossie_new() {
        assert!(Crossie::new(&ClientConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_find_all_words_drains_pages() {
        let first: Vec<String> = (0..250).map(|i| format!("w{i}")).collect();
        let first: Vec<&str> = first.iter().map(String::as_str).collect();
        let fetcher = CannedFetcher::new()
            .with_page(&url("c.t", 1), &page(252, &first))
            .with_page(&url("c.t", 2), &page(252, &["cat", "cot"]))
            .with_page(
                &synonyms_url("bed"),
                r#"<div class="relatedwords"><div class="wb">cot</div></div>"#,
            );
        let crossie = Crossie::with_fetcher(Arc::new(fetcher));
        let query = PatternQuery::new("c.t").with_synonyms(vec!["bed".to_string()]);
        let result = crossie.find_all_words(query).await.unwrap();
        assert_eq!(result.words.len(), 252);
        assert_eq!(result.words.last().map(String::as_str), Some("cot"));
        assert_eq!(result.synonym_matches, vec!["cot"]);
        assert_eq!(result.next_page, None);
        assert_eq!(result.query.page, 2);
    }

    #[tokio::test]
    async fn test_find_all_words_fetches_synonyms_once() {
        let first: Vec<String> = (0..250).map(|i| format!("a{i}")).collect();
        let second: Vec<String> = (0..250).map(|i| format!("b{i}")).collect();
        let first: Vec<&str> = first.iter().map(String::as_str).collect();
        let second: Vec<&str> = second.iter().map(String::as_str).collect();
        let fetcher = Arc::new(
            CannedFetcher::new()
                .with_page(&url("c.t", 1), &page(501, &first))
                .with_page(&url("c.t", 2), &page(501, &second))
                .with_page(&url("c.t", 3), &page(501, &["cot"]))
                .with_page(
                    &synonyms_url("bed"),
                    r#"<div class="relatedwords"><div class="wb">cot</div></div>"#,
                ),
        );
        let crossie = Crossie::with_fetcher(fetcher.clone());
        let query = PatternQuery::new("c.t").with_synonyms(vec!["bed".to_string()]);
        let result = crossie.find_all_words(query).await.unwrap();

        assert_eq!(result.words.len(), 501);
        assert_eq!(result.synonym_matches, vec!["cot"]);
        let requests = fetcher.requests();
        let synonym_fetches = requests
            .iter()
            .filter(|r| r.url.starts_with("https://wordhippo.com/"))
            .count();
        assert_eq!(synonym_fetches, 1);
        assert_eq!(requests.len(), 4);
    }

    #[tokio::test]
    async fn test_clones_share_fetcher() {
        let fetcher = Arc::new(CannedFetcher::new().with_page(
            &synonyms_url("bed"),
            r#"<div class="relatedwords"><div class="wb">cot</div></div>"#,
        ));
        let crossie = Crossie::with_fetcher(fetcher.clone());
        let other = crossie.clone();
        crossie.synonyms(SynonymQuery::new("bed")).await.unwrap();
        other.synonyms(SynonymQuery::new("bed")).await.unwrap();
        assert_eq!(fetcher.requests().len(), 2);
    }
}
