//! Loads remote pages into parsed documents.

use std::sync::Arc;

use crate::document::{Document, SelectorCache};
use crate::fetcher::{PageFetcher, PageRequest};
use crate::Result;

/// Fetches pages and parses them against one shared selector cache.
#[derive(Clone)]
pub struct DocumentLoader {
    fetcher: Arc<dyn PageFetcher>,
    selectors: Arc<SelectorCache>,
}

impl DocumentLoader {
    /// Creates a loader with a fresh selector cache.
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            selectors: Arc::new(SelectorCache::new()),
        }
    }

    /// Creates a loader that shares an existing selector cache.
    pub fn with_selectors(fetcher: Arc<dyn PageFetcher>, selectors: Arc<SelectorCache>) -> Self {
        Self { fetcher, selectors }
    }

    /// The selector cache used for every loaded document.
    pub fn selectors(&self) -> &Arc<SelectorCache> {
        &self.selectors
    }

    /// Fetches `request` and parses the body.
    pub async fn load(&self, request: &PageRequest) -> Result<Document> {
        let body = self.fetcher.fetch(request).await?;
        Document::parse(&body, Arc::clone(&self.selectors))
    }
}
