//! Parsed HTML documents with selector queries and text extraction.
//!
//! A [`Document`] wraps a leniently parsed HTML tree. Queries use CSS
//! selectors compiled through a shared [`SelectorCache`], so each selector
//! literal is parsed once per process no matter how many documents use it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use scraper::{ElementRef, Html, Selector};

use crate::{CrosswordError, Result};

/// Compiled selectors keyed by their source text.
///
/// Retention is unbounded; the selector vocabulary is a handful of literals.
#[derive(Debug, Default)]
pub struct SelectorCache {
    compiled: Mutex<HashMap<String, Arc<Selector>>>,
}

impl SelectorCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the compiled selector, compiling and storing it on first use.
    pub fn get(&self, selector: &str) -> Result<Arc<Selector>> {
        let mut compiled = self
            .compiled
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(sel) = compiled.get(selector) {
            return Ok(Arc::clone(sel));
        }
        let sel = Selector::parse(selector).map_err(|e| CrosswordError::Selector {
            selector: selector.to_string(),
            reason: format!("{e:?}"),
        })?;
        let sel = Arc::new(sel);
        compiled.insert(selector.to_string(), Arc::clone(&sel));
        Ok(sel)
    }

    /// Number of distinct selectors compiled so far.
    pub fn len(&self) -> usize {
        self.compiled
            .lock()
            .map(|c| c.len())
            .unwrap_or_else(|poisoned| poisoned.into_inner().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Root of a parsed HTML tree.
pub struct Document {
    html: Html,
    selectors: Arc<SelectorCache>,
}

impl Document {
    /// Parses a document from raw bytes.
    ///
    /// Tag soup is accepted, and byte sequences that are not valid UTF-8
    /// decode to U+FFFD.
    pub fn parse(bytes: &[u8], selectors: Arc<SelectorCache>) -> Result<Self> {
        let text = String::from_utf8_lossy(bytes);
        Ok(Self {
            html: Html::parse_document(&text),
            selectors,
        })
    }

    /// The root element (`<html>`).
    pub fn root(&self) -> Node<'_> {
        Node {
            element: self.html.root_element(),
            selectors: &self.selectors,
        }
    }

    /// First node matching `selector` in document order.
    pub fn find(&self, selector: &str) -> Result<Option<Node<'_>>> {
        let sel = self.selectors.get(selector)?;
        Ok(self.html.select(&sel).next().map(|element| Node {
            element,
            selectors: &self.selectors,
        }))
    }

    /// All nodes matching `selector` in document order.
    pub fn find_all(&self, selector: &str) -> Result<Vec<Node<'_>>> {
        let sel = self.selectors.get(selector)?;
        Ok(self
            .html
            .select(&sel)
            .map(|element| Node {
                element,
                selectors: &self.selectors,
            })
            .collect())
    }
}

/// A child of an element: either another element or a run of text.
#[derive(Debug, Clone, Copy)]
pub enum Child<'a> {
    Element(Node<'a>),
    Text(&'a str),
}

/// An element within a [`Document`].
#[derive(Clone, Copy)]
pub struct Node<'a> {
    element: ElementRef<'a>,
    selectors: &'a SelectorCache,
}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node").field("tag", &self.tag()).finish()
    }
}

impl<'a> Node<'a> {
    /// Lower-case tag name.
    pub fn tag(&self) -> &'a str {
        self.element.value().name()
    }

    /// Attributes in source order.
    pub fn attributes(&self) -> Vec<(&'a str, &'a str)> {
        self.element.value().attrs().collect()
    }

    /// Value of the named attribute, or an empty string.
    pub fn attribute_value(&self, name: &str) -> &'a str {
        self.element.value().attr(name).unwrap_or_default()
    }

    /// Direct children; comments and other non-content nodes are skipped.
    pub fn children(&self) -> Vec<Child<'a>> {
        self.element
            .children()
            .filter_map(|child| {
                if let Some(element) = ElementRef::wrap(child) {
                    Some(Child::Element(Node {
                        element,
                        selectors: self.selectors,
                    }))
                } else {
                    child.value().as_text().map(|t| Child::Text(&t[..]))
                }
            })
            .collect()
    }

    /// Direct element children.
    pub fn element_children(&self) -> Vec<Node<'a>> {
        self.children()
            .into_iter()
            .filter_map(|c| match c {
                Child::Element(n) => Some(n),
                Child::Text(_) => None,
            })
            .collect()
    }

    /// First descendant matching `selector`.
    pub fn find(&self, selector: &str) -> Result<Option<Node<'a>>> {
        let sel = self.selectors.get(selector)?;
        Ok(self.element.select(&sel).next().map(|element| Node {
            element,
            selectors: self.selectors,
        }))
    }

    /// All descendants matching `selector`, in document order.
    pub fn find_all(&self, selector: &str) -> Result<Vec<Node<'a>>> {
        let sel = self.selectors.get(selector)?;
        Ok(self
            .element
            .select(&sel)
            .map(|element| Node {
                element,
                selectors: self.selectors,
            })
            .collect())
    }

    /// Concatenated descendant text.
    ///
    /// Each text node is preceded by a space so words in adjacent inline
    /// elements do not run together; the result is trimmed.
    pub fn inner_text(&self) -> String {
        let mut out = String::new();
        for node in self.element.descendants() {
            if let Some(text) = node.value().as_text() {
                out.push(' ');
                out.push_str(text);
            }
        }
        out.trim().to_string()
    }
}
