//! Error types for crossword queries.

use thiserror::Error;

/// Result type alias for crossword operations.
pub type Result<T> = std::result::Result<T, CrosswordError>;

/// Errors that can occur while answering a query.
#[derive(Error, Debug)]
pub enum CrosswordError {
    /// Caller-supplied input failed validation.
    #[error("{0}")]
    InvalidInput(String),

    /// A caller-supplied setting could not be used (e.g. a bad regex).
    #[error("{0}")]
    Configuration(String),

    /// The upstream site answered with a non-2xx status.
    #[error("{method} {url} returned status {status}")]
    Upstream {
        method: &'static str,
        url: String,
        status: u16,
    },

    /// Network-level failure talking to the upstream site.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A valid query produced nothing after filtering.
    #[error("{0}")]
    NoResults(String),

    /// The requested page lies past the last page of results.
    #[error("read past last page: page {page} requested but only {total_words} words exist")]
    Pagination { page: u32, total_words: usize },

    /// The page did not have the expected shape, or could not be decoded.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// A selector literal could not be compiled.
    #[error("invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },

    /// URL parsing error.
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),
}

impl CrosswordError {
    /// Returns true if the error was caused by bad caller input.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::Configuration(_))
    }

    /// HTTP status code used when reporting this error over the API.
    pub fn status_code(&self) -> u16 {
        if self.is_input_error() {
            400
        } else {
            500
        }
    }
}
