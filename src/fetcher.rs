//! Page fetcher abstraction for retrieving raw page bodies.

use async_trait::async_trait;

use crate::Result;

/// HTTP method used to request a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Method {
    /// Parameters travel in the query string.
    #[default]
    Get,
    /// Parameters travel form-encoded in the request body.
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// A request for a single upstream page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub method: Method,
    pub url: String,
    pub params: Vec<(String, String)>,
}

impl PageRequest {
    /// A GET request with no parameters.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            params: Vec::new(),
        }
    }

    /// A form POST with no parameters yet.
    pub fn post(url: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            params: Vec::new(),
        }
    }

    /// Appends a parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// The URL that is actually requested: for GET this includes the
    /// encoded parameters, for POST it is the bare URL.
    pub fn full_url(&self) -> Result<String> {
        match self.method {
            Method::Get if !self.params.is_empty() => {
                let url = url::Url::parse_with_params(&self.url, &self.params)?;
                Ok(url.to_string())
            }
            _ => Ok(self.url.clone()),
        }
    }

    /// Form-encoded body for POST requests.
    pub fn form_body(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.params)
            .finish()
    }
}

/// Trait for fetching the body of an upstream page.
///
/// Implementations fail with `Upstream` on a non-2xx status and with
/// `Transport` on network errors. The body is returned fully read.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, request: &PageRequest) -> Result<Vec<u8>>;
}
