//! HTTP-based page fetcher using reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::fetcher::{Method, PageFetcher, PageRequest};
use crate::{ClientConfig, CrosswordError, Result};

/// A page fetcher that issues plain HTTP requests via reqwest.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a new `HttpFetcher` from client settings.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client })
    }

    /// Creates an `HttpFetcher` with a custom reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, request: &PageRequest) -> Result<Vec<u8>> {
        let url = request.full_url()?;
        debug!(method = request.method.as_str(), %url, "fetching page");

        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self
                .client
                .post(&url)
                .header(
                    reqwest::header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(request.form_body()),
        };
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrosswordError::Upstream {
                method: request.method.as_str(),
                url,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        debug!(%url, bytes = body.len(), "page fetched");
        Ok(body.to_vec())
    }
}
