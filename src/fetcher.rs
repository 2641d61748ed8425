// src/fetcher.rs
use reqwest::{redirect, Client};
use std::time::Duration;
use tracing::debug;

use crate::config::FetchConfig;
use crate::errors::FetchError;

/// Sub-pages worth trying when the root page yields no candidate. Walking
/// them is the orchestrator's retry policy, not the fetcher's.
pub const FALLBACK_PATHS: &[&str] = &["/contact", "/contact-us", "/about"];

pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(config: &FetchConfig) -> Self {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .redirect(redirect::Policy::limited(config.max_redirects))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// One page, one request. No caching, no internal retries.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!("Fetching: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let html = response.text().await.map_err(map_transport_error)?;
        debug!("Fetched {} bytes from {}", html.len(), url);

        Ok(html)
    }
}

fn map_transport_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else if err.is_redirect() {
        FetchError::TooManyRedirects
    } else if err.is_builder() {
        FetchError::InvalidUrl(err.to_string())
    } else {
        FetchError::Connection(err.to_string())
    }
}
