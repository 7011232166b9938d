//! Fetch gateway
//!
//! This module defines the contract the collector uses to retrieve pages, and
//! its HTTP implementation:
//! - Building HTTP clients with a proper user agent string
//! - GET requests returning a parsed [`Document`]
//! - Classifying failures into non-OK status and transport errors

use crate::collector::Document;
use crate::config::UserAgentConfig;
use reqwest::{Client, StatusCode};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Errors produced by a fetch gateway
///
/// Both kinds are treated identically by the collector: the requested URL is
/// considered to have no document.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("Unexpected status {status} for {url}")]
    NonOkStatus { url: String, status: u16 },

    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },
}

impl FetchError {
    /// The URL whose fetch failed
    pub fn url(&self) -> &str {
        match self {
            Self::NonOkStatus { url, .. } | Self::Transport { url, .. } => url,
        }
    }
}

/// A gateway that retrieves a URL and returns a parsed document
///
/// Implementations perform exactly one retrieval per call; timeouts and
/// retries, if any, belong to the implementation's transport.
pub trait Fetch {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Document, FetchError>>;
}

impl<F: Fetch> Fetch for &F {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Document, FetchError>> {
        (**self).fetch(url)
    }
}

/// Formats the user agent string: `Name/Version (+ContactURL; ContactEmail)`
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    match &config.contact_email {
        Some(email) => format!(
            "{}/{} (+{}; {})",
            config.crawler_name, config.crawler_version, config.contact_url, email
        ),
        None => format!(
            "{}/{} (+{})",
            config.crawler_name, config.crawler_version, config.contact_url
        ),
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use sumi_sieve::config::UserAgentConfig;
/// use sumi_sieve::collector::build_http_client;
///
/// let config = UserAgentConfig {
///     crawler_name: "SumiSieve".to_string(),
///     crawler_version: "0.1".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: None,
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent_string(config))
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetch gateway backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a client built from the user agent config
    pub fn new(config: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(config)?))
    }

    /// Wraps an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Fetch for HttpFetcher {
    /// Fetches a URL and parses the body
    ///
    /// # Error Classification
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | Status other than 200 | `NonOkStatus` |
    /// | Timeout, connect or TLS failure | `Transport` |
    /// | Body could not be read | `Transport` |
    async fn fetch(&self, url: &str) -> Result<Document, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(url, &e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::NonOkStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| transport_error(url, &e))?;

        Ok(Document::parse(url, body))
    }
}

fn transport_error(url: &str, error: &reqwest::Error) -> FetchError {
    let message = if error.is_timeout() {
        "Request timeout".to_string()
    } else if error.is_connect() {
        "Connection refused".to_string()
    } else {
        error.to_string()
    };

    FetchError::Transport {
        url: url.to_string(),
        message,
    }
}
