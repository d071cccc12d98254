//! HTTP fetcher implementation
//!
//! This module handles all page requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests to fetch page content
//! - Reading `file://` URLs from local disk
//! - Error classification

use crate::config::UserAgentConfig;
use crate::fetcher::parser::parse_page;
use crate::fetcher::{FetchError, PageFetcher, ParsedPage};
use crate::pattern::PatternSet;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use ripple_count::config::UserAgentConfig;
/// use ripple_count::fetcher::build_http_client;
///
/// let config = UserAgentConfig {
///     crawler_name: "RippleCount".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: Some("https://example.com/about".to_string()),
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Page fetcher backed by a reqwest client
///
/// `http` and `https` URLs are fetched over the network; `file` URLs are read
/// from the local filesystem, which makes offline crawls of saved sites
/// possible.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: Client,
    ignored_words: PatternSet,
}

impl HttpPageFetcher {
    /// Creates a fetcher using `client` for network requests
    ///
    /// # Arguments
    ///
    /// * `client` - The HTTP client to use
    /// * `ignored_words` - Words fully matching any of these are dropped
    pub fn new(client: Client, ignored_words: PatternSet) -> Self {
        Self {
            client,
            ignored_words,
        }
    }

    async fn fetch_http(&self, url: &Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // A missing Content-Type is given the benefit of the doubt
        if let Some(content_type) = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !is_html(content_type) {
                return Err(FetchError::NotHtml {
                    url: url.to_string(),
                    content_type: content_type.to_string(),
                });
            }
        }

        response.text().await.map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })
    }

    async fn fetch_file(&self, url: &Url) -> Result<String, FetchError> {
        let path = url
            .to_file_path()
            .map_err(|_| FetchError::UnsupportedScheme {
                url: url.to_string(),
            })?;

        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| FetchError::Io {
                url: url.to_string(),
                source,
            })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<ParsedPage, FetchError> {
        let parsed_url = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let body = match parsed_url.scheme() {
            "http" | "https" => self.fetch_http(&parsed_url).await?,
            "file" => self.fetch_file(&parsed_url).await?,
            _ => {
                return Err(FetchError::UnsupportedScheme {
                    url: url.to_string(),
                })
            }
        };

        Ok(parse_page(&body, &parsed_url, &self.ignored_words))
    }
}

fn is_html(content_type: &str) -> bool {
    let lower = content_type.to_ascii_lowercase();
    lower.contains("text/html") || lower.contains("application/xhtml+xml")
}
