//! Page fetching for the crawler
//!
//! The crawl engine never talks to the network itself. It asks a
//! [`PageFetcher`] for the words and outbound links of a URL and treats any
//! [`FetchError`] as a page that contributed nothing.
//!
//! This module provides:
//! - The `PageFetcher` trait and its `ParsedPage` output
//! - `HttpPageFetcher`, which fetches `http(s)://` and `file://` URLs
//! - HTML parsing into words and absolute links

mod http;
mod parser;

pub use http::{build_http_client, HttpPageFetcher};
pub use parser::{parse_page, sanitize_word};

use async_trait::async_trait;
use thiserror::Error;

/// Words and outbound links extracted from one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// Every word occurrence on the page, repeats included
    pub words: Vec<String>,

    /// Outbound links, in document order
    pub links: Vec<String>,
}

/// Errors a fetcher can report for a single URL
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Expected HTML from {url}, got {content_type}")]
    NotHtml { url: String, content_type: String },

    #[error("Failed to read {url}: {source}")]
    Io { url: String, source: std::io::Error },

    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        source: ::url::ParseError,
    },

    #[error("Unsupported URL scheme in {url}")]
    UnsupportedScheme { url: String },
}

/// Source of page content for the crawl engine
///
/// Implementations are shared by every concurrent crawl task, so they must be
/// `Send + Sync` and own everything they need.
#[async_trait]
pub trait PageFetcher: Send + Sync + 'static {
    /// Fetches `url` and returns its words and outbound links
    async fn fetch(&self, url: &str) -> Result<ParsedPage, FetchError>;
}
