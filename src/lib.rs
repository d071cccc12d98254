//! Ripple-Count: a concurrent word-frequency crawler
//!
//! This crate crawls outward from a set of seed URLs, following links up to a
//! bounded depth within a bounded wall-clock budget, and reports the most
//! popular words seen across every visited page together with the number of
//! distinct pages visited.
//!
//! The traversal engine lives in [`crawler`]. Fetching, configuration, result
//! output and profiling are separate modules that plug into it through the
//! [`fetcher::PageFetcher`] trait, the [`crawler::CrawlerSettings`] value and
//! the [`crawler::CrawlResult`] value.

pub mod config;
pub mod crawler;
pub mod fetcher;
pub mod output;
pub mod pattern;
pub mod profiler;
pub mod state;

use thiserror::Error;

/// Error type for the CLI crawl path: client setup, configuration and output
#[derive(Debug, Error)]
pub enum RippleError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// Result type alias for Ripple-Count operations
pub type Result<T> = std::result::Result<T, RippleError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlEngine, CrawlResult, CrawlerSettings};
pub use fetcher::{FetchError, PageFetcher, ParsedPage};
