//! Configuration module for Ripple-Count
//!
//! This module handles loading, parsing, and validating TOML configuration files,
//! and resolving them into the [`CrawlerSettings`](crate::crawler::CrawlerSettings)
//! value the crawl engine is built from.
//!
//! # Example
//!
//! ```no_run
//! use ripple_count::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
