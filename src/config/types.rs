use crate::crawler::CrawlerSettings;
use crate::pattern::PatternSet;
use crate::ConfigError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure for Ripple-Count
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Seed URLs the crawl starts from
    #[serde(rename = "start-pages", default)]
    pub start_pages: Vec<String>,

    /// Regular expressions; URLs fully matching any of them are never visited
    #[serde(rename = "ignored-urls", default)]
    pub ignored_urls: Vec<String>,

    /// Regular expressions; words fully matching any of them are not counted
    #[serde(rename = "ignored-words", default)]
    pub ignored_words: Vec<String>,

    /// Requested number of concurrent page fetches
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,

    /// Maximum number of pages along any link path, seed included
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Wall-clock budget after which no new page visits start
    #[serde(rename = "timeout-seconds")]
    pub timeout_seconds: u64,

    /// Number of top-ranked words reported
    #[serde(rename = "popular-word-count")]
    pub popular_word_count: usize,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url", default)]
    pub contact_url: Option<String>,
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// File the JSON crawl result is appended to; stdout when unset or empty
    #[serde(rename = "result-path", default)]
    pub result_path: Option<String>,

    /// File the profiling report is appended to; stdout when unset or empty
    #[serde(rename = "profile-output-path", default)]
    pub profile_output_path: Option<String>,
}

fn default_parallelism() -> usize {
    crate::crawler::max_parallelism()
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "RippleCount".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) if !contact.is_empty() => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            _ => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

impl OutputConfig {
    pub fn result_path(&self) -> Option<&Path> {
        non_empty_path(&self.result_path)
    }

    pub fn profile_output_path(&self) -> Option<&Path> {
        non_empty_path(&self.profile_output_path)
    }
}

fn non_empty_path(path: &Option<String>) -> Option<&Path> {
    path.as_deref().filter(|p| !p.is_empty()).map(Path::new)
}

impl Config {
    /// Resolves the crawler section into the engine's settings value
    pub fn crawler_settings(&self) -> CrawlerSettings {
        CrawlerSettings {
            timeout: Duration::from_secs(self.crawler.timeout_seconds),
            popular_word_count: self.crawler.popular_word_count,
            max_depth: self.crawler.max_depth,
            ignored_urls: self.crawler.ignored_urls.clone(),
            parallelism: self.crawler.parallelism,
        }
    }

    /// Compiles the ignored-word patterns for the page fetcher
    pub fn ignored_word_patterns(&self) -> Result<PatternSet, ConfigError> {
        PatternSet::compile(&self.crawler.ignored_words)
    }
}
