use std::time::Duration;

/// Fully resolved crawler settings, supplied once at engine construction
///
/// Usually produced by [`Config::crawler_settings`](crate::config::Config::crawler_settings).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlerSettings {
    /// Wall-clock budget measured from the start of each crawl
    pub timeout: Duration,

    /// Number of top-ranked words kept in the result
    pub popular_word_count: usize,

    /// Maximum number of pages along any link path, seed included
    pub max_depth: u32,

    /// Regular expressions; a URL fully matching any of them is never visited
    pub ignored_urls: Vec<String>,

    /// Requested concurrency, clamped to the hardware parallelism
    pub parallelism: usize,
}
