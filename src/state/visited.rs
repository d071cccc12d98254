/// Visited-URL registry shared by all crawl tasks
///
/// A URL is claimed exactly once per crawl. The claim is the only
/// synchronization point that keeps two tasks from visiting the same page.
use dashmap::DashSet;

/// Concurrent set of URLs that have been claimed for visiting
#[derive(Debug, Default)]
pub struct VisitedRegistry {
    urls: DashSet<String>,
}

impl VisitedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `url` for the calling task
    ///
    /// Test-and-insert happens under a single shard lock, so when several
    /// tasks race on the same URL exactly one of them gets `true`.
    ///
    /// # Returns
    ///
    /// * `true` - The URL was absent and is now claimed by the caller
    /// * `false` - Another task already claimed it
    pub fn claim(&self, url: &str) -> bool {
        if self.urls.contains(url) {
            return false;
        }
        self.urls.insert(url.to_string())
    }

    /// Number of distinct URLs claimed so far
    ///
    /// May be called while other tasks are still claiming; the value then
    /// reflects some point during the crawl rather than the final count.
    pub fn size(&self) -> usize {
        self.urls.len()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }
}
