use crate::pattern::PatternSet;
use std::time::{Duration, Instant};

/// Upper bound used when `start + timeout` does not fit in an `Instant`
const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Immutable limits for one crawl, shared read-only by every task
#[derive(Debug, Clone)]
pub struct CrawlBudget {
    deadline: Instant,
    max_depth: u32,
    ignored_urls: PatternSet,
    popular_word_count: usize,
}

impl CrawlBudget {
    /// Creates a budget whose deadline is `started + timeout`
    pub fn new(
        started: Instant,
        timeout: Duration,
        max_depth: u32,
        ignored_urls: PatternSet,
        popular_word_count: usize,
    ) -> Self {
        let deadline = started
            .checked_add(timeout)
            .or_else(|| started.checked_add(FAR_FUTURE))
            .unwrap_or(started);

        Self {
            deadline,
            max_depth,
            ignored_urls,
            popular_word_count,
        }
    }

    /// True once no new page visits may start
    pub fn deadline_passed(&self) -> bool {
        Instant::now() >= self.deadline
    }

    /// True if `url` fully matches one of the ignored-URL patterns
    pub fn is_ignored(&self, url: &str) -> bool {
        self.ignored_urls.matches(url)
    }

    /// Remaining depth every seed starts with
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn popular_word_count(&self) -> usize {
        self.popular_word_count
    }
}
