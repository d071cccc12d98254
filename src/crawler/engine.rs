//! Crawl engine - top-level orchestration
//!
//! This module ties a crawl together:
//! - Computing the per-crawl budget and deadline
//! - Creating the fresh visited registry and word tally
//! - Launching one task per seed and draining the whole task tree
//! - Ranking the final tally

use crate::crawler::budget::CrawlBudget;
use crate::crawler::ranking::rank;
use crate::crawler::result::CrawlResult;
use crate::crawler::settings::CrawlerSettings;
use crate::crawler::task::{join_all, CrawlContext, CrawlTask, FetchFailure};
use crate::fetcher::PageFetcher;
use crate::pattern::PatternSet;
use crate::state::{VisitedRegistry, WordTally};
use crate::ConfigError;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;

/// Number of hardware threads available to the process, at least 1
pub fn max_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Concurrent crawler that tallies words across linked pages
///
/// One engine can run any number of crawls; each [`crawl`](Self::crawl) call
/// starts from empty state and shares nothing with other calls except the
/// fetcher and the fetch concurrency limit.
pub struct CrawlEngine<F> {
    fetcher: Arc<F>,
    timeout: Duration,
    max_depth: u32,
    popular_word_count: usize,
    ignored_urls: PatternSet,
    parallelism: usize,
    permits: Arc<Semaphore>,
    failures: Option<mpsc::UnboundedSender<FetchFailure>>,
}

impl<F: PageFetcher> CrawlEngine<F> {
    /// Creates an engine from resolved settings
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Source of page words and links
    /// * `settings` - Timeout, depth, ignored URLs, popular-word count and
    ///   requested parallelism
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlEngine)` - Ready to crawl
    /// * `Err(ConfigError::InvalidPattern)` - An ignored-URL pattern is malformed
    pub fn new(fetcher: F, settings: CrawlerSettings) -> Result<Self, ConfigError> {
        let ignored_urls = PatternSet::compile(&settings.ignored_urls)?;
        let parallelism = settings.parallelism.clamp(1, max_parallelism());

        Ok(Self {
            fetcher: Arc::new(fetcher),
            timeout: settings.timeout,
            max_depth: settings.max_depth,
            popular_word_count: settings.popular_word_count,
            ignored_urls,
            parallelism,
            permits: Arc::new(Semaphore::new(parallelism)),
            failures: None,
        })
    }

    /// Reports every swallowed fetch error on `sender`
    ///
    /// Sending never blocks the crawl, and a dropped receiver is ignored.
    pub fn with_failure_reporter(mut self, sender: mpsc::UnboundedSender<FetchFailure>) -> Self {
        self.failures = Some(sender);
        self
    }

    /// Crawls outward from `seeds` and returns the ranked word counts
    ///
    /// Every seed is crawled concurrently with the configured maximum depth.
    /// Returns only once every task spawned by this call has finished. Fetch
    /// failures and the deadline never make this fail; the result simply
    /// covers whatever was visited.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ripple_count::config::load_config;
    /// use ripple_count::crawler::CrawlEngine;
    /// use ripple_count::fetcher::{build_http_client, HttpPageFetcher};
    /// use std::path::Path;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = load_config(Path::new("config.toml"))?;
    /// let client = build_http_client(&config.user_agent)?;
    /// let fetcher = HttpPageFetcher::new(client, config.ignored_word_patterns()?);
    /// let engine = CrawlEngine::new(fetcher, config.crawler_settings())?;
    ///
    /// let result = engine.crawl(&config.crawler.start_pages).await;
    /// println!("Visited {} pages", result.urls_visited());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn crawl(&self, seeds: &[String]) -> CrawlResult {
        let started = Instant::now();
        let budget = CrawlBudget::new(
            started,
            self.timeout,
            self.max_depth,
            self.ignored_urls.clone(),
            self.popular_word_count,
        );

        let ctx = Arc::new(CrawlContext {
            budget,
            visited: VisitedRegistry::new(),
            tally: WordTally::new(),
            fetcher: Arc::clone(&self.fetcher),
            permits: Arc::clone(&self.permits),
            failures: self.failures.clone(),
        });

        tracing::info!(
            "Starting crawl of {} seed(s), max depth {}, parallelism {}",
            seeds.len(),
            self.max_depth,
            self.parallelism
        );

        let mut roots = JoinSet::new();
        for seed in seeds {
            let task = CrawlTask::new(Arc::clone(&ctx), seed.clone(), ctx.budget.max_depth());
            roots.spawn(task.run());
        }
        join_all(roots).await;

        let word_counts = if ctx.tally.is_empty() {
            Vec::new()
        } else {
            rank(&ctx.tally.snapshot(), ctx.budget.popular_word_count())
        };
        let result = CrawlResult::new(word_counts, ctx.visited.size());

        tracing::info!(
            "Crawl finished: {} pages visited, {} distinct words in {:?}",
            result.urls_visited(),
            ctx.tally.len(),
            started.elapsed()
        );

        result
    }

    /// Number of hardware threads available for crawling
    pub fn max_parallelism(&self) -> usize {
        max_parallelism()
    }

    /// Effective fetch concurrency: the requested parallelism clamped to
    /// `1..=max_parallelism()`
    pub fn parallelism(&self) -> usize {
        self.parallelism
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }
}
