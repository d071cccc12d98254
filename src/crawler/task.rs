//! Recursive crawl task
//!
//! A task visits one URL and then forks one child task per outbound link. It
//! finishes only after every child has finished, so a crawl's task tree is
//! fully drained by the time the root tasks return.

use crate::crawler::budget::CrawlBudget;
use crate::fetcher::{PageFetcher, ParsedPage};
use crate::state::{VisitedRegistry, WordTally};
use futures::future::{BoxFuture, FutureExt};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;

/// A fetch error that was swallowed by a crawl task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    /// The URL whose fetch failed; it still counts as visited
    pub url: String,

    /// The fetcher's error message
    pub message: String,
}

/// State shared by every task of one crawl
pub(crate) struct CrawlContext<F> {
    pub budget: CrawlBudget,
    pub visited: VisitedRegistry,
    pub tally: WordTally,
    pub fetcher: Arc<F>,
    /// Bounds the number of fetches in flight
    pub permits: Arc<Semaphore>,
    pub failures: Option<mpsc::UnboundedSender<FetchFailure>>,
}

/// One attempt to visit one URL
pub(crate) struct CrawlTask<F> {
    ctx: Arc<CrawlContext<F>>,
    url: String,
    depth_remaining: u32,
}

impl<F: PageFetcher> CrawlTask<F> {
    pub fn new(ctx: Arc<CrawlContext<F>>, url: String, depth_remaining: u32) -> Self {
        Self {
            ctx,
            url,
            depth_remaining,
        }
    }

    /// Boxes the visit so tasks can spawn copies of themselves
    pub fn run(self) -> BoxFuture<'static, ()> {
        self.visit().boxed()
    }

    async fn visit(self) {
        let ctx = &self.ctx;

        if ctx.budget.deadline_passed() {
            tracing::trace!("Deadline passed, skipping {}", self.url);
            return;
        }

        if self.depth_remaining == 0 {
            return;
        }

        if ctx.budget.is_ignored(&self.url) {
            tracing::debug!("Ignoring {}", self.url);
            return;
        }

        if !ctx.visited.claim(&self.url) {
            tracing::trace!("Already claimed: {}", self.url);
            return;
        }

        let Some(page) = self.fetch().await else {
            return;
        };

        tracing::debug!(
            "Visited {} ({} words, {} links, depth remaining {})",
            self.url,
            page.words.len(),
            page.links.len(),
            self.depth_remaining
        );

        self.aggregate(&page.words);
        self.follow_links(page.links).await;
    }

    /// Fetches the page while holding a concurrency permit
    ///
    /// Errors are logged, reported on the failure channel if there is one,
    /// and turned into `None`. The URL stays claimed either way.
    async fn fetch(&self) -> Option<ParsedPage> {
        let result = {
            let Ok(_permit) = self.ctx.permits.acquire().await else {
                tracing::warn!("Fetch pool closed, dropping {}", self.url);
                return None;
            };
            self.ctx.fetcher.fetch(&self.url).await
        };

        match result {
            Ok(page) => Some(page),
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", self.url, e);
                if let Some(failures) = &self.ctx.failures {
                    // The receiver may be gone; reporting is best-effort
                    let _ = failures.send(FetchFailure {
                        url: self.url.clone(),
                        message: e.to_string(),
                    });
                }
                None
            }
        }
    }

    /// Adds this page's words to the shared tally, one increment per distinct word
    fn aggregate(&self, words: &[String]) {
        let mut per_page: HashMap<&str, u64> = HashMap::new();
        for word in words {
            *per_page.entry(word.as_str()).or_insert(0) += 1;
        }

        for (word, count) in per_page {
            self.ctx.tally.increment(word, count);
        }
    }

    /// Forks one child per link and waits for all of them
    async fn follow_links(&self, links: Vec<String>) {
        let child_depth = self.depth_remaining - 1;

        // Children at depth zero would return before touching any state
        if links.is_empty() || child_depth == 0 {
            return;
        }

        let mut children = JoinSet::new();
        for link in links {
            children.spawn(CrawlTask::new(Arc::clone(&self.ctx), link, child_depth).run());
        }

        join_all(children).await;
    }
}

/// Waits for every task in `set`, logging any that panicked
pub(crate) async fn join_all(mut set: JoinSet<()>) {
    while let Some(joined) = set.join_next().await {
        if let Err(e) = joined {
            tracing::error!("Crawl task failed: {}", e);
        }
    }
}
