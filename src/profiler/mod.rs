//! Method timing for crawl runs
//!
//! Profiling is opt-in at the call site: wrap a fetcher in [`Profiled`] or
//! pass a future through [`Profiler::profile`]. Timings accumulate per name
//! and are written out as a plain-text report once the crawl is done.

mod state;

use crate::fetcher::{FetchError, PageFetcher, ParsedPage};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use state::ProfilingState;
use std::fs::OpenOptions;
use std::future::Future;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Collects total elapsed time per profiled name
///
/// Cloning is cheap; clones share the same recorded data.
#[derive(Debug, Clone)]
pub struct Profiler {
    started_at: DateTime<Utc>,
    state: Arc<ProfilingState>,
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Profiler {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            state: Arc::new(ProfilingState::default()),
        }
    }

    /// Adds `elapsed` to the running total for `name`
    pub fn record(&self, name: &str, elapsed: Duration) {
        self.state.record(name, elapsed);
    }

    /// Awaits `future` and records how long it took under `name`
    pub async fn profile<T>(&self, name: &str, future: impl Future<Output = T>) -> T {
        let start = Instant::now();
        let output = future.await;
        self.record(name, start.elapsed());
        output
    }

    /// Total recorded time for `name`, if it was ever recorded
    pub fn total(&self, name: &str) -> Option<Duration> {
        self.state.total(name)
    }

    /// Appends the report to the file at `path`, creating it if needed
    pub fn write_data(&self, path: &Path) -> std::io::Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = BufWriter::new(file);
        self.write_data_to(&mut writer)?;
        writer.flush()
    }

    /// Writes the report:
    ///
    /// ```text
    /// Run at Thu, 15 Oct 2026 09:30:00 GMT
    /// ripple_count::fetcher::http::HttpPageFetcher#fetch took 0m 3s 214ms
    ///
    /// ```
    pub fn write_data_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(
            writer,
            "Run at {}",
            self.started_at.format("%a, %-d %b %Y %H:%M:%S GMT")
        )?;
        self.state.write(writer)?;
        writeln!(writer)
    }
}

/// A [`PageFetcher`] decorator that times every `fetch` call
///
/// Failed fetches are timed too.
pub struct Profiled<F> {
    inner: F,
    profiler: Profiler,
    name: String,
}

impl<F: PageFetcher> Profiled<F> {
    pub fn new(inner: F, profiler: Profiler) -> Self {
        Self {
            inner,
            profiler,
            name: format!("{}#fetch", std::any::type_name::<F>()),
        }
    }

    /// Name the fetch timings are recorded under
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl<F: PageFetcher> PageFetcher for Profiled<F> {
    async fn fetch(&self, url: &str) -> Result<ParsedPage, FetchError> {
        self.profiler
            .profile(&self.name, self.inner.fetch(url))
            .await
    }
}
