//! Crawler module: the concurrent traversal engine
//!
//! This module contains the core crawling logic, including:
//! - Per-crawl budget (deadline, depth, ignored URLs)
//! - Recursive crawl tasks with structured fork/join
//! - Overall crawl orchestration
//! - Deterministic top-K ranking of the word tally

mod budget;
mod engine;
mod ranking;
mod result;
mod settings;
mod task;

pub use budget::CrawlBudget;
pub use engine::{max_parallelism, CrawlEngine};
pub use ranking::{compare_ranked, rank};
pub use result::CrawlResult;
pub use settings::CrawlerSettings;
pub use task::FetchFailure;
