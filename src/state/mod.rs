//! Shared crawl state
//!
//! This module holds the only mutable state that concurrent crawl tasks share.
//! Both structures are created fresh for every crawl and dropped once the
//! result has been built.
//!
//! # Components
//!
//! - `VisitedRegistry`: set of URLs already claimed by a task
//! - `WordTally`: running word counts across all visited pages

mod tally;
mod visited;

// Re-export main types
pub use tally::WordTally;
pub use visited::VisitedRegistry;
