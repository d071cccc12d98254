//! Output module for crawl results
//!
//! This module handles writing a [`CrawlResult`] as JSON, either appended to
//! a file or to any writer (stdout in the CLI):
//!
//! ```json
//! {
//!   "wordCounts": {
//!     "ripple": 12,
//!     "water": 9
//!   },
//!   "urlsVisited": 4
//! }
//! ```

use crate::crawler::CrawlResult;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Appends the result as JSON to the file at `path`
///
/// The file is created if it does not exist; existing content is kept.
///
/// # Arguments
///
/// * `result` - The crawl result to write
/// * `path` - Destination file
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the result
/// * `Err(OutputError)` - Failed to open, serialize or write
pub fn write_result(result: &CrawlResult, path: &Path) -> OutputResult<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = BufWriter::new(file);
    write_result_to(result, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Writes the result as pretty-printed JSON followed by a newline
pub fn write_result_to<W: Write>(result: &CrawlResult, writer: &mut W) -> OutputResult<()> {
    serde_json::to_writer_pretty(&mut *writer, result)?;
    writeln!(writer)?;
    Ok(())
}
