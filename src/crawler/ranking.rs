//! Top-K word ranking
//!
//! Ranking order:
//! 1. Count, descending
//! 2. Word length in characters, descending
//! 3. Word, ascending
//!
//! Distinct words never compare equal, so the output for a given tally is
//! always the same.

use std::cmp::Ordering;
use std::collections::HashMap;

/// Compares two `(word, count)` entries in ranking order
pub fn compare_ranked(a: (&str, u64), b: (&str, u64)) -> Ordering {
    b.1.cmp(&a.1)
        .then_with(|| b.0.chars().count().cmp(&a.0.chars().count()))
        .then_with(|| a.0.cmp(b.0))
}

/// Reduces a word tally to its `n` highest-ranked entries
///
/// Returns every entry when fewer than `n` distinct words exist, and nothing
/// when `n` is zero.
///
/// # Example
///
/// ```
/// use ripple_count::crawler::rank;
/// use std::collections::HashMap;
///
/// let counts: HashMap<String, u64> = [("to", 4), ("be", 4), ("question", 1)]
///     .into_iter()
///     .map(|(w, c)| (w.to_string(), c))
///     .collect();
///
/// assert_eq!(
///     rank(&counts, 2),
///     vec![("be".to_string(), 4), ("to".to_string(), 4)]
/// );
/// ```
pub fn rank(counts: &HashMap<String, u64>, n: usize) -> Vec<(String, u64)> {
    if n == 0 || counts.is_empty() {
        return Vec::new();
    }

    let mut entries: Vec<(&str, u64)> = counts
        .iter()
        .map(|(word, count)| (word.as_str(), *count))
        .collect();

    // Only the first n need a full sort
    if n < entries.len() {
        entries.select_nth_unstable_by(n - 1, |a, b| compare_ranked(*a, *b));
        entries.truncate(n);
    }
    entries.sort_unstable_by(|a, b| compare_ranked(*a, *b));

    entries
        .into_iter()
        .map(|(word, count)| (word.to_string(), count))
        .collect()
}
