/// Word tally shared by all crawl tasks
use dashmap::DashMap;
use std::collections::HashMap;

/// Concurrent mapping from word to its running count
#[derive(Debug, Default)]
pub struct WordTally {
    counts: DashMap<String, u64>,
}

impl WordTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` to the count for `word`
    ///
    /// The read-modify-write happens while holding the entry's shard lock, so
    /// concurrent increments of the same word are never lost.
    pub fn increment(&self, word: &str, amount: u64) {
        if let Some(mut count) = self.counts.get_mut(word) {
            *count += amount;
            return;
        }
        *self.counts.entry(word.to_string()).or_insert(0) += amount;
    }

    /// Current count for `word`, zero if never seen
    pub fn get(&self, word: &str) -> u64 {
        self.counts.get(word).map(|c| *c).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Copies the tally into a plain map
    ///
    /// Only meaningful once every task writing to the tally has finished.
    pub fn snapshot(&self) -> HashMap<String, u64> {
        self.counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}
