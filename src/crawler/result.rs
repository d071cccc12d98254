use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Outcome of one crawl: the ranked popular words and the visited-page count
///
/// Built once when the crawl's task tree has finished; read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlResult {
    word_counts: Vec<(String, u64)>,
    urls_visited: usize,
}

impl CrawlResult {
    pub fn new(word_counts: Vec<(String, u64)>, urls_visited: usize) -> Self {
        Self {
            word_counts,
            urls_visited,
        }
    }

    /// Popular words in ranking order
    pub fn word_counts(&self) -> &[(String, u64)] {
        &self.word_counts
    }

    /// Number of distinct URLs claimed during the crawl, failed fetches included
    pub fn urls_visited(&self) -> usize {
        self.urls_visited
    }
}

/// Serializes as `{"wordCounts": {word: count, ...}, "urlsVisited": n}`
/// with `wordCounts` keys kept in ranking order
impl Serialize for CrawlResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CrawlResult", 2)?;
        state.serialize_field("wordCounts", &RankedWords(&self.word_counts))?;
        state.serialize_field("urlsVisited", &self.urls_visited)?;
        state.end()
    }
}

struct RankedWords<'a>(&'a [(String, u64)]);

impl Serialize for RankedWords<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(word, count)| (word, count)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let result = CrawlResult::new(vec![("ripple".to_string(), 3)], 7);
        assert_eq!(result.word_counts(), &[("ripple".to_string(), 3)]);
        assert_eq!(result.urls_visited(), 7);
    }

    #[test]
    fn test_json_keeps_ranking_order() {
        let result = CrawlResult::new(
            vec![
                ("zebra".to_string(), 9),
                ("apple".to_string(), 4),
                ("mango".to_string(), 1),
            ],
            12,
        );

        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"wordCounts":{"zebra":9,"apple":4,"mango":1},"urlsVisited":12}"#
        );
    }

    #[test]
    fn test_json_empty_result() {
        let json = serde_json::to_string(&CrawlResult::default()).unwrap();
        assert_eq!(json, r#"{"wordCounts":{},"urlsVisited":0}"#);
    }
}
