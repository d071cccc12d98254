//! Full-string pattern matching for ignored URLs and ignored words
//!
//! Patterns are regular expressions that must match the *entire* candidate
//! string, not just a substring of it. `https://example\.com/.*` matches every
//! page on that host, while `example` matches only the literal word "example".

use crate::ConfigError;
use regex::Regex;

/// An ordered set of compiled full-match patterns
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    /// Compiles every pattern, failing on the first one that is malformed
    ///
    /// # Arguments
    ///
    /// * `patterns` - Regular expression sources
    ///
    /// # Returns
    ///
    /// * `Ok(PatternSet)` - All patterns compiled
    /// * `Err(ConfigError::InvalidPattern)` - A pattern failed to compile
    ///
    /// # Examples
    ///
    /// ```
    /// use ripple_count::pattern::PatternSet;
    ///
    /// let set = PatternSet::compile(&["https://example\\.com/private/.*"]).unwrap();
    /// assert!(set.matches("https://example.com/private/keys"));
    /// assert!(!set.matches("https://example.com/public"));
    /// ```
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ConfigError> {
        let patterns = patterns
            .iter()
            .map(|p| compile_anchored(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Returns true if any pattern matches the whole of `candidate`
    pub fn matches(&self, candidate: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(candidate))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Wraps the source in anchors so only whole-string matches count
fn compile_anchored(pattern: &str) -> Result<Regex, ConfigError> {
    let invalid = |source: regex::Error| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    };

    // Compile the bare pattern first so errors point at what the user wrote
    Regex::new(pattern).map_err(invalid)?;

    // A valid pattern only fails once wrapped when it ends inside a `(?x)`
    // comment, which runs to the end of the line and swallows the closing
    // group. Ending the line first is whitespace in that mode.
    Regex::new(&format!("^(?:{})$", pattern))
        .or_else(|_| Regex::new(&format!("^(?:{}\n)$", pattern)))
        .map_err(invalid)
}
