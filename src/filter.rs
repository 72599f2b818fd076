//! Message filtering with regex patterns.
//!
//! Holds the set of filter patterns that decide which inbound IRC lines
//! get forwarded as notifications. The set is mutable at runtime via the
//! in-channel `!add` / `!remove` commands.

use fancy_regex::Regex;
use tracing::warn;

use crate::common::error::{FilterError, FilterResult};

/// A compiled regex pattern with its original source text.
///
/// The source text is kept verbatim so a pattern can later be removed by
/// exact-text match.
#[derive(Debug, Clone)]
struct Pattern {
    source: String,
    regex: Regex,
}

/// Ordered, runtime-mutable collection of filter patterns.
#[derive(Debug, Clone, Default)]
pub struct FilterStore {
    patterns: Vec<Pattern>,
}

impl FilterStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from initial pattern strings.
    ///
    /// Invalid regex patterns are logged and skipped.
    pub fn from_sources<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut store = Self::new();
        for source in sources {
            let source = source.as_ref();
            if let Err(e) = store.add(source) {
                warn!("Skipping filter pattern: {}", e);
            }
        }
        store
    }

    /// Compile `source` and append it to the store.
    ///
    /// On compile failure the store is left unchanged.
    pub fn add(&mut self, source: &str) -> FilterResult<()> {
        let regex = Regex::new(source).map_err(|e| FilterError::InvalidPattern {
            pattern: source.to_string(),
            source: Box::new(e),
        })?;
        self.patterns.push(Pattern {
            source: source.to_string(),
            regex,
        });
        Ok(())
    }

    /// Remove every pattern whose source text equals `source` exactly.
    ///
    /// Returns the number of patterns removed; removing a pattern that was
    /// never added is a no-op.
    pub fn remove(&mut self, source: &str) -> usize {
        let before = self.patterns.len();
        self.patterns.retain(|p| p.source != source);
        before - self.patterns.len()
    }

    /// Source texts of every pattern that matches `text`.
    ///
    /// All patterns are evaluated; the caller sends one notification per
    /// match. Regex evaluation errors are logged and count as no match.
    pub fn matches(&self, text: &str) -> Vec<&str> {
        self.patterns
            .iter()
            .filter(|p| {
                p.regex.is_match(text).unwrap_or_else(|e| {
                    warn!("Regex match error for pattern '{}': {}", p.source, e);
                    false
                })
            })
            .map(|p| p.source.as_str())
            .collect()
    }

    /// Number of patterns currently held.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true if no patterns are configured.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
