//! Stopword filtering for search queries.
//!
//! Query terms that carry no meaning ("the", "of", "what") would qualify
//! almost every record as a prefix match, so they are dropped before the
//! match expression is built. The list comes from the `stop-words` crate's
//! English set, extended by `IndexConfig::custom_stopwords`.
//!
//! - Allowlist: words kept even if they are stopwords (case-sensitive)
//! - Fallback: if every term is a stopword, the terms are kept as they are
//!
//! # Example
//!
//! ```rust
//! use omnidex_core::IndexConfig;
//! use omnidex_query::stopwords::StopwordFilter;
//!
//! let config = IndexConfig {
//!     allowlist: vec!["IT".to_string()],
//!     ..Default::default()
//! };
//! let filter = StopwordFilter::new(&config);
//!
//! assert_eq!(filter.filter(&["what", "is", "a", "cadence"]), vec!["cadence"]);
//! assert_eq!(filter.filter(&["IT", "helpdesk"]), vec!["IT", "helpdesk"]);
//! assert_eq!(filter.filter(&["the", "a"]), vec!["the", "a"]);
//! ```

use std::collections::HashSet;

use omnidex_core::IndexConfig;
use stop_words::{LANGUAGE, get};

/// Stopword filter for query preprocessing.
pub struct StopwordFilter {
    stopwords: HashSet<String>,
    allowlist: HashSet<String>,
    enabled: bool,
}

impl StopwordFilter {
    /// Create a filter from configuration.
    pub fn new(config: &IndexConfig) -> Self {
        let mut stopwords: HashSet<String> = get(LANGUAGE::English)
            .iter()
            .map(|s| s.to_lowercase())
            .collect();

        for word in &config.custom_stopwords {
            stopwords.insert(word.to_lowercase());
        }

        Self {
            stopwords,
            allowlist: config.allowlist.iter().cloned().collect(),
            enabled: config.stopwords_enabled,
        }
    }

    /// Create a disabled filter (passes all words through).
    pub fn disabled() -> Self {
        Self {
            stopwords: HashSet::new(),
            allowlist: HashSet::new(),
            enabled: false,
        }
    }

    /// Drop stopwords from `words`, keeping order.
    ///
    /// Returns `words` unchanged when every word is a stopword.
    pub fn filter<'a>(&self, words: &[&'a str]) -> Vec<&'a str> {
        if !self.enabled {
            return words.to_vec();
        }

        let kept: Vec<&str> = words
            .iter()
            .copied()
            .filter(|word| !self.is_stopword(word))
            .collect();

        if kept.is_empty() {
            log::debug!("Query is all stopwords, keeping {} term(s)", words.len());
            words.to_vec()
        } else {
            kept
        }
    }

    /// Check if a word is a stopword.
    ///
    /// The allowlist check is case-sensitive; the stopword check is not.
    pub fn is_stopword(&self, word: &str) -> bool {
        if self.allowlist.contains(word) {
            return false;
        }
        self.stopwords.contains(&word.to_lowercase())
    }

    /// Number of stopwords in the filter.
    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }

    /// Whether filtering is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl std::fmt::Debug for StopwordFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopwordFilter")
            .field("enabled", &self.enabled)
            .field("stopword_count", &self.stopwords.len())
            .field("allowlist_count", &self.allowlist.len())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
