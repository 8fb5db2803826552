//! Query sanitization.
//!
//! Turns free text into a [`MatchExpr`]. Query text is split on every
//! non-alphanumeric character, so operator and wildcard syntax (`*`, `+`,
//! `-`, `"`, `(`, `~`, ...) never reaches a store; what remains is
//! stopword-filtered, lowercased and deduplicated. Splitting happens on the
//! raw text, before lowercasing, exactly as the stores tokenize fields.

use std::collections::HashSet;

use omnidex_core::util::terms::{lowercase_term, split_words};
use omnidex_core::{Error, IndexConfig, Result};
use omnidex_store::MatchExpr;

use crate::stopwords::StopwordFilter;

/// Builds match expressions from raw query text.
#[derive(Debug)]
pub struct QueryBuilder {
    stopwords: StopwordFilter,
    max_terms: usize,
}

impl QueryBuilder {
    /// Create a builder from configuration.
    pub fn new(config: &IndexConfig) -> Self {
        Self {
            stopwords: StopwordFilter::new(config),
            max_terms: config.max_query_terms,
        }
    }

    /// Sanitize `query` into a match expression.
    ///
    /// # Errors
    ///
    /// Returns `Error::Query` if the query has no searchable terms, or more
    /// distinct terms than `max_query_terms` allows.
    pub fn build(&self, query: &str) -> Result<MatchExpr> {
        let words: Vec<&str> = split_words(query).collect();

        let mut seen = HashSet::new();
        let terms: Vec<String> = self
            .stopwords
            .filter(&words)
            .into_iter()
            .map(lowercase_term)
            .filter(|t| seen.insert(t.clone()))
            .collect();

        if terms.is_empty() {
            return Err(Error::query(format!(
                "query '{}' contains no searchable terms",
                query.trim()
            )));
        }
        if terms.len() > self.max_terms {
            return Err(Error::query(format!(
                "query has {} terms, at most {} allowed",
                terms.len(),
                self.max_terms
            )));
        }

        log::debug!("Sanitized query '{query}' into {terms:?}");
        MatchExpr::new(terms)
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(&IndexConfig::default())
    }
}

// ============================================================================
// Tests
// ============================================================================
