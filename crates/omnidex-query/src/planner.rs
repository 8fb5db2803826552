//! Query planner.
//!
//! `QueryPlanner` sanitizes the query, asks the store for candidates under
//! the filter, keeps only those with non-zero boolean relevance, ranks them
//! and pages the result.
//!
//! # Ranking
//!
//! Hits are ordered by continuous relevance, highest first. Equal scores
//! are ordered by ascending record id, i.e. insertion order, so paging over
//! a fixed index is reproducible.

use std::cmp::Ordering;
use std::sync::Arc;

use omnidex_core::{IndexConfig, Result, SearchHit};
use omnidex_store::{Candidate, EntryFilter, IndexStore};
use serde::{Deserialize, Serialize};

use crate::filter::FilterSpec;
use crate::query::QueryBuilder;

/// Parameters for a search request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Free-text query.
    pub query: String,

    /// Maximum hits to return; `None` uses the configured default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,

    /// Hits to skip after ranking.
    #[serde(default)]
    pub offset: usize,

    /// Restrict hits to these modules and plurals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterSpec>,
}

impl SearchParams {
    /// Parameters for `query` with default paging and no filter.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Set the page size.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the number of hits to skip.
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Set the filter.
    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filter = Some(filter);
        self
    }
}

/// Plans and runs searches against a store.
#[derive(Clone)]
pub struct QueryPlanner {
    store: Arc<dyn IndexStore>,
    builder: Arc<QueryBuilder>,
    default_limit: usize,
}

impl QueryPlanner {
    /// Create a planner over `store`.
    pub fn new(store: Arc<dyn IndexStore>, config: &IndexConfig) -> Self {
        Self {
            store,
            builder: Arc::new(QueryBuilder::new(config)),
            default_limit: config.default_limit,
        }
    }

    /// Turn a filter specification into the store predicate.
    pub fn filter(&self, spec: &FilterSpec) -> EntryFilter {
        spec.to_entry_filter()
    }

    /// Run a ranked, filtered, paginated search.
    ///
    /// # Errors
    ///
    /// - `Error::Query` if the query has no searchable terms
    /// - `Error::Storage` if the store fails
    pub async fn search(&self, params: &SearchParams) -> Result<Vec<SearchHit>> {
        let expr = self.builder.build(&params.query)?;
        let filter = params
            .filter
            .as_ref()
            .filter(|spec| !spec.is_empty())
            .map(|spec| self.filter(spec))
            .unwrap_or_default();
        let limit = params.limit.unwrap_or(self.default_limit);

        let mut candidates: Vec<Candidate> = self
            .store
            .candidates(&expr, &filter)
            .await?
            .into_iter()
            .filter(|c| c.bool_relevance > 0.0 && filter.matches_record(&c.record))
            .collect();
        let total = candidates.len();

        candidates.sort_by(rank);

        let hits: Vec<SearchHit> = candidates
            .into_iter()
            .skip(params.offset)
            .take(limit)
            .map(|c| SearchHit::from_record(c.record, c.relevance))
            .collect();

        log::debug!(
            "search '{}' on {}: {total} match(es), returning {}",
            params.query,
            self.store.name(),
            hits.len()
        );
        Ok(hits)
    }

    /// Number of records qualifying for `query`, ignoring filters and paging.
    pub async fn count(&self, query: &str) -> Result<usize> {
        let expr = self.builder.build(query)?;
        self.store.count(&expr).await
    }
}

impl std::fmt::Debug for QueryPlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryPlanner")
            .field("store", &self.store.name())
            .field("default_limit", &self.default_limit)
            .finish()
    }
}

/// Relevance descending, then record id ascending.
fn rank(a: &Candidate, b: &Candidate) -> Ordering {
    b.relevance
        .total_cmp(&a.relevance)
        .then_with(|| a.id.cmp(&b.id))
}

// ============================================================================
// Tests
// ============================================================================
