//! The search service.
//!
//! `SearchIndex` is the one object content modules and front ends talk to.
//! It is built once per process around a store handle and a keyword
//! normalizer and is cheap to clone.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use omnidex_core::{IndexConfig, InlineKeywords, NewEntry};
//! use omnidex_query::{SearchIndex, SearchParams};
//!
//! let index = SearchIndex::from_config(&IndexConfig::default(), Arc::new(InlineKeywords)).await?;
//! index.index(entry).await?;
//! let hits = index.search(&SearchParams::new("hello")).await?;
//! ```

use std::sync::Arc;

use omnidex_core::{
    EntryRef, IndexConfig, KeywordNormalizer, NewEntry, RecordId, Result, SearchHit,
};
use omnidex_store::{EntryFilter, IndexStore, create_index_store};

use crate::filter::FilterSpec;
use crate::planner::{QueryPlanner, SearchParams};
use crate::writer::IndexWriter;

/// Indexing and query front door.
#[derive(Clone)]
pub struct SearchIndex {
    store: Arc<dyn IndexStore>,
    writer: IndexWriter,
    planner: QueryPlanner,
}

impl SearchIndex {
    /// Build a service over an existing store.
    pub fn new(
        store: Arc<dyn IndexStore>,
        keywords: Arc<dyn KeywordNormalizer>,
        config: &IndexConfig,
    ) -> Self {
        Self {
            writer: IndexWriter::new(store.clone(), keywords),
            planner: QueryPlanner::new(store.clone(), config),
            store,
        }
    }

    /// Create the configured store and build a service over it.
    pub async fn from_config(
        config: &IndexConfig,
        keywords: Arc<dyn KeywordNormalizer>,
    ) -> Result<Self> {
        let store = create_index_store(config).await?;
        log::info!("Search index ready ({} store)", store.name());
        Ok(Self::new(store, keywords, config))
    }

    /// Index an entry, replacing its previous record.
    pub async fn index(&self, entry: NewEntry) -> Result<RecordId> {
        self.writer.index(entry).await
    }

    /// Remove an entry from the index.
    pub async fn drop_index(&self, entry: &EntryRef) -> Result<u64> {
        self.writer.drop_index(entry).await
    }

    /// Build the store predicate for a filter specification.
    pub fn filter(&self, spec: &FilterSpec) -> EntryFilter {
        self.planner.filter(spec)
    }

    /// Ranked, filtered, paginated search.
    pub async fn search(&self, params: &SearchParams) -> Result<Vec<SearchHit>> {
        self.planner.search(params).await
    }

    /// Number of records qualifying for `query`.
    pub async fn count(&self, query: &str) -> Result<usize> {
        self.planner.count(query).await
    }

    /// Total number of indexed records.
    pub async fn record_count(&self) -> Result<usize> {
        self.store.record_count().await
    }

    /// Name of the backing store.
    pub fn store_name(&self) -> &str {
        self.store.name()
    }
}

impl std::fmt::Debug for SearchIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchIndex")
            .field("store", &self.store.name())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
