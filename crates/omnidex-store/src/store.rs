//! Index store trait and factory.
//!
//! This module defines the `IndexStore` trait that every storage backend must
//! satisfy, the `MatchExpr` handed to stores at query time, and the
//! `Candidate` rows they hand back.
//!
//! # Backends
//!
//! - `TantivyStore`: Tantivy index on disk or in RAM (requires `store-tantivy`)
//! - `MemoryStore`: Linear scan with an in-process BM25 scorer
//!
//! # Match semantics
//!
//! A [`MatchExpr`] is a list of sanitized terms. Every store computes two
//! signals over the title, description and keyword fields:
//!
//! - **boolean relevance**: non-zero iff some term matches some indexed term
//!   as a prefix (`hel` matches `hello`)
//! - **relevance**: BM25 over exact term matches, used only for ordering

use std::sync::Arc;

use async_trait::async_trait;
use omnidex_core::util::terms::is_plain_term;
use omnidex_core::{EntryRef, Error, IndexConfig, IndexRecord, RecordId, Result, StoreBackend};

use crate::filter::EntryFilter;
use crate::memory::MemoryStore;

/// Sanitized full-text match expression.
///
/// Holds only plain lowercase alphanumeric terms, so no query syntax can
/// reach a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchExpr {
    terms: Vec<String>,
}

impl MatchExpr {
    /// Build an expression from already-split terms.
    ///
    /// # Errors
    ///
    /// Returns `Error::Query` if there are no terms or a term contains
    /// anything other than lowercase alphanumeric characters.
    pub fn new<I, S>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let terms: Vec<String> = terms.into_iter().map(Into::into).collect();

        if terms.is_empty() {
            return Err(Error::query("query contains no searchable terms"));
        }
        if let Some(bad) = terms.iter().find(|t| !is_plain_term(t)) {
            return Err(Error::query(format!("malformed query term '{bad}'")));
        }

        Ok(Self { terms })
    }

    /// The match terms.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

/// A record returned by a store for a match expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Store-assigned record id.
    pub id: RecordId,
    /// The stored record.
    pub record: IndexRecord,
    /// Boolean (prefix) relevance; zero means the record does not qualify.
    pub bool_relevance: f32,
    /// Continuous (BM25) relevance.
    pub relevance: f32,
}

/// Storage collaborator for the search index.
///
/// Implementations own the on-disk or in-memory representation of
/// [`IndexRecord`]s. All methods are request-scoped; stores are shared
/// across tasks behind an `Arc`.
#[async_trait]
pub trait IndexStore: Send + Sync {
    /// Atomically replace every record for the record's entry with `record`.
    ///
    /// Readers observe either the previous record or the new one, never
    /// neither.
    async fn replace(&self, record: IndexRecord) -> Result<RecordId>;

    /// Delete every record for `entry`, returning how many were removed.
    async fn delete(&self, entry: &EntryRef) -> Result<u64>;

    /// Records for `entry` (at most one when written through `replace`).
    async fn find(&self, entry: &EntryRef) -> Result<Vec<(RecordId, IndexRecord)>>;

    /// Records matching `expr` under `filter`, with both relevance signals.
    ///
    /// Candidates come back in no particular order and may include records
    /// with zero boolean relevance; qualification is the caller's job.
    async fn candidates(&self, expr: &MatchExpr, filter: &EntryFilter) -> Result<Vec<Candidate>>;

    /// Number of records with non-zero boolean relevance for `expr`.
    async fn count(&self, expr: &MatchExpr) -> Result<usize> {
        let candidates = self.candidates(expr, &EntryFilter::all()).await?;
        Ok(candidates.iter().filter(|c| c.bool_relevance > 0.0).count())
    }

    /// Total number of live records.
    async fn record_count(&self) -> Result<usize>;

    /// Backend name for diagnostics.
    fn name(&self) -> &str;
}

/// Create a store based on configuration.
///
/// Selection logic:
/// 1. `backend = "tantivy"` with the `store-tantivy` feature → `TantivyStore`
///    at `index_path`, or in RAM when no path is configured
/// 2. Otherwise, or if the tantivy index cannot be opened → `MemoryStore`
pub async fn create_index_store(config: &IndexConfig) -> Result<Arc<dyn IndexStore>> {
    config.validate()?;

    match config.backend {
        #[cfg(feature = "store-tantivy")]
        StoreBackend::Tantivy => {
            let opened = match config.index_path {
                Some(ref index_path) => {
                    let index_path = std::path::Path::new(index_path);
                    crate::tantivy_store::TantivyStore::open(index_path, config)
                }
                None => crate::tantivy_store::TantivyStore::in_memory(config),
            };
            match opened {
                Ok(store) => Ok(Arc::new(store)),
                Err(e) => {
                    log::warn!("Failed to open Tantivy index: {e}, falling back to memory store");
                    Ok(Arc::new(MemoryStore::new()))
                }
            }
        }
        #[cfg(not(feature = "store-tantivy"))]
        StoreBackend::Tantivy => {
            log::warn!("Tantivy support not compiled in, using memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
    }
}

// ============================================================================
// Tests
// ============================================================================
