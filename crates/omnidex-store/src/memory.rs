//! In-memory index store.
//!
//! Keeps every record in a `BTreeMap` keyed by [`RecordId`] and answers
//! queries with a linear scan. Used when Tantivy is unavailable and in
//! tests that want a store with no filesystem footprint.

use std::collections::BTreeMap;

use async_trait::async_trait;
use omnidex_core::{EntryRef, IndexRecord, RecordId, Result};
use tokio::sync::RwLock;

use crate::filter::EntryFilter;
use crate::scoring::{Bm25, CorpusStats, TermBag};
use crate::store::{Candidate, IndexStore, MatchExpr};

#[derive(Debug)]
struct StoredRecord {
    record: IndexRecord,
    bag: TermBag,
}

#[derive(Debug)]
struct MemoryState {
    records: BTreeMap<RecordId, StoredRecord>,
    next_id: RecordId,
}

/// Linear-scan store with BM25 ranking.
#[derive(Debug)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
    bm25: Bm25,
}

impl MemoryStore {
    /// Create an empty store. The first record gets id 1.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState {
                records: BTreeMap::new(),
                next_id: RecordId::new(1),
            }),
            bm25: Bm25::default(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of terms that prefix-match some term of the record.
fn prefix_hits(bag: &TermBag, terms: &[String]) -> usize {
    terms.iter().filter(|t| bag.has_prefix(t)).count()
}

#[async_trait]
impl IndexStore for MemoryStore {
    async fn replace(&self, record: IndexRecord) -> Result<RecordId> {
        let entry = record.entry_ref();
        let bag = TermBag::from_record(&record);

        let mut state = self.state.write().await;
        state.records.retain(|_, stored| !entry.matches(&stored.record));

        let id = state.next_id;
        state.next_id = id.next();
        state.records.insert(id, StoredRecord { record, bag });

        log::debug!("memory store: replaced {entry} as record {id}");
        Ok(id)
    }

    async fn delete(&self, entry: &EntryRef) -> Result<u64> {
        let mut state = self.state.write().await;
        let before = state.records.len();
        state.records.retain(|_, stored| !entry.matches(&stored.record));
        let removed = (before - state.records.len()) as u64;

        log::debug!("memory store: deleted {removed} record(s) for {entry}");
        Ok(removed)
    }

    async fn find(&self, entry: &EntryRef) -> Result<Vec<(RecordId, IndexRecord)>> {
        let state = self.state.read().await;
        Ok(state
            .records
            .iter()
            .filter(|(_, stored)| entry.matches(&stored.record))
            .map(|(id, stored)| (*id, stored.record.clone()))
            .collect())
    }

    async fn candidates(&self, expr: &MatchExpr, filter: &EntryFilter) -> Result<Vec<Candidate>> {
        if filter.is_unsatisfiable() {
            return Ok(Vec::new());
        }

        let state = self.state.read().await;
        let terms = expr.terms();
        let stats = CorpusStats::collect(state.records.values().map(|s| &s.bag), terms);

        let candidates = state
            .records
            .iter()
            .filter(|(_, stored)| filter.matches_record(&stored.record))
            .filter_map(|(id, stored)| {
                let hits = prefix_hits(&stored.bag, terms);
                if hits == 0 {
                    return None;
                }
                Some(Candidate {
                    id: *id,
                    record: stored.record.clone(),
                    bool_relevance: hits as f32,
                    relevance: self.bm25.score(&stored.bag, terms, &stats),
                })
            })
            .collect();

        Ok(candidates)
    }

    async fn count(&self, expr: &MatchExpr) -> Result<usize> {
        let state = self.state.read().await;
        Ok(state
            .records
            .values()
            .filter(|stored| prefix_hits(&stored.bag, expr.terms()) > 0)
            .count())
    }

    async fn record_count(&self) -> Result<usize> {
        Ok(self.state.read().await.records.len())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

// ============================================================================
// Tests
// ============================================================================
