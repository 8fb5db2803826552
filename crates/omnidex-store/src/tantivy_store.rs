//! Tantivy-backed index store.
//!
//! Provides `TantivyStore`, the default store. This module is only
//! available with the `store-tantivy` feature.
//!
//! Every write is a single Tantivy commit: `replace` deletes the entry's
//! previous document by its `entry_ref` term and adds the new one before
//! committing, so a reader reloaded after the commit sees exactly one record
//! for the entry and a reader holding an older searcher still sees the old
//! one.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use omnidex_core::{EntryRef, Error, IndexConfig, IndexRecord, RecordId, Result};
use tantivy::collector::{Count, DocSetCollector};
use tantivy::query::{
    BooleanQuery, ConstScoreQuery, FuzzyTermQuery, Occur, Query, TermQuery,
};
use tantivy::schema::{Field, IndexRecordOption};
use tantivy::{
    DocAddress, Index, IndexReader, IndexWriter, ReloadPolicy, Searcher, TantivyDocument, Term,
};
use tokio::sync::Mutex;

use crate::collector::ScoredDocs;
use crate::filter::EntryFilter;
use crate::schema::EntrySchema;
use crate::store::{Candidate, IndexStore, MatchExpr};

struct WriterState {
    writer: IndexWriter,
    next_id: u64,
}

/// Tantivy-based index store.
///
/// Boolean relevance comes from a prefix query over the full-text fields;
/// continuous relevance is Tantivy's BM25 over exact term matches.
pub struct TantivyStore {
    schema: EntrySchema,
    reader: IndexReader,
    writer: Mutex<WriterState>,
}

fn storage_err(context: &str) -> impl FnOnce(tantivy::TantivyError) -> Error + '_ {
    move |e| Error::storage_with_source(format!("{context}: {e}"), e)
}

impl TantivyStore {
    /// Create or open an index in `index_path`.
    ///
    /// If the directory does not exist it is created; if it already holds an
    /// index, that index is opened and record ids continue after the highest
    /// stored id.
    pub fn open(index_path: &Path, config: &IndexConfig) -> Result<Self> {
        if !index_path.exists() {
            std::fs::create_dir_all(index_path).map_err(|e| Error::io_with_path(e, index_path))?;
        }

        let (index, schema) = if Self::index_exists(index_path) {
            let index =
                Index::open_in_dir(index_path).map_err(storage_err("Failed to open index"))?;
            let schema = EntrySchema::from_schema(index.schema())?;
            (index, schema)
        } else {
            let schema = EntrySchema::build();
            let index = Index::create_in_dir(index_path, schema.schema().clone())
                .map_err(storage_err("Failed to create index"))?;
            (index, schema)
        };

        let store = Self::from_index(index, schema, config)?;
        log::info!(
            "Opened Tantivy index at {} ({} records)",
            index_path.display(),
            store.reader.searcher().num_docs()
        );
        Ok(store)
    }

    /// Create an index held entirely in RAM.
    pub fn in_memory(config: &IndexConfig) -> Result<Self> {
        let schema = EntrySchema::build();
        let index = Index::create_in_ram(schema.schema().clone());
        Self::from_index(index, schema, config)
    }

    /// Check if an index exists at the given path.
    pub fn index_exists(index_path: &Path) -> bool {
        index_path.join("meta.json").exists()
    }

    fn from_index(index: Index, schema: EntrySchema, config: &IndexConfig) -> Result<Self> {
        EntrySchema::register_tokenizers(&index);

        let writer = index
            .writer_with_num_threads(1, config.writer_memory_bytes)
            .map_err(storage_err("Failed to create index writer"))?;
        let reader: IndexReader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(storage_err("Failed to create index reader"))?;

        let next_id = Self::max_record_id(&schema, &reader.searcher())? + 1;

        Ok(Self {
            schema,
            reader,
            writer: Mutex::new(WriterState { writer, next_id }),
        })
    }

    /// Highest id in the `record_id` fast-field column of any segment.
    fn max_record_id(schema: &EntrySchema, searcher: &Searcher) -> Result<u64> {
        let field_name = schema.schema().get_field_name(schema.record_id);

        let mut max = 0;
        for segment in searcher.segment_readers() {
            let column = segment
                .fast_fields()
                .u64(field_name)
                .map_err(storage_err("Failed to read record ids"))?;
            max = max.max(column.max_value());
        }
        Ok(max)
    }

    fn load(
        schema: &EntrySchema,
        searcher: &Searcher,
        address: DocAddress,
    ) -> Result<(u64, IndexRecord)> {
        let doc: TantivyDocument = searcher
            .doc(address)
            .map_err(storage_err("Failed to load document"))?;
        schema.from_document(&doc)
    }

    fn entry_term(&self, entry: &EntryRef) -> Term {
        Term::from_field_text(self.schema.entry_ref, &entry.storage_key())
    }

    /// Any term matches some indexed term as a prefix. Each matching
    /// (term, field) pair contributes a constant 1.0.
    fn prefix_query(&self, expr: &MatchExpr) -> Box<dyn Query> {
        let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::new();
        for field in self.schema.text_fields() {
            for term in expr.terms() {
                let term = Term::from_field_text(field, term);
                let query: Box<dyn Query> = Box::new(FuzzyTermQuery::new_prefix(term, 0, true));
                clauses.push((Occur::Should, query));
            }
        }
        Box::new(BooleanQuery::new(clauses))
    }

    /// BM25 over exact term matches.
    fn bm25_query(&self, expr: &MatchExpr) -> Box<dyn Query> {
        let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::new();
        for field in self.schema.text_fields() {
            for term in expr.terms() {
                let term = Term::from_field_text(field, term);
                let query: Box<dyn Query> =
                    Box::new(TermQuery::new(term, IndexRecordOption::WithFreqs));
                clauses.push((Occur::Should, query));
            }
        }
        Box::new(BooleanQuery::new(clauses))
    }

    /// AND `query` with the filter, without changing its scores.
    fn restrict(&self, query: Box<dyn Query>, filter: &EntryFilter) -> Box<dyn Query> {
        if filter.is_unrestricted() {
            return query;
        }

        let keyword = |field: Field, value: &str| -> Box<dyn Query> {
            Box::new(TermQuery::new(
                Term::from_field_text(field, value),
                IndexRecordOption::Basic,
            ))
        };

        let clauses: Vec<(Occur, Box<dyn Query>)> = filter
            .clauses()
            .map(|(module, plurals)| {
                let plurals: Vec<(Occur, Box<dyn Query>)> = plurals
                    .iter()
                    .map(|p| (Occur::Should, keyword(self.schema.entry_plural, p.as_str())))
                    .collect();
                let clause: Box<dyn Query> = Box::new(BooleanQuery::new(vec![
                    (Occur::Must, keyword(self.schema.module, module)),
                    (Occur::Must, Box::new(BooleanQuery::new(plurals)) as Box<dyn Query>),
                ]));
                (Occur::Should, clause)
            })
            .collect();

        let filter_query: Box<dyn Query> = Box::new(ConstScoreQuery::new(
            Box::new(BooleanQuery::new(clauses)),
            0.0,
        ));
        Box::new(BooleanQuery::new(vec![
            (Occur::Must, query),
            (Occur::Must, filter_query),
        ]))
    }

    fn commit(&self, writer: &mut IndexWriter) -> Result<()> {
        if let Err(e) = writer.commit() {
            if let Err(rollback) = writer.rollback() {
                log::error!("Rollback after failed commit also failed: {rollback}");
            }
            return Err(storage_err("Failed to commit index")(e));
        }
        self.reader.reload().map_err(storage_err("Failed to reload reader"))
    }
}

#[async_trait]
impl IndexStore for TantivyStore {
    async fn replace(&self, record: IndexRecord) -> Result<RecordId> {
        let entry = record.entry_ref();
        let mut state = self.writer.lock().await;

        let id = state.next_id;
        let doc = self.schema.to_document(id, &record);

        state.writer.delete_term(self.entry_term(&entry));
        if let Err(e) = state.writer.add_document(doc) {
            if let Err(rollback) = state.writer.rollback() {
                log::error!("Rollback after failed insert also failed: {rollback}");
            }
            return Err(storage_err("Failed to add document")(e));
        }
        self.commit(&mut state.writer)?;
        state.next_id = id + 1;

        log::debug!("tantivy store: replaced {entry} as record {id}");
        Ok(RecordId::new(id))
    }

    async fn delete(&self, entry: &EntryRef) -> Result<u64> {
        let mut state = self.writer.lock().await;

        let term_query = TermQuery::new(self.entry_term(entry), IndexRecordOption::Basic);
        let existing = self
            .reader
            .searcher()
            .search(&term_query, &Count)
            .map_err(storage_err("Failed to count entry records"))?;
        if existing == 0 {
            return Ok(0);
        }

        state.writer.delete_term(self.entry_term(entry));
        self.commit(&mut state.writer)?;

        log::debug!("tantivy store: deleted {existing} record(s) for {entry}");
        Ok(existing as u64)
    }

    async fn find(&self, entry: &EntryRef) -> Result<Vec<(RecordId, IndexRecord)>> {
        let searcher = self.reader.searcher();
        let term_query = TermQuery::new(self.entry_term(entry), IndexRecordOption::Basic);
        let addresses = searcher
            .search(&term_query, &DocSetCollector)
            .map_err(storage_err("Failed to look up entry"))?;

        let mut found = Vec::with_capacity(addresses.len());
        for address in addresses {
            let (id, record) = Self::load(&self.schema, &searcher, address)?;
            found.push((RecordId::new(id), record));
        }
        found.sort_by_key(|(id, _)| *id);
        Ok(found)
    }

    async fn candidates(&self, expr: &MatchExpr, filter: &EntryFilter) -> Result<Vec<Candidate>> {
        if filter.is_unsatisfiable() {
            return Ok(Vec::new());
        }

        let searcher = self.reader.searcher();

        let matched = searcher
            .search(self.restrict(self.prefix_query(expr), filter).as_ref(), &ScoredDocs)
            .map_err(storage_err("Failed to run boolean match"))?;
        if matched.is_empty() {
            return Ok(Vec::new());
        }

        let scores: HashMap<DocAddress, f32> = searcher
            .search(self.restrict(self.bm25_query(expr), filter).as_ref(), &ScoredDocs)
            .map_err(storage_err("Failed to run relevance match"))?
            .into_iter()
            .map(|(score, address)| (address, score))
            .collect();

        let mut candidates = Vec::with_capacity(matched.len());
        for (bool_relevance, address) in matched {
            let (id, record) = Self::load(&self.schema, &searcher, address)?;
            candidates.push(Candidate {
                id: RecordId::new(id),
                record,
                bool_relevance,
                relevance: scores.get(&address).copied().unwrap_or(0.0),
            });
        }
        Ok(candidates)
    }

    async fn count(&self, expr: &MatchExpr) -> Result<usize> {
        self.reader
            .searcher()
            .search(self.prefix_query(expr).as_ref(), &Count)
            .map_err(storage_err("Failed to count matches"))
    }

    async fn record_count(&self) -> Result<usize> {
        Ok(self.reader.searcher().num_docs() as usize)
    }

    fn name(&self) -> &str {
        "tantivy"
    }
}

impl std::fmt::Debug for TantivyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TantivyStore")
            .field("index", &"<tantivy::Index>")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
