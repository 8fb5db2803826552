//! Index writer.
//!
//! `IndexWriter` turns a [`NewEntry`] into an [`IndexRecord`] and hands it
//! to the store as one atomic replace, so re-indexing an entry never leaves
//! it briefly unsearchable and never leaves two records behind.

use std::sync::Arc;

use omnidex_core::util::markup::strip_markup;
use omnidex_core::{
    EntryRef, Error, IndexRecord, KeywordNormalizer, Keywords, NewEntry, RecordId, Result,
};
use omnidex_store::IndexStore;

/// Writes and removes index records.
#[derive(Clone)]
pub struct IndexWriter {
    store: Arc<dyn IndexStore>,
    keywords: Arc<dyn KeywordNormalizer>,
}

impl IndexWriter {
    /// Create a writer over `store`, resolving keyword sources with
    /// `keywords`.
    pub fn new(store: Arc<dyn IndexStore>, keywords: Arc<dyn KeywordNormalizer>) -> Self {
        Self { store, keywords }
    }

    /// Index `entry`, replacing any record previously stored for it.
    ///
    /// # Errors
    ///
    /// - `Error::Validation` if a required field is blank, `entry_id` is 0,
    ///   or an identifier contains control characters
    /// - `Error::Storage` if the store rejects the replace; retrying is safe
    pub async fn index(&self, entry: NewEntry) -> Result<RecordId> {
        let record = self.build_record(entry)?;
        let entry_ref = record.entry_ref();

        let id = self.store.replace(record).await?;
        log::debug!("Indexed {entry_ref} as record {id}");
        Ok(id)
    }

    /// Remove every record for `entry`, returning how many were removed.
    pub async fn drop_index(&self, entry: &EntryRef) -> Result<u64> {
        let removed = self.store.delete(entry).await?;
        if removed == 0 {
            log::debug!("Nothing indexed for {entry}");
        } else {
            log::debug!("Dropped {removed} record(s) for {entry}");
        }
        Ok(removed)
    }

    /// Validate `entry` and project it into the stored record.
    pub fn build_record(&self, entry: NewEntry) -> Result<IndexRecord> {
        require("module", &entry.module)?;
        require("entry_key", &entry.entry_key)?;
        require("entry_plural", &entry.entry_plural)?;
        require("uri", &entry.uri)?;
        reject_control_chars("module", &entry.module)?;
        reject_control_chars("entry_key", &entry.entry_key)?;
        if entry.entry_id == 0 {
            return Err(Error::validation_field("entry_id", "entry_id must be non-zero"));
        }

        let title = strip_markup(&entry.title);
        require("title", &title)?;
        let description = entry
            .description
            .as_deref()
            .map(strip_markup)
            .unwrap_or_default();

        let (keywords, keyword_hash) = match entry.options.keywords.filter(|k| !k.is_empty()) {
            Some(Keywords::List(items)) => (join_keywords(&items), None),
            Some(Keywords::Source(source)) => {
                let normalized = self.keywords.normalize(&source)?;
                (non_empty(normalized), Some(source))
            }
            None => (None, None),
        };

        Ok(IndexRecord {
            module: entry.module,
            entry_key: entry.entry_key,
            entry_plural: entry.entry_plural,
            entry_id: entry.entry_id,
            uri: entry.uri,
            title,
            description,
            keywords,
            keyword_hash,
            cp_edit_uri: entry.options.cp_edit_uri.and_then(non_empty),
            cp_delete_uri: entry.options.cp_delete_uri.and_then(non_empty),
        })
    }
}

impl std::fmt::Debug for IndexWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexWriter")
            .field("store", &self.store.name())
            .finish()
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation_field(field, format!("{field} is required")));
    }
    Ok(())
}

fn reject_control_chars(field: &str, value: &str) -> Result<()> {
    if value.chars().any(char::is_control) {
        return Err(Error::validation_field(
            field,
            format!("{field} must not contain control characters"),
        ));
    }
    Ok(())
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// Join a keyword list with "," in caller order, skipping blank items.
fn join_keywords(items: &[String]) -> Option<String> {
    let joined = items
        .iter()
        .filter(|k| !k.trim().is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(",");
    non_empty(joined)
}

// ============================================================================
// Tests
// ============================================================================
