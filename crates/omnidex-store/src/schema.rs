//! Tantivy schema for index records.
//!
//! # Schema Fields
//!
//! ## Identity Fields
//! - `record_id`: Store-assigned id (u64, INDEXED | STORED | FAST)
//! - `entry_ref`: Joined (module, entry_key, entry_id) key (STRING), the
//!   upsert/delete term
//!
//! ## Filter Fields
//! - `module`, `entry_key`, `entry_plural` (STRING | STORED)
//! - `entry_id` (u64, STORED)
//!
//! ## Full-Text Fields (searchable, with frequencies for BM25)
//! - `title`, `description`, `keywords` (TEXT | STORED)
//!
//! ## Metadata Fields (stored only)
//! - `uri`, `keyword_hash`, `cp_edit_uri`, `cp_delete_uri`
//!
//! # Tokenizer
//!
//! Full-text fields use `omnidex_text`: SimpleTokenizer → LowerCaser. No
//! stemming, so a sanitized query term is matched against exactly the
//! terms it would produce itself.

use omnidex_core::{Error, IndexRecord, Result};
use tantivy::schema::{
    FAST, Field, INDEXED, IndexRecordOption, STORED, STRING, Schema, SchemaBuilder,
    TextFieldIndexing, TextOptions, Value,
};
use tantivy::tokenizer::{LowerCaser, SimpleTokenizer, TextAnalyzer};
use tantivy::{Index, TantivyDocument};

/// Name of the full-text tokenizer.
pub const TEXT_TOKENIZER: &str = "omnidex_text";

/// Typed field handles for the record schema.
#[derive(Debug, Clone)]
pub struct EntrySchema {
    schema: Schema,

    /// Store-assigned record id.
    pub record_id: Field,
    /// Upsert key.
    pub entry_ref: Field,

    /// Owning module.
    pub module: Field,
    /// Singular type identifier.
    pub entry_key: Field,
    /// Plural type identifier.
    pub entry_plural: Field,
    /// Entry id within the module.
    pub entry_id: Field,

    /// Display title.
    pub title: Field,
    /// Body text.
    pub description: Field,
    /// Canonical keywords.
    pub keywords: Field,

    /// Entry link.
    pub uri: Field,
    /// Raw keyword source.
    pub keyword_hash: Field,
    /// Admin edit link.
    pub cp_edit_uri: Field,
    /// Admin delete link.
    pub cp_delete_uri: Field,
}

impl EntrySchema {
    /// Build the record schema.
    pub fn build() -> Self {
        let mut builder = SchemaBuilder::new();

        let text_options = TextOptions::default()
            .set_indexing_options(
                TextFieldIndexing::default()
                    .set_tokenizer(TEXT_TOKENIZER)
                    .set_index_option(IndexRecordOption::WithFreqsAndPositions),
            )
            .set_stored();

        let record_id = builder.add_u64_field("record_id", INDEXED | STORED | FAST);
        let entry_ref = builder.add_text_field("entry_ref", STRING);

        let module = builder.add_text_field("module", STRING | STORED);
        let entry_key = builder.add_text_field("entry_key", STRING | STORED);
        let entry_plural = builder.add_text_field("entry_plural", STRING | STORED);
        let entry_id = builder.add_u64_field("entry_id", STORED);

        let title = builder.add_text_field("title", text_options.clone());
        let description = builder.add_text_field("description", text_options.clone());
        let keywords = builder.add_text_field("keywords", text_options);

        let uri = builder.add_text_field("uri", STORED);
        let keyword_hash = builder.add_text_field("keyword_hash", STORED);
        let cp_edit_uri = builder.add_text_field("cp_edit_uri", STORED);
        let cp_delete_uri = builder.add_text_field("cp_delete_uri", STORED);

        Self {
            schema: builder.build(),
            record_id,
            entry_ref,
            module,
            entry_key,
            entry_plural,
            entry_id,
            title,
            description,
            keywords,
            uri,
            keyword_hash,
            cp_edit_uri,
            cp_delete_uri,
        }
    }

    /// Resolve field handles from an existing index's schema.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the index was created with a different
    /// schema.
    pub fn from_schema(schema: Schema) -> Result<Self> {
        let field = |name: &str| {
            schema
                .get_field(name)
                .map_err(|e| Error::storage_with_source(format!("index has no '{name}' field"), e))
        };

        Ok(Self {
            record_id: field("record_id")?,
            entry_ref: field("entry_ref")?,
            module: field("module")?,
            entry_key: field("entry_key")?,
            entry_plural: field("entry_plural")?,
            entry_id: field("entry_id")?,
            title: field("title")?,
            description: field("description")?,
            keywords: field("keywords")?,
            uri: field("uri")?,
            keyword_hash: field("keyword_hash")?,
            cp_edit_uri: field("cp_edit_uri")?,
            cp_delete_uri: field("cp_delete_uri")?,
            schema,
        })
    }

    /// The underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Register the full-text tokenizer with an index.
    ///
    /// Must be called after creating or opening an index.
    pub fn register_tokenizers(index: &Index) {
        let analyzer = TextAnalyzer::builder(SimpleTokenizer::default())
            .filter(LowerCaser)
            .build();
        index.tokenizers().register(TEXT_TOKENIZER, analyzer);
    }

    /// Full-text fields in match order.
    pub fn text_fields(&self) -> [Field; 3] {
        [self.title, self.description, self.keywords]
    }

    /// Convert a record to a Tantivy document.
    pub fn to_document(&self, id: u64, record: &IndexRecord) -> TantivyDocument {
        let mut doc = TantivyDocument::new();

        doc.add_u64(self.record_id, id);
        doc.add_text(self.entry_ref, record.entry_ref().storage_key());

        doc.add_text(self.module, &record.module);
        doc.add_text(self.entry_key, &record.entry_key);
        doc.add_text(self.entry_plural, &record.entry_plural);
        doc.add_u64(self.entry_id, record.entry_id);

        doc.add_text(self.title, &record.title);
        doc.add_text(self.description, &record.description);
        if let Some(ref keywords) = record.keywords {
            doc.add_text(self.keywords, keywords);
        }

        doc.add_text(self.uri, &record.uri);
        if let Some(ref hash) = record.keyword_hash {
            doc.add_text(self.keyword_hash, hash);
        }
        if let Some(ref uri) = record.cp_edit_uri {
            doc.add_text(self.cp_edit_uri, uri);
        }
        if let Some(ref uri) = record.cp_delete_uri {
            doc.add_text(self.cp_delete_uri, uri);
        }

        doc
    }

    /// Read a record (and its id) back from a stored document.
    pub fn from_document(&self, doc: &TantivyDocument) -> Result<(u64, IndexRecord)> {
        let text = |field: Field| {
            doc.get_first(field)
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };
        let number = |field: Field, name: &str| {
            doc.get_first(field)
                .and_then(|v| v.as_u64())
                .ok_or_else(|| Error::storage(format!("stored document is missing '{name}'")))
        };

        let id = number(self.record_id, "record_id")?;
        let record = IndexRecord {
            module: text(self.module).unwrap_or_default(),
            entry_key: text(self.entry_key).unwrap_or_default(),
            entry_plural: text(self.entry_plural).unwrap_or_default(),
            entry_id: number(self.entry_id, "entry_id")?,
            uri: text(self.uri).unwrap_or_default(),
            title: text(self.title).unwrap_or_default(),
            description: text(self.description).unwrap_or_default(),
            keywords: text(self.keywords),
            keyword_hash: text(self.keyword_hash),
            cp_edit_uri: text(self.cp_edit_uri),
            cp_delete_uri: text(self.cp_delete_uri),
        };

        Ok((id, record))
    }
}

// ============================================================================
// Tests
// ============================================================================
