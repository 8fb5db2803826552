//! Index record types.
//!
//! An [`IndexRecord`] is the stored projection of one content entry. It is
//! identified by an [`EntryRef`] (module, entry key, entry id); at most one
//! live record exists per entry. Callers describe what to index with a
//! [`NewEntry`], and queries return [`SearchHit`] projections.
//!
//! # Example
//!
//! ```rust
//! use omnidex_core::{IndexOptions, Keywords, NewEntry};
//!
//! let entry = NewEntry::builder()
//!     .module("blog")
//!     .entry_key("blog:post")
//!     .entry_plural("blog:posts")
//!     .entry_id(1)
//!     .uri("blog/2024/01/hello")
//!     .title("Hello World")
//!     .description("<p>Hi</p>")
//!     .options(IndexOptions::default().with_keywords(Keywords::source("hi,hello")))
//!     .build();
//!
//! assert_eq!(entry.entry_ref().module, "blog");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Store-assigned identifier of an index record.
///
/// Ids increase with every insert, so ordering by id is insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    /// Wrap a raw id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw id value.
    pub fn get(self) -> u64 {
        self.0
    }

    /// The id following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of an indexed entry: the (module, entry_key, entry_id) triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryRef {
    /// Owning content module.
    pub module: String,
    /// Singular type identifier.
    pub entry_key: String,
    /// Id of the entry within its module.
    pub entry_id: u64,
}

impl EntryRef {
    /// Create an entry reference.
    pub fn new(module: impl Into<String>, entry_key: impl Into<String>, entry_id: u64) -> Self {
        Self {
            module: module.into(),
            entry_key: entry_key.into(),
            entry_id,
        }
    }

    /// Single-string form used as an exact-match key by stores.
    ///
    /// Components are joined with the ASCII unit separator, which cannot
    /// appear in module or key names supplied through the writer.
    pub fn storage_key(&self) -> String {
        format!(
            "{}\u{1f}{}\u{1f}{}",
            self.module, self.entry_key, self.entry_id
        )
    }

    /// Whether the record belongs to this entry.
    pub fn matches(&self, record: &IndexRecord) -> bool {
        record.module == self.module
            && record.entry_key == self.entry_key
            && record.entry_id == self.entry_id
    }
}

impl fmt::Display for EntryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.module, self.entry_key, self.entry_id)
    }
}

/// One stored row of the search index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRecord {
    /// Owning content module (e.g. "blog").
    pub module: String,
    /// Singular type identifier (e.g. "blog:post").
    pub entry_key: String,
    /// Plural type identifier, used for filter grouping.
    pub entry_plural: String,
    /// Id of the source entry within its module.
    pub entry_id: u64,
    /// Canonical relative link to the entry.
    pub uri: String,
    /// Plain-text display title.
    pub title: String,
    /// Plain-text body.
    pub description: String,
    /// Canonical comma-joined keyword list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    /// Original keyword source, kept for external lookups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_hash: Option<String>,
    /// Administrative edit link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cp_edit_uri: Option<String>,
    /// Administrative delete link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cp_delete_uri: Option<String>,
}

impl IndexRecord {
    /// The identity triple of this record.
    pub fn entry_ref(&self) -> EntryRef {
        EntryRef::new(&self.module, &self.entry_key, self.entry_id)
    }

    /// The full-text fields in match order: title, description, keywords.
    pub fn text_fields(&self) -> [&str; 3] {
        [
            self.title.as_str(),
            self.description.as_str(),
            self.keywords.as_deref().unwrap_or(""),
        ]
    }
}

/// Keyword input for an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Keywords {
    /// Explicit keyword list, joined verbatim.
    List(Vec<String>),
    /// Keyword source string, resolved through a `KeywordNormalizer`.
    Source(String),
}

impl Keywords {
    /// Keyword list from any iterable of strings.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Keywords::List(items.into_iter().map(Into::into).collect())
    }

    /// Keyword source string.
    pub fn source(source: impl Into<String>) -> Self {
        Keywords::Source(source.into())
    }

    /// True when there is nothing to index.
    pub fn is_empty(&self) -> bool {
        match self {
            Keywords::List(items) => items.iter().all(|k| k.trim().is_empty()),
            Keywords::Source(source) => source.trim().is_empty(),
        }
    }
}

/// Optional indexing inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexOptions {
    /// Keywords for the entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Keywords>,
    /// Administrative edit link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cp_edit_uri: Option<String>,
    /// Administrative delete link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cp_delete_uri: Option<String>,
}

impl IndexOptions {
    /// Set the keywords.
    pub fn with_keywords(mut self, keywords: Keywords) -> Self {
        self.keywords = Some(keywords);
        self
    }

    /// Set the edit link.
    pub fn with_cp_edit_uri(mut self, uri: impl Into<String>) -> Self {
        self.cp_edit_uri = Some(uri.into());
        self
    }

    /// Set the delete link.
    pub fn with_cp_delete_uri(mut self, uri: impl Into<String>) -> Self {
        self.cp_delete_uri = Some(uri.into());
        self
    }
}

/// Everything a content module supplies when indexing an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    /// Owning content module.
    pub module: String,
    /// Singular type identifier.
    pub entry_key: String,
    /// Plural type identifier.
    pub entry_plural: String,
    /// Id of the entry within its module.
    pub entry_id: u64,
    /// Canonical relative link.
    pub uri: String,
    /// Display title (markup is stripped on write).
    pub title: String,
    /// Body text (markup is stripped on write).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Keywords and admin links.
    #[serde(default)]
    pub options: IndexOptions,
}

impl NewEntry {
    /// Create a new entry builder.
    pub fn builder() -> NewEntryBuilder {
        NewEntryBuilder::default()
    }

    /// The identity triple this entry will be stored under.
    pub fn entry_ref(&self) -> EntryRef {
        EntryRef::new(&self.module, &self.entry_key, self.entry_id)
    }
}

/// Builder for [`NewEntry`].
#[derive(Debug, Default)]
pub struct NewEntryBuilder {
    entry: NewEntry,
}

impl NewEntryBuilder {
    /// Set the owning module.
    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.entry.module = module.into();
        self
    }

    /// Set the singular type identifier.
    pub fn entry_key(mut self, entry_key: impl Into<String>) -> Self {
        self.entry.entry_key = entry_key.into();
        self
    }

    /// Set the plural type identifier.
    pub fn entry_plural(mut self, entry_plural: impl Into<String>) -> Self {
        self.entry.entry_plural = entry_plural.into();
        self
    }

    /// Set the entry id.
    pub fn entry_id(mut self, entry_id: u64) -> Self {
        self.entry.entry_id = entry_id;
        self
    }

    /// Set the canonical link.
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.entry.uri = uri.into();
        self
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.entry.title = title.into();
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.entry.description = Some(description.into());
        self
    }

    /// Set the optional inputs.
    pub fn options(mut self, options: IndexOptions) -> Self {
        self.entry.options = options;
        self
    }

    /// Finish building. Validation happens when the entry is indexed.
    pub fn build(self) -> NewEntry {
        self.entry
    }
}

/// A ranked search result as exposed to query callers.
///
/// Deliberately omits `cp_delete_uri` and `keyword_hash`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Display title.
    pub title: String,
    /// Plain-text body.
    pub description: String,
    /// Canonical keyword list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    /// Owning module.
    pub module: String,
    /// Singular type identifier.
    pub entry_key: String,
    /// Plural type identifier.
    pub entry_plural: String,
    /// Canonical link.
    pub uri: String,
    /// Administrative edit link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cp_edit_uri: Option<String>,
    /// Continuous relevance score (higher is better).
    pub relevance: f32,
}

impl SearchHit {
    /// Project a stored record into a hit.
    pub fn from_record(record: IndexRecord, relevance: f32) -> Self {
        Self {
            title: record.title,
            description: record.description,
            keywords: record.keywords,
            module: record.module,
            entry_key: record.entry_key,
            entry_plural: record.entry_plural,
            uri: record.uri,
            cp_edit_uri: record.cp_edit_uri,
            relevance,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
