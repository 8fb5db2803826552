//! Keyword normalization.
//!
//! When an entry supplies its keywords as a single string, the writer hands
//! that string to a [`KeywordNormalizer`] and stores the result as the
//! entry's canonical keyword list. The raw string itself is kept as the
//! record's `keyword_hash` so other systems can find entries by it.
//!
//! Two normalizers ship with the crate:
//!
//! - [`InlineKeywords`]: the raw string *is* the keyword list
//!   (`"Rust, async ,rust"` becomes `"rust,async"`).
//! - [`KeywordTable`]: the raw string is a hash previously returned by
//!   [`KeywordTable::register`]; it resolves to the registered list.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use crate::error::{Error, Result};
use crate::util::terms::lowercase_term;

/// Turns a raw keyword string into a canonical comma-joined keyword string.
pub trait KeywordNormalizer: Send + Sync {
    /// Resolve `raw` into canonical keywords.
    ///
    /// An empty result means the entry has no keywords.
    fn normalize(&self, raw: &str) -> Result<String>;
}

/// Canonicalize a keyword list: trim, lowercase, drop empties, and keep the
/// first occurrence of each keyword.
pub fn canonicalize<I, S>(keywords: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out: Vec<String> = Vec::new();

    for keyword in keywords {
        let keyword = lowercase_term(keyword.as_ref().trim());
        if keyword.is_empty() {
            continue;
        }
        if seen.insert(keyword.clone()) {
            out.push(keyword);
        }
    }

    out.join(",")
}

/// Normalizer that parses the raw string as a comma-separated keyword list.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineKeywords;

impl KeywordNormalizer for InlineKeywords {
    fn normalize(&self, raw: &str) -> Result<String> {
        Ok(canonicalize(raw.split(',')))
    }
}

/// In-memory registry mapping keyword hashes to canonical keyword lists.
///
/// # Example
///
/// ```rust
/// use omnidex_core::keywords::{KeywordNormalizer, KeywordTable};
///
/// let table = KeywordTable::new();
/// let hash = table.register(["Rust", "Tokio"]).unwrap();
///
/// assert_eq!(table.normalize(&hash).unwrap(), "rust,tokio");
/// assert_eq!(table.normalize("unknown").unwrap(), "");
/// ```
#[derive(Debug, Default)]
pub struct KeywordTable {
    entries: RwLock<HashMap<String, String>>,
}

impl KeywordTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a keyword list and return its stable hash.
    ///
    /// The hash is the hex BLAKE3 digest of the canonical list, so the same
    /// keywords in any case or with duplicates always map to the same hash.
    pub fn register<I, S>(&self, keywords: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let canonical = canonicalize(keywords);
        let hash = Self::hash_of(&canonical);

        let mut entries = self
            .entries
            .write()
            .map_err(|_| Error::storage("keyword table lock poisoned"))?;
        entries.insert(hash.clone(), canonical);

        Ok(hash)
    }

    /// Hash a canonical keyword string.
    pub fn hash_of(canonical: &str) -> String {
        blake3::hash(canonical.as_bytes()).to_hex().to_string()
    }

    /// Number of registered keyword lists.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeywordNormalizer for KeywordTable {
    fn normalize(&self, raw: &str) -> Result<String> {
        let entries = self
            .entries
            .read()
            .map_err(|_| Error::storage("keyword table lock poisoned"))?;

        match entries.get(raw.trim()) {
            Some(keywords) => Ok(keywords.clone()),
            None => {
                log::debug!("No keywords registered for hash '{raw}'");
                Ok(String::new())
            }
        }
    }
}
