//! Index configuration.
//!
//! [`IndexConfig`] selects the store backend and tunes query handling. Every
//! field has a default, so an empty TOML file is a valid configuration:
//!
//! ```toml
//! backend = "tantivy"
//! index_path = "/var/lib/omnidex/index"
//! default_limit = 8
//! max_query_terms = 32
//! stopwords_enabled = true
//! custom_stopwords = []
//! allowlist = []
//! writer_memory_bytes = 50000000
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Smallest writer arena the tantivy store accepts.
pub const MIN_WRITER_MEMORY_BYTES: usize = 15_000_000;

/// Which store implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Tantivy full-text index (on disk or in RAM).
    #[default]
    Tantivy,
    /// Linear-scan in-memory store.
    Memory,
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tantivy => write!(f, "tantivy"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Configuration for the search index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Store backend.
    #[serde(default)]
    pub backend: StoreBackend,

    /// Directory of the tantivy index. `None` keeps the index in RAM.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_path: Option<String>,

    /// Page size used when a search does not specify a limit.
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Maximum number of distinct terms in a query.
    #[serde(default = "default_max_query_terms")]
    pub max_query_terms: usize,

    /// Enable stopword filtering of queries.
    #[serde(default = "default_true")]
    pub stopwords_enabled: bool,

    /// Extra stopwords.
    #[serde(default)]
    pub custom_stopwords: Vec<String>,

    /// Words never treated as stopwords (case-sensitive).
    #[serde(default)]
    pub allowlist: Vec<String>,

    /// Memory arena for the tantivy writer, in bytes.
    #[serde(default = "default_writer_memory_bytes")]
    pub writer_memory_bytes: usize,
}

fn default_limit() -> usize {
    8
}

fn default_max_query_terms() -> usize {
    32
}

fn default_true() -> bool {
    true
}

fn default_writer_memory_bytes() -> usize {
    50_000_000
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            index_path: None,
            default_limit: default_limit(),
            max_query_terms: default_max_query_terms(),
            stopwords_enabled: default_true(),
            custom_stopwords: Vec::new(),
            allowlist: Vec::new(),
            writer_memory_bytes: default_writer_memory_bytes(),
        }
    }
}

impl IndexConfig {
    /// Configuration for an in-memory store.
    pub fn memory() -> Self {
        Self {
            backend: StoreBackend::Memory,
            ..Default::default()
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| Error::config(format!("Invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("{}: {e}", path.display())))?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Render as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.default_limit == 0 {
            return Err(Error::config("default_limit must be at least 1"));
        }
        if self.max_query_terms == 0 {
            return Err(Error::config("max_query_terms must be at least 1"));
        }
        if self.writer_memory_bytes < MIN_WRITER_MEMORY_BYTES {
            return Err(Error::config(format!(
                "writer_memory_bytes must be at least {MIN_WRITER_MEMORY_BYTES}"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
