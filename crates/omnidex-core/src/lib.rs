//! Omnidex Core: shared types, errors, keyword normalization, and configuration.
//!
//! This crate has no internal Omnidex dependencies. The store and query
//! crates build on the types defined here.
//!
//! # Modules
//!
//! - [`error`]: Error taxonomy and Result alias
//! - [`record`]: Index records, entry identity, indexing input, search hits
//! - [`keywords`]: `KeywordNormalizer` collaborator and built-in normalizers
//! - [`config`]: `IndexConfig` loaded from TOML
//! - [`util`]: Markup stripping and term splitting

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod keywords;
pub mod record;
pub mod util;

// Re-export key types at crate root for convenience
pub use config::{IndexConfig, StoreBackend};
pub use error::{Error, Result};
pub use keywords::{InlineKeywords, KeywordNormalizer, KeywordTable};
pub use record::{
    EntryRef, IndexOptions, IndexRecord, Keywords, NewEntry, NewEntryBuilder, RecordId, SearchHit,
};
