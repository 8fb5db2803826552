//! Index stores for Omnidex.
//!
//! A store owns the physical representation of index records and exposes
//! the primitives the query layer composes: atomic per-entry replace and
//! delete, and a full-text match that reports a boolean (prefix) relevance
//! and a continuous (BM25) relevance per candidate, with module/plural
//! filters pushed down.
//!
//! # Features
//!
//! - `store-tantivy`: Enable the Tantivy store (default)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      omnidex-store                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  IndexStore trait                                           │
//! │  ├── MemoryStore (linear scan + BM25 scorer)                │
//! │  └── TantivyStore (on disk or in RAM)                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MatchExpr (sanitized terms)                                │
//! │  EntryFilter (module → plurals disjunction)                 │
//! │  EntrySchema, ScoredDocs (Tantivy plumbing)                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use omnidex_store::{EntryFilter, MatchExpr, create_index_store};
//!
//! let store = create_index_store(&config).await?;
//! let expr = MatchExpr::new(["hello"])?;
//! let candidates = store.candidates(&expr, &EntryFilter::all()).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

// Core modules (always available)
pub mod filter;
pub mod memory;
pub mod scoring;
pub mod store;

// Feature-gated Tantivy modules
#[cfg(feature = "store-tantivy")]
pub mod collector;

#[cfg(feature = "store-tantivy")]
pub mod schema;

#[cfg(feature = "store-tantivy")]
pub mod tantivy_store;

// Re-exports
pub use filter::EntryFilter;
pub use memory::MemoryStore;
pub use store::{Candidate, IndexStore, MatchExpr, create_index_store};

#[cfg(feature = "store-tantivy")]
pub use schema::EntrySchema;

#[cfg(feature = "store-tantivy")]
pub use tantivy_store::TantivyStore;
