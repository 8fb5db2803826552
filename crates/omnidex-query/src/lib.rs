//! Indexing and query protocol for Omnidex.
//!
//! This crate layers the search protocol over an [`IndexStore`]:
//!
//! - [`IndexWriter`]: validate an entry, strip markup, resolve keywords,
//!   and atomically replace its record (`index`), or remove it
//!   (`drop_index`)
//! - [`QueryPlanner`]: sanitize query text, apply module/plural filters,
//!   qualify by boolean relevance, rank by continuous relevance and page
//!   (`filter`, `search`, `count`)
//! - [`SearchIndex`]: the service object bundling both over one store
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use omnidex_core::{IndexConfig, InlineKeywords};
//! use omnidex_query::{FilterSpec, SearchIndex, SearchParams};
//!
//! let index = SearchIndex::from_config(&IndexConfig::default(), Arc::new(InlineKeywords)).await?;
//!
//! let params = SearchParams::new("hello")
//!     .with_limit(10)
//!     .with_filter(FilterSpec::new().with("blog", "blog:posts"));
//!
//! for hit in index.search(&params).await? {
//!     println!("{} ({})", hit.title, hit.uri);
//! }
//! ```
//!
//! [`IndexStore`]: omnidex_store::IndexStore

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod filter;
pub mod planner;
pub mod query;
pub mod service;
pub mod stopwords;
pub mod writer;

#[cfg(test)]
mod proptests;

// Re-exports
pub use filter::{FilterSpec, Plurals};
pub use planner::{QueryPlanner, SearchParams};
pub use query::QueryBuilder;
pub use service::SearchIndex;
pub use stopwords::StopwordFilter;
pub use writer::IndexWriter;
