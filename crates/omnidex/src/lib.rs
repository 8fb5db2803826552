//! Omnidex unified search index, umbrella crate.
//!
//! This crate re-exports all Omnidex components for convenience.
//! Use feature flags to enable specific functionality.

#![doc = include_str!("../README.md")]

pub use omnidex_core as core;
pub use omnidex_query as query;
pub use omnidex_store as store;

#[cfg(feature = "cli")]
pub use omnidex_cli as cli;
