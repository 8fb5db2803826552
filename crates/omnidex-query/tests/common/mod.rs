//! Common test utilities for Omnidex integration tests.

use std::sync::Arc;

use omnidex_core::{IndexConfig, IndexOptions, InlineKeywords, Keywords, NewEntry, StoreBackend};
use omnidex_query::SearchIndex;
use tempfile::TempDir;

/// A search service plus whatever keeps its storage alive.
pub struct TestHarness {
    /// The service under test.
    pub index: SearchIndex,
    /// Index directory for on-disk stores.
    #[allow(dead_code)]
    pub dir: Option<TempDir>,
}

impl TestHarness {
    /// Service over an in-memory store.
    pub async fn memory() -> Self {
        let index = SearchIndex::from_config(&IndexConfig::memory(), Arc::new(InlineKeywords))
            .await
            .unwrap();
        Self { index, dir: None }
    }

    /// Service over a Tantivy index in a fresh temporary directory.
    pub async fn tantivy() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = tantivy_config(&dir);
        let index = SearchIndex::from_config(&config, Arc::new(InlineKeywords))
            .await
            .unwrap();
        assert_eq!(index.store_name(), "tantivy");
        Self {
            index,
            dir: Some(dir),
        }
    }

    /// One harness per backend.
    pub async fn all() -> Vec<Self> {
        vec![Self::memory().await, Self::tantivy().await]
    }

    /// Backend name for assertion messages.
    pub fn name(&self) -> &str {
        self.index.store_name()
    }
}

/// Configuration for a Tantivy index inside `dir`.
pub fn tantivy_config(dir: &TempDir) -> IndexConfig {
    IndexConfig {
        backend: StoreBackend::Tantivy,
        index_path: Some(dir.path().join("index").to_string_lossy().to_string()),
        writer_memory_bytes: 15_000_000,
        ..Default::default()
    }
}

/// The "Hello World" blog post used throughout.
pub fn hello_post() -> NewEntry {
    NewEntry::builder()
        .module("blog")
        .entry_key("blog:post")
        .entry_plural("blog:posts")
        .entry_id(1)
        .uri("blog/2024/01/hello")
        .title("Hello World")
        .description("<p>Hi</p>")
        .options(IndexOptions::default().with_keywords(Keywords::source("hi,hello")))
        .build()
}

/// A minimal entry.
pub fn entry(module: &str, plural: &str, id: u64, title: &str, description: &str) -> NewEntry {
    NewEntry::builder()
        .module(module)
        .entry_key(format!("{module}:entry"))
        .entry_plural(plural)
        .entry_id(id)
        .uri(format!("{module}/{id}"))
        .title(title)
        .description(description)
        .build()
}
