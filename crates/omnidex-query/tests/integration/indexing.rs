//! Index, re-index and drop through the service.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use omnidex_core::{EntryRef, Error};
use omnidex_query::SearchParams;

use crate::common::{TestHarness, entry, hello_post};

#[tokio::test]
async fn test_reindex_keeps_single_record() {
    for harness in TestHarness::all().await {
        let index = &harness.index;

        let first = index.index(hello_post()).await.unwrap();
        let mut updated = hello_post();
        updated.title = "Hello Again".to_string();
        let second = index.index(updated).await.unwrap();

        assert!(second > first, "{}", harness.name());
        assert_eq!(index.record_count().await.unwrap(), 1, "{}", harness.name());

        let hits = index.search(&SearchParams::new("hello")).await.unwrap();
        assert_eq!(hits.len(), 1, "{}", harness.name());
        assert_eq!(hits[0].title, "Hello Again");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_reindex_never_hides_entry_from_queries() {
    for harness in TestHarness::all().await {
        let index = harness.index.clone();
        index.index(hello_post()).await.unwrap();

        let done = Arc::new(AtomicBool::new(false));
        let reader = tokio::spawn({
            let index = index.clone();
            let done = Arc::clone(&done);
            let name = harness.name().to_string();
            async move {
                let mut checks = 0usize;
                while checks == 0 || !done.load(Ordering::Acquire) {
                    assert_eq!(index.count("hello").await.unwrap(), 1, "{name}");
                    checks += 1;
                }
                checks
            }
        });

        for n in 0..50 {
            let mut updated = hello_post();
            updated.title = format!("Hello revision {n}");
            index.index(updated).await.unwrap();
        }
        done.store(true, Ordering::Release);

        let checks = reader.await.unwrap();
        assert!(checks > 0);
        assert_eq!(index.record_count().await.unwrap(), 1, "{}", harness.name());
    }
}

#[tokio::test]
async fn test_index_same_entry_twice_is_idempotent() {
    for harness in TestHarness::all().await {
        let index = &harness.index;
        index.index(hello_post()).await.unwrap();
        index.index(hello_post()).await.unwrap();

        assert_eq!(index.count("hello").await.unwrap(), 1, "{}", harness.name());
    }
}

#[tokio::test]
async fn test_drop_removes_from_search() {
    for harness in TestHarness::all().await {
        let index = &harness.index;
        index.index(hello_post()).await.unwrap();

        let removed = index
            .drop_index(&EntryRef::new("blog", "blog:post", 1))
            .await
            .unwrap();
        assert_eq!(removed, 1, "{}", harness.name());

        let hits = index.search(&SearchParams::new("hello")).await.unwrap();
        assert!(hits.is_empty(), "{}", harness.name());
        assert_eq!(index.count("hello").await.unwrap(), 0);
    }
}

#[tokio::test]
async fn test_drop_missing_entry_is_noop() {
    for harness in TestHarness::all().await {
        let removed = harness
            .index
            .drop_index(&EntryRef::new("blog", "blog:post", 404))
            .await
            .unwrap();
        assert_eq!(removed, 0, "{}", harness.name());
    }
}

#[tokio::test]
async fn test_drop_leaves_other_entries() {
    for harness in TestHarness::all().await {
        let index = &harness.index;
        index
            .index(entry("blog", "blog:posts", 1, "Harmony one", ""))
            .await
            .unwrap();
        index
            .index(entry("blog", "blog:posts", 2, "Harmony two", ""))
            .await
            .unwrap();

        index
            .drop_index(&EntryRef::new("blog", "blog:entry", 1))
            .await
            .unwrap();

        let hits = index.search(&SearchParams::new("harmony")).await.unwrap();
        assert_eq!(hits.len(), 1, "{}", harness.name());
        assert_eq!(hits[0].uri, "blog/2");
    }
}

#[tokio::test]
async fn test_invalid_entry_rejected() {
    for harness in TestHarness::all().await {
        let mut bad = hello_post();
        bad.title = "   ".to_string();

        let err = harness.index.index(bad).await.unwrap_err();
        assert!(matches!(err, Error::Validation { .. }), "{}", harness.name());
        assert!(!err.is_retryable());
        assert_eq!(harness.index.record_count().await.unwrap(), 0);
    }
}
