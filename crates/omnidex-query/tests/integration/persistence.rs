//! On-disk indexes survive reopening.

use std::sync::Arc;

use omnidex_core::InlineKeywords;
use omnidex_query::{SearchIndex, SearchParams};

use crate::common::{entry, hello_post, tantivy_config};

#[tokio::test]
async fn test_reopen_keeps_records_and_ids() {
    let dir = tempfile::tempdir().unwrap();
    let config = tantivy_config(&dir);

    let first = {
        let index = SearchIndex::from_config(&config, Arc::new(InlineKeywords))
            .await
            .unwrap();
        index.index(hello_post()).await.unwrap()
    };

    let index = SearchIndex::from_config(&config, Arc::new(InlineKeywords))
        .await
        .unwrap();
    assert_eq!(index.store_name(), "tantivy");
    assert_eq!(index.record_count().await.unwrap(), 1);

    let hits = index.search(&SearchParams::new("hello")).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].description, "Hi");

    let next = index
        .index(entry("blog", "blog:posts", 2, "Second", ""))
        .await
        .unwrap();
    assert!(next > first);
}
