//! Property-based tests for search ranking, filtering and counting.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use omnidex_core::{IndexConfig, InlineKeywords, NewEntry};
    use omnidex_store::{IndexStore, MemoryStore};
    use proptest::prelude::*;

    use crate::{FilterSpec, SearchIndex, SearchParams};

    const WORDS: [&str; 6] = ["harmony", "cadence", "tokio", "serde", "zebra", "kubernetes"];
    const KINDS: [(&str, &str); 4] = [
        ("blog", "blog:posts"),
        ("blog", "blog:tags"),
        ("pages", "pages:pages"),
        ("shop", "shop:items"),
    ];

    fn text() -> impl Strategy<Value = String> {
        prop::collection::vec(prop::sample::select(WORDS.to_vec()), 1..6)
            .prop_map(|words| words.join(" "))
    }

    fn entries() -> impl Strategy<Value = Vec<(usize, String, String)>> {
        prop::collection::vec((0..KINDS.len(), text(), text()), 0..12)
    }

    fn query() -> impl Strategy<Value = String> {
        (prop::sample::select(WORDS.to_vec()), 3usize..8)
            .prop_map(|(word, len)| word.chars().take(len).collect())
    }

    fn filter_spec() -> impl Strategy<Value = FilterSpec> {
        prop::collection::vec(0..KINDS.len(), 0..3).prop_map(|picks| {
            picks.into_iter().fold(FilterSpec::new(), |spec, i| {
                let (module, plural) = KINDS[i];
                spec.with(module, plural)
            })
        })
    }

    fn build(entries: &[(usize, String, String)]) -> SearchIndex {
        let store: Arc<dyn IndexStore> = Arc::new(MemoryStore::new());
        let index = SearchIndex::new(store, Arc::new(InlineKeywords), &IndexConfig::memory());

        tokio_test::block_on(async {
            for (i, (kind, title, description)) in entries.iter().enumerate() {
                let (module, plural) = KINDS[*kind];
                let entry = NewEntry::builder()
                    .module(module)
                    .entry_key(format!("{module}:entry"))
                    .entry_plural(plural)
                    .entry_id(i as u64 + 1)
                    .uri(format!("{module}/{}", i + 1))
                    .title(title.clone())
                    .description(description.clone())
                    .build();
                index.index(entry).await.unwrap();
            }
        });
        index
    }

    proptest! {
        #[test]
        fn test_filter_never_leaks(entries in entries(), q in query(), spec in filter_spec()) {
            let index = build(&entries);
            let filter = spec.to_entry_filter();
            let params = SearchParams::new(q)
                .with_limit(usize::MAX)
                .with_filter(spec);

            let hits = tokio_test::block_on(index.search(&params)).unwrap();
            for hit in hits {
                prop_assert!(filter.matches(&hit.module, &hit.entry_plural));
            }
        }

        #[test]
        fn test_count_equals_unpaged_search(entries in entries(), q in query()) {
            let index = build(&entries);
            let hits = tokio_test::block_on(
                index.search(&SearchParams::new(q.clone()).with_limit(usize::MAX)),
            )
            .unwrap();
            let count = tokio_test::block_on(index.count(&q)).unwrap();
            prop_assert_eq!(count, hits.len());
        }

        #[test]
        fn test_relevance_non_increasing(entries in entries(), q in query()) {
            let index = build(&entries);
            let hits = tokio_test::block_on(
                index.search(&SearchParams::new(q).with_limit(usize::MAX)),
            )
            .unwrap();
            prop_assert!(hits.windows(2).all(|w| w[0].relevance >= w[1].relevance));
        }

        #[test]
        fn test_pages_concatenate_to_full_result(
            entries in entries(),
            q in query(),
            page in 1usize..4,
        ) {
            let index = build(&entries);
            let full = tokio_test::block_on(
                index.search(&SearchParams::new(q.clone()).with_limit(usize::MAX)),
            )
            .unwrap();

            let mut paged = Vec::new();
            let mut offset = 0;
            while offset < full.len() {
                let params = SearchParams::new(q.clone()).with_limit(page).with_offset(offset);
                paged.extend(tokio_test::block_on(index.search(&params)).unwrap());
                offset += page;
            }
            prop_assert_eq!(paged, full);
        }
    }
}
