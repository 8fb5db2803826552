//! Ranked, filtered search through the service.

use omnidex_query::{FilterSpec, SearchParams};

use crate::common::{TestHarness, entry, hello_post};

#[tokio::test]
async fn test_hello_world_round_trip() {
    for harness in TestHarness::all().await {
        let index = &harness.index;
        index.index(hello_post()).await.unwrap();

        let hits = index.search(&SearchParams::new("hello")).await.unwrap();
        assert_eq!(hits.len(), 1, "{}", harness.name());

        let hit = &hits[0];
        assert_eq!(hit.title, "Hello World");
        assert_eq!(hit.description, "Hi");
        assert_eq!(hit.keywords.as_deref(), Some("hi,hello"));
        assert_eq!(hit.module, "blog");
        assert_eq!(hit.entry_plural, "blog:posts");
        assert_eq!(hit.uri, "blog/2024/01/hello");
    }
}

#[tokio::test]
async fn test_prefix_matches_across_fields() {
    for harness in TestHarness::all().await {
        let index = &harness.index;
        index
            .index(entry("blog", "blog:posts", 1, "Kubernetes", ""))
            .await
            .unwrap();
        index
            .index(entry("blog", "blog:posts", 2, "Notes", "running kubectl"))
            .await
            .unwrap();
        index
            .index(entry("blog", "blog:posts", 3, "Unrelated", ""))
            .await
            .unwrap();

        let hits = index.search(&SearchParams::new("kub")).await.unwrap();
        assert_eq!(hits.len(), 2, "{}", harness.name());
        assert_eq!(index.count("kub").await.unwrap(), 2);
    }
}

#[tokio::test]
async fn test_markup_is_not_searchable() {
    for harness in TestHarness::all().await {
        let index = &harness.index;
        index
            .index(entry("blog", "blog:posts", 1, "Plain", "<span class=\"zebra\">text</span>"))
            .await
            .unwrap();

        assert_eq!(index.count("zebra").await.unwrap(), 0, "{}", harness.name());
        assert_eq!(index.count("span").await.unwrap(), 0, "{}", harness.name());
    }
}

#[tokio::test]
async fn test_filter_returns_only_matching_module() {
    for harness in TestHarness::all().await {
        let index = &harness.index;
        index.index(hello_post()).await.unwrap();
        index
            .index(entry("pages", "pages:pages", 2, "Hello from pages", ""))
            .await
            .unwrap();

        let params =
            SearchParams::new("hello").with_filter(FilterSpec::new().with("blog", "blog:posts"));
        let hits = index.search(&params).await.unwrap();
        assert_eq!(hits.len(), 1, "{}", harness.name());
        assert_eq!(hits[0].module, "blog");

        let nothing = SearchParams::new("hello")
            .with_filter(FilterSpec::new().with("blog", Vec::<String>::new()));
        assert!(index.search(&nothing).await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_filter_disjunction() {
    for harness in TestHarness::all().await {
        let index = &harness.index;
        index
            .index(entry("blog", "blog:posts", 1, "cadence", ""))
            .await
            .unwrap();
        index
            .index(entry("blog", "blog:tags", 2, "cadence", ""))
            .await
            .unwrap();
        index
            .index(entry("pages", "pages:pages", 3, "cadence", ""))
            .await
            .unwrap();
        index
            .index(entry("shop", "shop:items", 4, "cadence", ""))
            .await
            .unwrap();

        let spec = FilterSpec::new()
            .with("blog", "blog:posts")
            .with("pages", vec!["pages:pages", "pages:drafts"]);
        let hits = index
            .search(&SearchParams::new("cadence").with_filter(spec))
            .await
            .unwrap();

        let mut uris: Vec<&str> = hits.iter().map(|h| h.uri.as_str()).collect();
        uris.sort_unstable();
        assert_eq!(uris, vec!["blog/1", "pages/3"], "{}", harness.name());
    }
}

#[tokio::test]
async fn test_relevance_non_increasing_and_count_matches() {
    for harness in TestHarness::all().await {
        let index = &harness.index;
        index
            .index(entry("blog", "blog:posts", 1, "tokio", "async runtime for rust programs"))
            .await
            .unwrap();
        index
            .index(entry("blog", "blog:posts", 2, "tokio tokio", "tokio"))
            .await
            .unwrap();
        index
            .index(entry("blog", "blog:posts", 3, "tokenizers", "prefix only"))
            .await
            .unwrap();

        let hits = index
            .search(&SearchParams::new("tok").with_limit(usize::MAX))
            .await
            .unwrap();
        assert_eq!(hits.len(), 3, "{}", harness.name());
        assert!(hits.windows(2).all(|w| w[0].relevance >= w[1].relevance));
        assert_eq!(index.count("tok").await.unwrap(), hits.len());

        let exact = index.search(&SearchParams::new("tokio")).await.unwrap();
        assert_eq!(exact[0].uri, "blog/2", "{}", harness.name());
    }
}

#[tokio::test]
async fn test_pagination_is_stable() {
    for harness in TestHarness::all().await {
        let index = &harness.index;
        for i in 1..=6 {
            index
                .index(entry("blog", "blog:posts", i, "harmony", ""))
                .await
                .unwrap();
        }

        let mut paged = Vec::new();
        for offset in (0..6).step_by(2) {
            let page = index
                .search(&SearchParams::new("harmony").with_limit(2).with_offset(offset))
                .await
                .unwrap();
            paged.extend(page.into_iter().map(|h| h.uri));
        }

        let all: Vec<String> = index
            .search(&SearchParams::new("harmony").with_limit(6))
            .await
            .unwrap()
            .into_iter()
            .map(|h| h.uri)
            .collect();

        assert_eq!(paged, all, "{}", harness.name());
        assert_eq!(all[0], "blog/1");
    }
}

#[tokio::test]
async fn test_query_syntax_is_inert() {
    for harness in TestHarness::all().await {
        let index = &harness.index;
        index.index(hello_post()).await.unwrap();

        let hits = index
            .search(&SearchParams::new("+hello* -\"world\" (hi)"))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1, "{}", harness.name());
        assert!(index.search(&SearchParams::new("*")).await.is_err());
    }
}

#[tokio::test]
async fn test_dotted_capital_i_matches_its_own_word() {
    for harness in TestHarness::all().await {
        let index = &harness.index;
        index
            .index(entry("blog", "blog:posts", 1, "İstanbul guide", ""))
            .await
            .unwrap();

        let hits = index.search(&SearchParams::new("İstanbul")).await.unwrap();
        assert_eq!(hits.len(), 1, "{}", harness.name());
        assert_eq!(index.count("İstanbul").await.unwrap(), 1, "{}", harness.name());
    }
}

#[tokio::test]
async fn test_final_sigma_matches_on_every_backend() {
    for harness in TestHarness::all().await {
        let index = &harness.index;
        index
            .index(entry("blog", "blog:posts", 1, "ΟΔΟΣ", ""))
            .await
            .unwrap();

        let hits = index.search(&SearchParams::new("ΟΔΟΣ")).await.unwrap();
        assert_eq!(hits.len(), 1, "{}", harness.name());
        assert_eq!(index.count("οδοσ").await.unwrap(), 1, "{}", harness.name());
    }
}
