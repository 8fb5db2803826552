//! Output formatting for search hits.

use anyhow::Result;
use omnidex_core::SearchHit;
use serde::Serialize;

/// Maximum characters of description shown in the table.
const SNIPPET_MAX_LEN: usize = 120;

/// JSON document printed by `search --json`.
#[derive(Serialize)]
pub struct JsonOutput<'a> {
    /// Query as typed.
    pub query: &'a str,
    /// Ranked hits.
    pub hits: &'a [SearchHit],
}

/// Format hits as pretty JSON.
pub fn format_json(query: &str, hits: &[SearchHit]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonOutput { query, hits })?)
}

/// Format hits as a numbered plain-text table.
pub fn format_table(query: &str, hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return format!("No results found for \"{query}\"");
    }

    let mut output = format!(
        "Found {} hit{} for \"{query}\":\n\n",
        hits.len(),
        if hits.len() == 1 { "" } else { "s" }
    );

    for (i, hit) in hits.iter().enumerate() {
        output.push_str(&format!(
            "{}. {} [{} / {}] (relevance: {:.2})\n",
            i + 1,
            hit.title,
            hit.module,
            hit.entry_plural,
            hit.relevance
        ));
        output.push_str(&format!("   {}\n", hit.uri));
        if !hit.description.is_empty() {
            output.push_str(&format!(
                "   {}\n",
                truncate_text(&hit.description, SNIPPET_MAX_LEN)
            ));
        }
        if let Some(keywords) = &hit.keywords {
            output.push_str(&format!("   keywords: {keywords}\n"));
        }
        output.push('\n');
    }

    output.trim_end().to_string()
}

/// Truncate at a word boundary near `max_len` characters.
fn truncate_text(text: &str, max_len: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_len {
        return text.to_string();
    }

    let truncated: String = text.chars().take(max_len).collect();
    match truncated.rfind(' ') {
        Some(last_space) => format!("{}...", &truncated[..last_space]),
        None => format!("{truncated}..."),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn hit(title: &str, description: &str) -> SearchHit {
        SearchHit {
            title: title.to_string(),
            description: description.to_string(),
            keywords: Some("hi,hello".to_string()),
            module: "blog".to_string(),
            entry_key: "blog:post".to_string(),
            entry_plural: "blog:posts".to_string(),
            uri: "blog/2024/01/hello".to_string(),
            cp_edit_uri: None,
            relevance: 1.5,
        }
    }

    #[test]
    fn test_format_table_empty() {
        assert_eq!(format_table("hello", &[]), "No results found for \"hello\"");
    }

    #[test]
    fn test_format_table_single() {
        let output = format_table("hello", &[hit("Hello World", "Hi")]);
        assert!(output.starts_with("Found 1 hit for \"hello\""));
        assert!(output.contains("1. Hello World [blog / blog:posts] (relevance: 1.50)"));
        assert!(output.contains("blog/2024/01/hello"));
        assert!(output.contains("keywords: hi,hello"));
    }

    #[test]
    fn test_format_json() {
        let output = format_json("hello", &[hit("Hello World", "Hi")]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["query"], "hello");
        assert_eq!(value["hits"][0]["title"], "Hello World");
        assert!(value["hits"][0].get("cp_edit_uri").is_none());
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 50), "short");

        let long = "a much longer description that goes on and on past the limit";
        let truncated = truncate_text(long, 20);
        assert!(truncated.ends_with("..."));
        assert!(truncated.chars().count() <= 23);
    }
}
