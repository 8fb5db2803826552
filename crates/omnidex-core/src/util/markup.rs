//! Markup stripping.
//!
//! Titles and descriptions are stored as plain text. [`strip_markup`] removes
//! HTML comments and tags and leaves every other character untouched,
//! including entities and whitespace.

use std::sync::LazyLock;

use regex::Regex;

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("Invalid comment regex"));

// A tag opens with a letter, `/`, `!` or `?`; a bare `<` followed by a space
// or digit is ordinary text.
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[A-Za-z/!?][^>]*>").expect("Invalid tag regex"));

/// Remove HTML comments and tags from `text`.
///
/// # Example
///
/// ```rust
/// use omnidex_core::util::markup::strip_markup;
///
/// assert_eq!(strip_markup("<p>Hi <b>there</b></p>"), "Hi there");
/// assert_eq!(strip_markup("1 < 2"), "1 < 2");
/// ```
pub fn strip_markup(text: &str) -> String {
    if !text.contains('<') {
        return text.to_string();
    }

    let without_comments = COMMENT_RE.replace_all(text, "");
    TAG_RE.replace_all(&without_comments, "").into_owned()
}
