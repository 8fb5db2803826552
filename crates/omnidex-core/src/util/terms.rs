//! Term splitting.
//!
//! Indexed text and query text are split by the same rule: any character
//! that is not alphanumeric separates terms, and each piece is then
//! lowercased one character at a time. This mirrors a simple tokenizer
//! followed by a lowercasing filter, so a query term produced here lines up
//! with the terms a store holds for the fields.

/// Combining dot above, produced by lowercasing `İ` (U+0130).
const COMBINING_DOT_ABOVE: char = '\u{0307}';

/// Lowercase `piece` character by character.
///
/// Unlike [`str::to_lowercase`] there is no context-sensitive mapping, so
/// a final `Σ` becomes `σ` just as it does inside a word.
pub fn lowercase_term(piece: &str) -> String {
    piece.chars().flat_map(char::to_lowercase).collect()
}

/// Split raw `text` into pieces on every non-alphanumeric character,
/// without changing case.
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|piece| !piece.is_empty())
}

/// Split `text` into lowercase terms.
///
/// # Example
///
/// ```rust
/// use omnidex_core::util::terms::split_terms;
///
/// assert_eq!(split_terms("Hello, World!"), vec!["hello", "world"]);
/// assert_eq!(split_terms("*hello* +world"), vec!["hello", "world"]);
/// ```
pub fn split_terms(text: &str) -> Vec<String> {
    split_words(text).map(lowercase_term).collect()
}

/// Whether `term` is a single term as produced by [`split_terms`].
///
/// Lowercasing an alphanumeric character can yield a combining mark
/// (`İ` → `i̇`), so that mark is allowed after the first character.
pub fn is_plain_term(term: &str) -> bool {
    let mut chars = term.chars();
    match chars.next() {
        Some(first) if first.is_alphanumeric() => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == COMBINING_DOT_ABOVE) && lowercase_term(term) == term
}
