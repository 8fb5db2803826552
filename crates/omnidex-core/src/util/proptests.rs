//! Property-based tests for term splitting, keyword canonicalization and
//! markup stripping.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::keywords::canonicalize;
    use crate::util::markup::strip_markup;
    use crate::util::terms::{is_plain_term, lowercase_term, split_terms, split_words};
    use proptest::prelude::*;

    // Mixed-script text with query syntax sprinkled in.
    const TEXT: &str = "[A-Za-z0-9ÀÉÎÕÜàéîõüßİΑ-Ωα-ωςЀ-џ ,.;:!?*+\"()<>~-]{0,40}";
    const KEYWORD: &str = "[A-Za-zÀÉÜàéüİΑ-Ωα-ως ]{0,12}";

    proptest! {
        #[test]
        fn test_split_terms_are_plain(text in TEXT) {
            for term in split_terms(&text) {
                prop_assert!(is_plain_term(&term), "{term:?} from {text:?}");
            }
        }

        #[test]
        fn test_split_terms_lowercase_each_word(text in TEXT) {
            let words: Vec<String> = split_words(&text).map(lowercase_term).collect();
            prop_assert_eq!(split_terms(&text), words);
        }

        #[test]
        fn test_lowercase_term_is_idempotent(text in TEXT) {
            let once = lowercase_term(&text);
            prop_assert_eq!(lowercase_term(&once), once);
        }

        #[test]
        fn test_canonicalize_is_idempotent(keywords in prop::collection::vec(KEYWORD, 0..6)) {
            let once = canonicalize(&keywords);
            prop_assert_eq!(canonicalize(once.split(',')), once);
        }

        #[test]
        fn test_strip_markup_keeps_text_without_tags(text in "[^<]{0,40}") {
            prop_assert_eq!(strip_markup(&text), text);
        }

        #[test]
        fn test_strip_markup_unwraps_tag(tag in "[a-z]{1,6}", body in "[^<>]{0,20}") {
            let html = format!("<{tag} class=\"x\">{body}</{tag}>");
            prop_assert_eq!(strip_markup(&html), body);
        }
    }
}
