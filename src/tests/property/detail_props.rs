//! Property-based tests for passage preview cleaning
//!
//! Tests invariants:
//! - At most twenty paragraphs are kept
//! - Kept paragraphs are trimmed and non-empty
//! - Page-number lines never survive

use proptest::prelude::*;

use crate::core::detail::{excerpt_paragraphs, is_page_artifact, PREVIEW_PARAGRAPHS};

/// Lines mixing prose, blanks, padding and page numbers.
fn arb_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z ,.]{1,40}",
        Just(String::new()),
        "[ \t]{1,4}",
        "[0-9]{1,4}",
        "[0-9]{5,6}",
    ]
}

fn arb_full_text() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_line(), 0..60).prop_map(|lines| lines.join("\n"))
}

proptest! {
    /// Property: Preview length is capped
    #[test]
    fn prop_preview_capped(text in arb_full_text()) {
        prop_assert!(excerpt_paragraphs(&text).len() <= PREVIEW_PARAGRAPHS);
    }

    /// Property: Paragraphs are trimmed, non-empty and not page numbers
    #[test]
    fn prop_paragraphs_clean(text in arb_full_text()) {
        for paragraph in excerpt_paragraphs(&text) {
            prop_assert!(!paragraph.is_empty());
            prop_assert_eq!(paragraph, paragraph.trim());
            prop_assert!(!is_page_artifact(paragraph));
        }
    }

    /// Property: Long digit runs are content, not page numbers
    #[test]
    fn prop_long_numbers_kept(digits in "[0-9]{5,8}") {
        prop_assert_eq!(excerpt_paragraphs(&digits), vec![digits.as_str()]);
    }
}
