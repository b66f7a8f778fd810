//! Property-based tests for chapter filtering and snippet extraction
//!
//! Tests invariants:
//! - A blank query is the identity filter
//! - Filtered chapters are an order-preserving subsequence of the dataset
//! - A chapter is kept exactly when one of its searchable fields matches
//! - Case never changes which chapters match
//! - Snippet count, window size and content stay within bounds

use proptest::prelude::*;

use crate::core::dataset::{Chapter, Dataset};
use crate::core::search::{
    extract_snippets, filter_chapters, CONTEXT_CHARS, MAX_SNIPPETS, MIN_QUERY_CHARS,
};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

/// Short lowercase-and-uppercase prose so random queries actually hit.
fn arb_prose() -> impl Strategy<Value = String> {
    "[a-cA-C ]{0,60}"
}

fn arb_chapter_fields() -> impl Strategy<Value = (String, String, Vec<String>, Option<String>)> {
    (
        "[a-cA-C ]{1,12}",
        arb_prose(),
        prop::collection::vec("[a-cA-C]{1,6}", 0..3),
        prop::option::of(arb_prose()),
    )
}

/// A dataset of up to eight chapters with ids in order.
fn arb_dataset() -> impl Strategy<Value = Dataset> {
    prop::collection::vec(arb_chapter_fields(), 0..8).prop_map(|fields| {
        let chapters = fields
            .into_iter()
            .enumerate()
            .map(|(i, (title, events, characters, full_text))| Chapter {
                id: i as u32,
                title,
                events,
                characters,
                locations: vec!["Nowhere".to_string()],
                full_text,
            })
            .collect();
        Dataset::new(chapters).unwrap()
    })
}

fn arb_query() -> impl Strategy<Value = String> {
    "[a-cA-C]{1,3}"
}

fn field_matches(chapter: &Chapter, needle: &str) -> bool {
    let hit = |s: &str| s.to_lowercase().contains(needle);
    hit(&chapter.title)
        || hit(&chapter.events)
        || chapter.characters.iter().any(|c| hit(c))
        || chapter.full_text().is_some_and(hit)
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Blank queries keep every chapter in order
    #[test]
    fn prop_blank_query_is_identity(
        dataset in arb_dataset(),
        blank in "[ \t\n]{0,4}"
    ) {
        let ids: Vec<u32> = filter_chapters(&dataset, &blank).iter().map(|c| c.id).collect();
        let all: Vec<u32> = dataset.iter().map(|c| c.id).collect();
        prop_assert_eq!(ids, all);
    }

    /// Property: Results are an order-preserving subsequence
    #[test]
    fn prop_filter_preserves_order(dataset in arb_dataset(), query in arb_query()) {
        let ids: Vec<u32> = filter_chapters(&dataset, &query).iter().map(|c| c.id).collect();
        prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(ids.iter().all(|id| dataset.contains(*id)));
    }

    /// Property: Kept exactly when a searchable field contains the query
    #[test]
    fn prop_filter_keeps_exactly_matching(dataset in arb_dataset(), query in arb_query()) {
        let needle = query.to_lowercase();
        let kept: Vec<u32> = filter_chapters(&dataset, &query).iter().map(|c| c.id).collect();
        for chapter in dataset.iter() {
            prop_assert_eq!(
                kept.contains(&chapter.id),
                field_matches(chapter, &needle),
                "chapter {} with query {:?}",
                chapter.id,
                &query
            );
        }
    }

    /// Property: Locations are never searched
    #[test]
    fn prop_locations_not_searched(dataset in arb_dataset()) {
        prop_assert!(filter_chapters(&dataset, "nowhere").is_empty());
    }

    /// Property: Upper and lower case queries select the same chapters
    #[test]
    fn prop_filter_ignores_case(dataset in arb_dataset(), query in arb_query()) {
        let lower: Vec<u32> = filter_chapters(&dataset, &query.to_lowercase())
            .iter()
            .map(|c| c.id)
            .collect();
        let upper: Vec<u32> = filter_chapters(&dataset, &query.to_uppercase())
            .iter()
            .map(|c| c.id)
            .collect();
        prop_assert_eq!(lower, upper);
    }

    /// Property: Never more than five snippets; more flag only when capped
    #[test]
    fn prop_snippet_count_bounded(text in "[ab ]{0,200}", query in "[ab]{2,3}") {
        let set = extract_snippets(Some(&text), &query);
        prop_assert!(set.len() <= MAX_SNIPPETS);
        if set.has_more {
            prop_assert_eq!(set.len(), MAX_SNIPPETS);
        }
    }

    /// Property: Each snippet contains the query and fits its window
    #[test]
    fn prop_snippet_window_bounded(text in "[a-cA-C ]{0,200}", query in "[a-c]{2,3}") {
        let set = extract_snippets(Some(&text), &query);
        for snippet in set.iter() {
            let window = snippet.window();
            prop_assert!(window.to_lowercase().contains(&query));
            prop_assert!(window.chars().count() <= CONTEXT_CHARS * 2 + query.chars().count());
            prop_assert!(snippet.matched().all(|m| m.eq_ignore_ascii_case(&query)));
        }
    }

    /// Property: Ellipsis flags mirror whether text was cut
    #[test]
    fn prop_snippet_ellipses_match_text_bounds(text in "[ab ]{0,120}", query in "[ab]{2}") {
        let set = extract_snippets(Some(&text), &query);
        for snippet in set.iter() {
            let window = snippet.window();
            if !snippet.truncated_start {
                prop_assert!(text.starts_with(&window));
            }
            if !snippet.truncated_end {
                prop_assert!(text.ends_with(&window));
            }
        }
    }

    /// Property: Queries under the minimum length never produce snippets
    #[test]
    fn prop_short_query_no_snippets(text in "[a-c ]{0,100}", query in "[a-c]") {
        prop_assert!(query.chars().count() < MIN_QUERY_CHARS);
        prop_assert!(extract_snippets(Some(&text), &query).is_empty());
    }
}
