//! Chapter filtering by case-insensitive substring.

use crate::core::dataset::{Chapter, Dataset};

/// An empty or whitespace-only query means "no search active".
pub fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}

/// Whether any searchable field of `chapter` contains `needle`.
///
/// `needle` must already be lowercased.
pub fn chapter_matches(chapter: &Chapter, needle: &str) -> bool {
    chapter.title.to_lowercase().contains(needle)
        || chapter.events.to_lowercase().contains(needle)
        || chapter
            .characters
            .iter()
            .any(|name| name.to_lowercase().contains(needle))
        || chapter
            .full_text()
            .is_some_and(|text| text.to_lowercase().contains(needle))
}

/// Chapters matching `query`, in dataset order.
///
/// A blank query returns every chapter.
pub fn filter_chapters<'a>(dataset: &'a Dataset, query: &str) -> Vec<&'a Chapter> {
    if is_blank(query) {
        return dataset.iter().collect();
    }
    let needle = query.to_lowercase();
    dataset
        .iter()
        .filter(|chapter| chapter_matches(chapter, &needle))
        .collect()
}
