//! Sidebar listing: filtered chapters paired with their preview.

use super::filter::filter_chapters;
use super::snippets::{SnippetExtractor, SnippetSet};
use crate::core::dataset::{Chapter, Dataset};

/// What a listing entry shows under the chapter title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingPreview<'a> {
    /// Highlighted excerpts of the full text.
    Snippets(SnippetSet),
    /// The events summary, used whenever no snippet was produced.
    Summary(&'a str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry<'a> {
    pub chapter: &'a Chapter,
    pub preview: ListingPreview<'a>,
}

/// Build the sidebar listing for `query`.
pub fn build_listing<'a>(dataset: &'a Dataset, query: &str) -> Vec<ListingEntry<'a>> {
    let extractor = SnippetExtractor::new(query);
    filter_chapters(dataset, query)
        .into_iter()
        .map(|chapter| {
            let snippets = match (&extractor, chapter.full_text()) {
                (Some(extractor), Some(text)) => extractor.extract(text),
                _ => SnippetSet::default(),
            };
            let preview = if snippets.is_empty() {
                ListingPreview::Summary(&chapter.events)
            } else {
                ListingPreview::Snippets(snippets)
            };
            ListingEntry { chapter, preview }
        })
        .collect()
}

/// "Found 1 chapter" / "Found 3 chapters".
pub fn match_count_label(count: usize) -> String {
    let noun = if count == 1 { "chapter" } else { "chapters" };
    format!("Found {count} {noun}")
}
