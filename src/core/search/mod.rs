//! In-memory chapter search
//!
//! Filtering decides which chapters appear in the sidebar; snippet
//! extraction decides what each matching chapter shows under its title.
//! Everything here is pure: the same (dataset, query) pair always yields
//! the same result.

pub mod filter;
pub mod highlight;
pub mod listing;
pub mod snippets;

pub use filter::{chapter_matches, filter_chapters, is_blank};
pub use highlight::{QueryPattern, Segment};
pub use listing::{build_listing, match_count_label, ListingEntry, ListingPreview};
pub use snippets::{
    extract_snippets, Snippet, SnippetExtractor, SnippetSet, CONTEXT_CHARS, ELLIPSIS,
    MAX_SNIPPETS, MIN_QUERY_CHARS,
};
