//! Snippet extraction around query occurrences in a chapter's full text.

use super::filter::is_blank;
use super::highlight::{QueryPattern, Segment};

/// At most this many snippets are produced per chapter.
pub const MAX_SNIPPETS: usize = 5;
/// Characters of context kept on each side of a match.
pub const CONTEXT_CHARS: usize = 30;
/// Queries shorter than this produce no snippets.
pub const MIN_QUERY_CHARS: usize = 2;
/// Marker for a window clamped before the text boundary.
pub const ELLIPSIS: &str = "...";

/// Excerpt around one occurrence of the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// Window text split into plain and matched runs.
    pub segments: Vec<Segment>,
    /// Text exists before the window.
    pub truncated_start: bool,
    /// Text exists after the window.
    pub truncated_end: bool,
}

impl Snippet {
    /// Window text without ellipses.
    pub fn window(&self) -> String {
        self.segments.iter().map(Segment::text).collect()
    }

    /// Window text with leading/trailing ellipses applied.
    pub fn display_text(&self) -> String {
        let mut out = String::new();
        if self.truncated_start {
            out.push_str(ELLIPSIS);
        }
        out.push_str(&self.window());
        if self.truncated_end {
            out.push_str(ELLIPSIS);
        }
        out
    }

    /// The matched runs inside this snippet.
    pub fn matched(&self) -> impl Iterator<Item = &str> {
        self.segments
            .iter()
            .filter(|s| s.is_match())
            .map(Segment::text)
    }
}

/// Snippets for one chapter plus the "more results exist" marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetSet {
    pub snippets: Vec<Snippet>,
    /// More than [`MAX_SNIPPETS`] occurrences exist in the text.
    pub has_more: bool,
}

impl SnippetSet {
    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snippet> {
        self.snippets.iter()
    }
}

/// Reusable extractor for one query, compiled once per listing pass.
#[derive(Debug, Clone)]
pub struct SnippetExtractor {
    pattern: QueryPattern,
}

impl SnippetExtractor {
    /// `None` when the query is blank or shorter than [`MIN_QUERY_CHARS`].
    pub fn new(query: &str) -> Option<Self> {
        if is_blank(query) || query.chars().count() < MIN_QUERY_CHARS {
            return None;
        }
        QueryPattern::new(query).map(|pattern| Self { pattern })
    }

    pub fn extract(&self, full_text: &str) -> SnippetSet {
        let mut matches = self.pattern.find_iter(full_text);
        let mut snippets = Vec::new();

        for m in matches.by_ref().take(MAX_SNIPPETS) {
            let start = chars_back(full_text, m.start(), CONTEXT_CHARS);
            let end = chars_forward(full_text, m.end(), CONTEXT_CHARS);
            snippets.push(Snippet {
                segments: self.pattern.split(&full_text[start..end]),
                truncated_start: start > 0,
                truncated_end: end < full_text.len(),
            });
        }

        let has_more = snippets.len() == MAX_SNIPPETS && matches.next().is_some();
        SnippetSet { snippets, has_more }
    }
}

/// Extract up to [`MAX_SNIPPETS`] highlighted snippets of `full_text`.
///
/// Absent text, a blank query, or a query under [`MIN_QUERY_CHARS`]
/// characters yields an empty set.
pub fn extract_snippets(full_text: Option<&str>, query: &str) -> SnippetSet {
    match (full_text, SnippetExtractor::new(query)) {
        (Some(text), Some(extractor)) => extractor.extract(text),
        _ => SnippetSet::default(),
    }
}

/// Byte offset `n` chars before `from`, clamped to 0.
fn chars_back(text: &str, from: usize, n: usize) -> usize {
    text[..from]
        .char_indices()
        .rev()
        .take(n)
        .last()
        .map_or(from, |(i, _)| i)
}

/// Byte offset `n` chars after `from`, clamped to the text length.
fn chars_forward(text: &str, from: usize, n: usize) -> usize {
    text[from..]
        .char_indices()
        .nth(n)
        .map_or(text.len(), |(i, _)| from + i)
}
