//! Detail pane contents for the active chapter.
//!
//! Produces display data only; the TUI decides how it looks.

use crate::core::dataset::Chapter;

/// Paragraphs shown before the preview is cut off.
pub const PREVIEW_PARAGRAPHS: usize = 20;

pub const NO_LOCATIONS: &str = "No locations listed";
pub const NO_CHARACTERS: &str = "No characters listed";
pub const TEXT_UNAVAILABLE: &str = "Text not available.";
pub const END_OF_PREVIEW: &str = "End of Preview";

/// The passage section of the detail pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Excerpt<'a> {
    /// No full text; show [`TEXT_UNAVAILABLE`].
    Unavailable,
    /// Up to [`PREVIEW_PARAGRAPHS`] cleaned paragraphs, followed by the
    /// [`END_OF_PREVIEW`] marker.
    Preview(Vec<&'a str>),
}

/// Everything the detail pane renders for one chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterDetail<'a> {
    pub title: Option<&'a str>,
    pub ordinal: Option<u32>,
    pub locations: &'a [String],
    pub characters: &'a [String],
    pub events: Option<&'a str>,
    pub excerpt: Excerpt<'a>,
}

impl<'a> ChapterDetail<'a> {
    /// Build the detail view. `None` (no active chapter) yields the
    /// empty-state fallbacks rather than failing.
    pub fn from_chapter(chapter: Option<&'a Chapter>) -> Self {
        match chapter {
            Some(c) => Self {
                title: Some(&c.title),
                ordinal: Some(c.ordinal()),
                locations: &c.locations,
                characters: &c.characters,
                events: Some(&c.events),
                excerpt: match c.full_text() {
                    Some(text) => Excerpt::Preview(excerpt_paragraphs(text)),
                    None => Excerpt::Unavailable,
                },
            },
            None => Self {
                title: None,
                ordinal: None,
                locations: &[],
                characters: &[],
                events: None,
                excerpt: Excerpt::Unavailable,
            },
        }
    }

    /// "Chapter N", or "Chapter" alone when nothing is selected.
    pub fn heading(&self) -> String {
        match self.ordinal {
            Some(n) => format!("Chapter {n}"),
            None => "Chapter".to_string(),
        }
    }

    /// Location names, or the single empty-state message.
    pub fn location_labels(&self) -> Vec<&'a str> {
        labels_or(self.locations, NO_LOCATIONS)
    }

    /// Character names, or the single empty-state message.
    pub fn character_labels(&self) -> Vec<&'a str> {
        labels_or(self.characters, NO_CHARACTERS)
    }

    pub fn has_locations(&self) -> bool {
        !self.locations.is_empty()
    }

    pub fn has_characters(&self) -> bool {
        !self.characters.is_empty()
    }
}

fn labels_or<'a>(items: &'a [String], empty: &'static str) -> Vec<&'a str> {
    if items.is_empty() {
        vec![empty]
    } else {
        items.iter().map(String::as_str).collect()
    }
}

/// Scanned page numbers: short runs of ASCII digits.
pub fn is_page_artifact(line: &str) -> bool {
    line.len() < 5 && !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit())
}

/// Split `full_text` into display paragraphs.
///
/// Lines are trimmed; blank lines and page-number artifacts are dropped;
/// at most [`PREVIEW_PARAGRAPHS`] survive.
pub fn excerpt_paragraphs(full_text: &str) -> Vec<&str> {
    full_text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_page_artifact(line))
        .take(PREVIEW_PARAGRAPHS)
        .collect()
}
