//! Chapter record as stored in the dataset file.

use serde::{Deserialize, Serialize};

/// One chapter of the book. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Unique id; also the reading order (0 is first).
    pub id: u32,
    /// Display title.
    #[serde(rename = "chapter")]
    pub title: String,
    /// Short prose summary of the chapter's key events.
    pub events: String,
    #[serde(default)]
    pub characters: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    /// Verbatim chapter text, newline-separated paragraphs.
    #[serde(default)]
    pub full_text: Option<String>,
}

impl Chapter {
    /// One-based position shown in the UI.
    pub fn ordinal(&self) -> u32 {
        self.id.saturating_add(1)
    }

    pub fn full_text(&self) -> Option<&str> {
        self.full_text.as_deref()
    }
}
