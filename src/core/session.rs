//! Reader session: the (query, selection) pair and everything derived
//! from it.
//!
//! Derived values are recomputed on every read. The dataset is small and
//! the work is a linear scan, so there is nothing to cache or invalidate.

use miette::Diagnostic;
use thiserror::Error;

use crate::core::dataset::{Chapter, Dataset};
use crate::core::detail::ChapterDetail;
use crate::core::search::{self, ListingEntry};

#[derive(Error, Debug, Diagnostic, PartialEq, Eq)]
pub enum SessionError {
    #[error("No chapter with id {0}")]
    #[diagnostic(code("MEMOIR::UNKNOWN_CHAPTER"))]
    UnknownChapter(u32),
}

/// Session-local view state over a read-only dataset.
#[derive(Debug, Clone)]
pub struct ReaderSession {
    dataset: Dataset,
    /// `None` only when the dataset is empty.
    active_chapter_id: Option<u32>,
    query: String,
}

impl ReaderSession {
    /// Start a session with the first chapter active and no query.
    pub fn new(dataset: Dataset) -> Self {
        let active_chapter_id = dataset.first().map(|c| c.id);
        Self {
            dataset,
            active_chapter_id,
            query: String::new(),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn active_chapter_id(&self) -> Option<u32> {
        self.active_chapter_id
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    // ── Transitions ─────────────────────────────────────────────────────

    /// Make chapter `id` the active chapter.
    pub fn select_chapter(&mut self, id: u32) -> Result<(), SessionError> {
        if !self.dataset.contains(id) {
            return Err(SessionError::UnknownChapter(id));
        }
        log::debug!("Selected chapter {id}");
        self.active_chapter_id = Some(id);
        Ok(())
    }

    /// Replace the query wholesale.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
    }

    // ── Derived view ────────────────────────────────────────────────────

    /// Whether a non-blank query is in effect.
    pub fn is_searching(&self) -> bool {
        !search::is_blank(&self.query)
    }

    pub fn filtered_chapters(&self) -> Vec<&Chapter> {
        search::filter_chapters(&self.dataset, &self.query)
    }

    pub fn listing(&self) -> Vec<ListingEntry<'_>> {
        search::build_listing(&self.dataset, &self.query)
    }

    /// "Found N chapters", shown only while searching.
    pub fn match_count_label(&self) -> Option<String> {
        if self.query.is_empty() {
            return None;
        }
        Some(search::match_count_label(self.filtered_chapters().len()))
    }

    pub fn active_chapter(&self) -> Option<&Chapter> {
        self.active_chapter_id.and_then(|id| self.dataset.get(id))
    }

    pub fn detail(&self) -> ChapterDetail<'_> {
        ChapterDetail::from_chapter(self.active_chapter())
    }
}
