//! Chapter dataset
//!
//! The whole book is loaded into memory once at startup and never mutated.
//! Iteration order is reading order.

mod error;
mod models;

pub use error::{DatasetError, Result};
pub use models::Chapter;

use std::collections::HashSet;
use std::path::Path;

/// Sample book compiled into the binary, used when no dataset path is given.
const BUNDLED_DATASET: &str = include_str!("../../../data/sample_chapters.json");

/// Read-only, ordered collection of chapters.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    chapters: Vec<Chapter>,
}

impl Dataset {
    /// Build a dataset, rejecting duplicate ids. Order is kept as given.
    pub fn new(chapters: Vec<Chapter>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(chapters.len());
        for chapter in &chapters {
            if !seen.insert(chapter.id) {
                return Err(DatasetError::DuplicateId(chapter.id));
            }
        }
        Ok(Self { chapters })
    }

    /// Parse a JSON array of chapter objects.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let chapters: Vec<Chapter> = serde_json::from_str(json)?;
        Self::new(chapters)
    }

    /// Load a dataset file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_json_str(&contents)?;
        log::info!(
            "Loaded {} chapters from {}",
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// The sample dataset shipped inside the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED_DATASET)
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chapter> {
        self.chapters.iter()
    }

    /// Look up a chapter by id.
    pub fn get(&self, id: u32) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    pub fn first(&self) -> Option<&Chapter> {
        self.chapters.first()
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Chapter;
    type IntoIter = std::slice::Iter<'a, Chapter>;

    fn into_iter(self) -> Self::IntoIter {
        self.chapters.iter()
    }
}
