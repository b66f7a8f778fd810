//! Integration tests for the reader core.
//!
//! These drive a `ReaderSession` the way the terminal front end does:
//! load a dataset file from disk, type a query, pick a chapter, clear.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test reader_session
//! ```

use std::fs;
use std::path::PathBuf;

use rstest::{fixture, rstest};
use tempfile::TempDir;

use memoir_reader::config::AppConfig;
use memoir_reader::core::dataset::{Dataset, DatasetError};
use memoir_reader::core::detail::{Excerpt, END_OF_PREVIEW, NO_CHARACTERS, NO_LOCATIONS};
use memoir_reader::core::search::{extract_snippets, ListingPreview, Segment};
use memoir_reader::core::session::{ReaderSession, SessionError};

const CHAPTERS: &str = r#"[
    {"id": 0, "chapter": "Depot Street", "events": "Born near the tracks.",
     "characters": ["Will", "the boy"], "locations": ["Central City"],
     "full_text": "1\n\nThe boy slept through the freight trains.\n\nWill worked nights."},
    {"id": 1, "chapter": "The Farm", "events": "A summer with Grandmother.",
     "characters": ["Grandmother"], "locations": ["the Platte River farm"],
     "full_text": null},
    {"id": 2, "chapter": "Omaha", "events": "A new school in the city.",
     "characters": ["Gertrude"], "locations": [],
     "full_text": "42\n\nReal paragraph text here.\n7\n"}
]"#;

/// Dataset written to a temporary file.
struct DatasetFile {
    _dir: TempDir,
    path: PathBuf,
}

#[fixture]
fn dataset_file() -> DatasetFile {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("chapters.json");
    fs::write(&path, CHAPTERS).unwrap();
    DatasetFile { _dir: dir, path }
}

#[fixture]
fn session(dataset_file: DatasetFile) -> ReaderSession {
    ReaderSession::new(Dataset::load(&dataset_file.path).unwrap())
}

fn ids(session: &ReaderSession) -> Vec<u32> {
    session.filtered_chapters().iter().map(|c| c.id).collect()
}

// ============================================================================
// Loading
// ============================================================================

#[rstest]
fn test_load_from_disk(dataset_file: DatasetFile) {
    let dataset = Dataset::load(&dataset_file.path).unwrap();
    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.get(2).unwrap().title, "Omaha");
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = Dataset::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, DatasetError::Io { .. }));
}

#[test]
fn test_load_duplicate_ids_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dupes.json");
    fs::write(
        &path,
        r#"[{"id": 1, "chapter": "A", "events": ""}, {"id": 1, "chapter": "B", "events": ""}]"#,
    )
    .unwrap();
    assert!(matches!(
        Dataset::load(&path).unwrap_err(),
        DatasetError::DuplicateId(1)
    ));
}

#[test]
fn test_load_malformed_json_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        Dataset::load(&path).unwrap_err(),
        DatasetError::Parse(_)
    ));
}

#[test]
fn test_bundled_sample_loads() {
    let dataset = Dataset::bundled().unwrap();
    assert!(!dataset.is_empty());
    assert_eq!(dataset.first().unwrap().id, 0);
}

#[test]
fn test_config_points_at_dataset() {
    let dir = TempDir::new().unwrap();
    let data_path = dir.path().join("chapters.json");
    fs::write(&data_path, CHAPTERS).unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            "[data]\ndataset_path = {:?}\n\n[book]\ntitle = \"Depot Street\"\nauthor = \"W. H.\"\n",
            data_path.display().to_string()
        ),
    )
    .unwrap();

    let config = AppConfig::load_from(&config_path);
    assert_eq!(config.book.title, "Depot Street");
    assert_eq!(config.book.author.as_deref(), Some("W. H."));
    let resolved = config.dataset_path(None).unwrap();
    assert_eq!(Dataset::load(&resolved).unwrap().len(), 3);
}

// ============================================================================
// Search flow
// ============================================================================

#[rstest]
fn test_empty_query_lists_everything(session: ReaderSession) {
    assert_eq!(ids(&session), vec![0, 1, 2]);
    assert_eq!(session.match_count_label(), None);
}

#[rstest]
fn test_case_insensitive_character_search(mut session: ReaderSession) {
    session.set_query("WILL");
    let upper = ids(&session);
    session.set_query("will");
    assert_eq!(upper, ids(&session));
    assert_eq!(upper, vec![0]);
}

#[rstest]
fn test_zero_results_then_clear_restores_list(mut session: ReaderSession) {
    session.set_query("zeppelin");
    assert!(session.filtered_chapters().is_empty());
    assert!(session.listing().is_empty());
    assert_eq!(session.match_count_label().as_deref(), Some("Found 0 chapters"));

    session.clear_query();
    assert_eq!(ids(&session), vec![0, 1, 2]);
}

#[rstest]
fn test_missing_text_chapter_still_matches_on_other_fields(mut session: ReaderSession) {
    session.set_query("grandmother");
    let listing = session.listing();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].chapter.id, 1);
    assert!(matches!(
        listing[0].preview,
        ListingPreview::Summary("A summer with Grandmother.")
    ));
}

#[rstest]
fn test_location_only_match_is_excluded(mut session: ReaderSession) {
    session.set_query("Platte");
    assert!(session.filtered_chapters().is_empty());
}

#[rstest]
fn test_listing_shows_snippets_for_text_matches(mut session: ReaderSession) {
    session.set_query("freight");
    let listing = session.listing();
    assert_eq!(listing.len(), 1);
    let ListingPreview::Snippets(set) = &listing[0].preview else {
        panic!("expected snippets for a full-text match");
    };
    assert_eq!(set.len(), 1);
    assert_eq!(set.snippets[0].matched().collect::<Vec<_>>(), vec!["freight"]);
}

#[rstest]
fn test_single_char_query_falls_back_to_summary(mut session: ReaderSession) {
    session.set_query("w");
    for entry in session.listing() {
        assert!(matches!(entry.preview, ListingPreview::Summary(_)));
    }
}

#[test]
fn test_two_boys_two_snippets() {
    let set = extract_snippets(Some("the boy ran. the boy walked."), "boy");
    assert_eq!(set.len(), 2);
    for snippet in set.iter() {
        assert!(snippet.segments.contains(&Segment::Match("boy".to_string())));
    }
}

#[test]
fn test_query_metacharacters_are_literal() {
    let set = extract_snippets(Some("cost was $5.00 (a lot) or 5x00"), "5.00 (");
    assert_eq!(set.len(), 1);
    assert_eq!(set.snippets[0].matched().collect::<Vec<_>>(), vec!["5.00 ("]);
}

// ============================================================================
// Selection and detail
// ============================================================================

#[rstest]
fn test_selecting_shows_ordinal(mut session: ReaderSession) {
    session.select_chapter(2).unwrap();
    assert_eq!(session.detail().heading(), "Chapter 3");
}

#[rstest]
fn test_selecting_unknown_chapter_keeps_previous(mut session: ReaderSession) {
    assert_eq!(session.select_chapter(9), Err(SessionError::UnknownChapter(9)));
    assert_eq!(session.active_chapter_id(), Some(0));
}

#[rstest]
fn test_selection_survives_query_changes(mut session: ReaderSession) {
    session.select_chapter(1).unwrap();
    session.set_query("omaha");
    assert_eq!(session.active_chapter_id(), Some(1));
    session.clear_query();
    assert_eq!(session.active_chapter_id(), Some(1));
}

#[rstest]
fn test_page_numbers_dropped_from_preview(mut session: ReaderSession) {
    session.select_chapter(2).unwrap();
    let detail = session.detail();
    assert_eq!(
        detail.excerpt,
        Excerpt::Preview(vec!["Real paragraph text here."])
    );
    assert_eq!(detail.location_labels(), vec![NO_LOCATIONS]);
}

#[rstest]
fn test_missing_text_detail(mut session: ReaderSession) {
    session.select_chapter(1).unwrap();
    assert_eq!(session.detail().excerpt, Excerpt::Unavailable);
}

#[test]
fn test_empty_dataset_detail_fallbacks() {
    let session = ReaderSession::new(Dataset::from_json_str("[]").unwrap());
    let detail = session.detail();
    assert_eq!(detail.title, None);
    assert_eq!(detail.location_labels(), vec![NO_LOCATIONS]);
    assert_eq!(detail.character_labels(), vec![NO_CHARACTERS]);
    assert_eq!(detail.excerpt, Excerpt::Unavailable);
    assert!(session.listing().is_empty());
    assert!(!END_OF_PREVIEW.is_empty());
}
