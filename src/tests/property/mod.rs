//! Property-based tests for the reader core.
//!
//! Properties verify invariants that should hold for all inputs rather
//! than specific cases.
//!
//! Run them with:
//! ```sh
//! cargo test property --release
//! ```
//!
//! ## Test Modules
//!
//! - `search_props`: filtering and snippet extraction
//!   - Blank query keeps every chapter
//!   - Results keep dataset order and only contain real matches
//!   - Matching ignores case
//!   - At most five snippets, each bounded and containing the match
//!
//! - `detail_props`: passage preview cleaning
//!   - At most twenty paragraphs
//!   - No blank lines or page numbers survive
//!
//! The default of 256 cases per property can be raised with
//! `PROPTEST_CASES`.

mod detail_props;
mod search_props;
