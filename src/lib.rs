//! Memoir Reader - terminal reader for a chapter-structured memoir.
//!
//! Core library: chapter dataset loading, substring search with
//! highlighted snippets, reader view state and the ratatui front end.

pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
