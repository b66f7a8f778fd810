//! Literal, case-insensitive query matching and highlight splitting.
//!
//! User queries are escaped before they reach the regex engine, so a query
//! like `(a+b)?` matches those six characters and nothing else.

use regex::{Matches, Regex, RegexBuilder};

/// A run of text inside a snippet, either plain or matching the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Plain(String),
    Match(String),
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Plain(s) | Segment::Match(s) => s,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Segment::Match(_))
    }
}

/// Compiled form of a search query.
#[derive(Debug, Clone)]
pub struct QueryPattern {
    regex: Regex,
}

impl QueryPattern {
    /// Compile `query` as a literal, case-insensitive pattern.
    ///
    /// Returns `None` for an empty query (which would match everywhere) or
    /// if the escaped pattern exceeds the regex size limit.
    pub fn new(query: &str) -> Option<Self> {
        if query.is_empty() {
            return None;
        }
        match RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
        {
            Ok(regex) => Some(Self { regex }),
            Err(e) => {
                log::warn!("Could not compile search query ({} chars): {e}", query.len());
                None
            }
        }
    }

    /// Non-overlapping matches, left to right.
    pub fn find_iter<'r, 't>(&'r self, text: &'t str) -> Matches<'r, 't> {
        self.regex.find_iter(text)
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Split `text` into alternating plain and matched segments.
    ///
    /// Empty plain runs (between adjacent matches or at the edges) are
    /// omitted; concatenating the segments always reproduces `text`.
    pub fn split(&self, text: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut last = 0;
        for m in self.regex.find_iter(text) {
            if m.start() > last {
                segments.push(Segment::Plain(text[last..m.start()].to_string()));
            }
            segments.push(Segment::Match(m.as_str().to_string()));
            last = m.end();
        }
        if last < text.len() {
            segments.push(Segment::Plain(text[last..].to_string()));
        }
        segments
    }
}
