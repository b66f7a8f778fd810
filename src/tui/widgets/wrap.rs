//! Hard-wrap styled text into fixed-width lines.
//!
//! `List` items do not wrap, so sidebar previews are pre-wrapped here.
//! Widths are counted in chars.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

/// Wrap `pieces` into lines of at most `width` chars, each starting with
/// `prefix`. Style boundaries are preserved across breaks. Line breaks in
/// the input render as a single space.
pub fn wrap_styled(
    pieces: &[(&str, Style)],
    width: usize,
    prefix: Span<'static>,
) -> Vec<Line<'static>> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = vec![prefix.clone()];
    let mut used = 0usize;

    for (text, style) in pieces {
        let mut run = String::new();
        for c in text.chars() {
            let c = match c {
                '\r' => continue,
                '\n' => ' ',
                c => c,
            };
            if used == width {
                if !run.is_empty() {
                    current.push(Span::styled(std::mem::take(&mut run), *style));
                }
                lines.push(Line::from(std::mem::replace(&mut current, vec![prefix.clone()])));
                used = 0;
            }
            run.push(c);
            used += 1;
        }
        if !run.is_empty() {
            current.push(Span::styled(run, *style));
        }
    }

    if used > 0 || lines.is_empty() {
        lines.push(Line::from(current));
    }
    lines
}

/// Word-wrap prose to `width` chars. Words longer than a line are split.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut used = 0usize;

    for word in text.split_whitespace() {
        let len = word.chars().count();
        if used > 0 && used + 1 + len > width {
            lines.push(std::mem::take(&mut current));
            used = 0;
        }
        if used > 0 {
            current.push(' ');
            used += 1;
        }
        if len > width {
            for c in word.chars() {
                if used == width {
                    lines.push(std::mem::take(&mut current));
                    used = 0;
                }
                current.push(c);
                used += 1;
            }
        } else {
            current.push_str(word);
            used += len;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Truncate `text` to `width` chars, ending with "…" when cut.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}
