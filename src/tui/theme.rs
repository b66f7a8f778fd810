//! Dark & gold color theme for the reader.
//!
//! All color constants are RGB truecolor. Views import from here
//! instead of using inline `Color::*` literals.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

// ── Primary palette ─────────────────────────────────────────────────────────

/// Gold: accent, active chapter, highlighted matches.
pub const GOLD: Color = Color::Rgb(0xD4, 0xAF, 0x37);
/// Dimmed gold for the match highlight background.
pub const GOLD_DARK: Color = Color::Rgb(0x3A, 0x31, 0x12);

// ── Backgrounds ─────────────────────────────────────────────────────────────

/// Near-black base background.
pub const BG_BASE: Color = Color::Rgb(0x0A, 0x0A, 0x0A);
/// Sidebar background.
pub const BG_SIDEBAR: Color = Color::Rgb(0x11, 0x11, 0x11);
/// Cards, search box, active list row.
pub const BG_SURFACE: Color = Color::Rgb(0x1A, 0x1A, 0x1A);
pub const BG_ACTIVE: Color = Color::Rgb(0x24, 0x24, 0x24);

// ── Text ────────────────────────────────────────────────────────────────────

pub const TEXT: Color = Color::Rgb(0xE5, 0xE5, 0xE5);
/// Body copy of the passage.
pub const TEXT_BODY: Color = Color::Rgb(0xC8, 0xC8, 0xC8);
pub const TEXT_MUTED: Color = Color::Rgb(0x9C, 0xA3, 0xAF);
pub const TEXT_DIM: Color = Color::Rgb(0x4B, 0x55, 0x63);
/// Borders and separators.
pub const BORDER: Color = Color::Rgb(0x33, 0x33, 0x33);
/// Warning flash in the status bar.
pub const WARNING: Color = Color::Rgb(0xE0, 0x8A, 0x3C);

// ── Style helpers ───────────────────────────────────────────────────────────

/// Gold bold text (chapter titles, active items).
pub fn title() -> Style {
    Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
}

/// Section header style ("LOCATIONS", "KEY EVENTS").
pub fn heading() -> Style {
    Style::default()
        .fg(TEXT_MUTED)
        .add_modifier(Modifier::BOLD)
}

/// Matched query text inside a snippet.
pub fn matched() -> Style {
    Style::default()
        .fg(GOLD)
        .bg(GOLD_DARK)
        .add_modifier(Modifier::BOLD)
}

/// Snippet body text.
pub fn snippet() -> Style {
    Style::default()
        .fg(TEXT_MUTED)
        .add_modifier(Modifier::ITALIC)
}

pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Key hint style (e.g., "q:quit").
pub fn key_hint() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Metadata chip (a location or character name).
pub fn chip() -> Style {
    Style::default().fg(TEXT).bg(BG_ACTIVE)
}

/// Ordinal badge of the active chapter.
pub fn badge_active() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(GOLD)
        .add_modifier(Modifier::BOLD)
}

/// Ordinal badge of other chapters.
pub fn badge() -> Style {
    Style::default().fg(TEXT_MUTED).bg(BORDER)
}

/// Status bar brand badge.
pub fn brand_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(GOLD)
        .add_modifier(Modifier::BOLD)
}

/// Search mode badge.
pub fn search_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(TEXT_MUTED)
        .add_modifier(Modifier::BOLD)
}

// ── Block builders ──────────────────────────────────────────────────────────

/// A bordered block with focused styling.
pub fn block_focused(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GOLD))
}

/// A bordered block with default (unfocused) styling.
pub fn block_default(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BORDER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gold_accent() {
        assert_eq!(GOLD, Color::Rgb(0xD4, 0xAF, 0x37));
    }

    #[test]
    fn test_match_style_differs_from_snippet_text() {
        assert_ne!(matched(), snippet());
        assert_ne!(badge_active(), badge());
    }

    #[test]
    fn test_style_helpers_return_non_default() {
        assert_ne!(title(), Style::default());
        assert_ne!(heading(), Style::default());
        assert_ne!(matched(), Style::default());
        assert_ne!(muted(), Style::default());
    }
}
