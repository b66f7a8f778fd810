//! Chapter detail pane: heading, metadata chips, key events and the
//! passage preview.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::super::theme;
use super::super::widgets::wrap::wrap_words;
use crate::core::detail::{ChapterDetail, Excerpt, END_OF_PREVIEW, TEXT_UNAVAILABLE};

/// Left margin of the reading column.
const MARGIN: &str = "  ";

// ── State ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct DetailViewState {
    scroll: usize,
    /// Largest valid scroll offset as of the last render.
    max_scroll: usize,
    /// Viewport height as of the last render; used for paging.
    viewport: usize,
}

impl DetailViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Jump back to the top; called when the active chapter changes.
    pub fn reset_scroll(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll = self
            .scroll
            .saturating_add_signed(delta)
            .min(self.max_scroll);
    }

    pub fn handle_input(&mut self, event: &Event) -> bool {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            modifiers,
            ..
        }) = event
        else {
            return false;
        };

        let page = self.viewport.saturating_sub(2).max(1) as isize;
        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
                self.scroll_by(1);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
                self.scroll_by(-1);
                true
            }
            (KeyModifiers::NONE, KeyCode::PageDown | KeyCode::Char(' ')) => {
                self.scroll_by(page);
                true
            }
            (KeyModifiers::NONE, KeyCode::PageUp) => {
                self.scroll_by(-page);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('g') | KeyCode::Home) => {
                self.scroll = 0;
                true
            }
            (KeyModifiers::SHIFT, KeyCode::Char('G')) | (KeyModifiers::NONE, KeyCode::End) => {
                self.scroll = self.max_scroll;
                true
            }
            _ => false,
        }
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        detail: &ChapterDetail<'_>,
        focused: bool,
    ) {
        let block = Block::default()
            .borders(Borders::NONE)
            .style(Style::default().bg(theme::BG_BASE));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let width = (inner.width as usize).saturating_sub(MARGIN.len() * 2);
        let lines = detail_lines(detail, width, focused);

        self.viewport = inner.height as usize;
        self.max_scroll = lines.len().saturating_sub(self.viewport);
        self.scroll = self.scroll.min(self.max_scroll);

        frame.render_widget(
            Paragraph::new(lines).scroll((self.scroll as u16, 0)),
            inner,
        );
    }
}

// ── Line building ──────────────────────────────────────────────────────────

/// Lay out the whole pane as pre-wrapped lines.
pub fn detail_lines(detail: &ChapterDetail<'_>, width: usize, focused: bool) -> Vec<Line<'static>> {
    let mut lines = vec![Line::raw("")];

    let heading_style = if focused {
        theme::title()
    } else {
        theme::heading()
    };
    lines.push(Line::from(vec![
        Span::raw(MARGIN),
        Span::styled(detail.heading().to_uppercase(), heading_style),
    ]));

    if let Some(title) = detail.title {
        for row in wrap_words(title, width) {
            lines.push(Line::from(vec![
                Span::raw(MARGIN),
                Span::styled(row, Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD)),
            ]));
        }
    }
    lines.push(rule(width));

    lines.push(section_heading("Locations"));
    lines.extend(chip_lines(
        &detail.location_labels(),
        detail.has_locations(),
        width,
    ));
    lines.push(Line::raw(""));

    lines.push(section_heading("Characters"));
    lines.extend(chip_lines(
        &detail.character_labels(),
        detail.has_characters(),
        width,
    ));
    lines.push(Line::raw(""));

    if let Some(events) = detail.events {
        lines.push(section_heading("Key Events"));
        lines.extend(prose(events, width, theme::muted()));
    }
    lines.push(rule(width));

    lines.push(section_heading("Passage"));
    match &detail.excerpt {
        Excerpt::Unavailable => {
            lines.push(Line::from(vec![
                Span::raw(MARGIN),
                Span::styled(TEXT_UNAVAILABLE, theme::dim().add_modifier(Modifier::ITALIC)),
            ]));
        }
        Excerpt::Preview(paragraphs) => {
            for paragraph in paragraphs {
                lines.extend(prose(paragraph, width, Style::default().fg(theme::TEXT_BODY)));
                lines.push(Line::raw(""));
            }
            lines.push(end_marker(width));
        }
    }
    lines.push(Line::raw(""));
    lines
}

fn section_heading(label: &str) -> Line<'static> {
    Line::from(vec![
        Span::raw(MARGIN),
        Span::styled(label.to_uppercase(), theme::heading()),
    ])
}

fn rule(width: usize) -> Line<'static> {
    Line::from(vec![
        Span::raw(MARGIN),
        Span::styled("─".repeat(width), Style::default().fg(theme::BORDER)),
    ])
}

fn prose(text: &str, width: usize, style: Style) -> Vec<Line<'static>> {
    wrap_words(text, width)
        .into_iter()
        .map(|row| Line::from(vec![Span::raw(MARGIN), Span::styled(row, style)]))
        .collect()
}

/// Pack labels into rows of chips. When `present` is false the single
/// label is the empty-state message and renders as plain dim text.
fn chip_lines(labels: &[&str], present: bool, width: usize) -> Vec<Line<'static>> {
    if !present {
        return labels
            .iter()
            .map(|label| {
                Line::from(vec![
                    Span::raw(MARGIN),
                    Span::styled(label.to_string(), theme::dim().add_modifier(Modifier::ITALIC)),
                ])
            })
            .collect();
    }

    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = vec![Span::raw(MARGIN)];
    let mut used = 0usize;
    for label in labels {
        let chip = format!(" {label} ");
        let len = chip.chars().count();
        if used > 0 && used + 1 + len > width {
            lines.push(Line::from(std::mem::replace(
                &mut current,
                vec![Span::raw(MARGIN)],
            )));
            used = 0;
        }
        if used > 0 {
            current.push(Span::raw(" "));
            used += 1;
        }
        current.push(Span::styled(chip, theme::chip()));
        used += len;
    }
    if used > 0 {
        lines.push(Line::from(current));
    }
    lines
}

fn end_marker(width: usize) -> Line<'static> {
    let label = format!(" {END_OF_PREVIEW} ");
    let side = width.saturating_sub(label.chars().count()) / 2;
    Line::from(vec![
        Span::raw(MARGIN),
        Span::styled("─".repeat(side), Style::default().fg(theme::BORDER)),
        Span::styled(label, theme::dim()),
        Span::styled("─".repeat(side), Style::default().fg(theme::BORDER)),
    ])
}
