//! Collapsible left sidebar: search box, match count, chapter listing.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::events::AreaFocus;
use super::layout::SidebarVisibility;
use super::theme;
use super::widgets::input_buffer::InputBuffer;
use super::widgets::wrap::{truncate, wrap_styled};
use crate::core::search::{ListingEntry, ListingPreview, Segment, Snippet, ELLIPSIS};
use crate::core::session::ReaderSession;

const SEARCH_PLACEHOLDER: &str = "Search chapters...";
/// Events summaries are clamped to this many lines in the listing.
const SUMMARY_MAX_LINES: usize = 2;

/// Sidebar navigation state.
pub struct SidebarState {
    /// Whether the user has toggled collapse (Ctrl+B).
    pub user_collapsed: bool,
    /// Highlighted row in the current listing.
    pub selected: usize,
    /// Search box contents; mirrored into the session query on every edit.
    pub search: InputBuffer,
}

impl SidebarState {
    pub fn new(user_collapsed: bool) -> Self {
        Self {
            user_collapsed,
            selected: 0,
            search: InputBuffer::new(),
        }
    }

    /// Toggle user collapse preference.
    pub fn toggle_collapse(&mut self) {
        self.user_collapsed = !self.user_collapsed;
    }

    /// Move selection down, wrapping.
    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move selection up, wrapping.
    pub fn select_prev(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        if self.selected == 0 {
            self.selected = len - 1;
        } else {
            self.selected -= 1;
        }
    }

    pub fn select_last(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    /// Point the selection at the active chapter if it is listed,
    /// otherwise at the first row.
    pub fn sync_to_chapter(&mut self, listing: &[ListingEntry<'_>], active: Option<u32>) {
        self.selected = active
            .and_then(|id| listing.iter().position(|e| e.chapter.id == id))
            .unwrap_or(0);
    }

    /// Chapter id under the selection.
    pub fn selected_chapter_id(&self, listing: &[ListingEntry<'_>]) -> Option<u32> {
        listing.get(self.selected).map(|e| e.chapter.id)
    }

    /// Render the sidebar.
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        visibility: SidebarVisibility,
        session: &ReaderSession,
        area_focus: AreaFocus,
    ) {
        match visibility {
            SidebarVisibility::Hidden => {}
            SidebarVisibility::Collapsed => self.render_collapsed(frame, area, session),
            SidebarVisibility::Expanded => self.render_expanded(frame, area, session, area_focus),
        }
    }

    fn render_collapsed(&self, frame: &mut Frame, area: Rect, session: &ReaderSession) {
        let active = session.active_chapter_id();
        let lines: Vec<Line> = session
            .listing()
            .iter()
            .enumerate()
            .take(area.height as usize)
            .map(|(idx, entry)| {
                let style = if Some(entry.chapter.id) == active {
                    theme::badge_active()
                } else {
                    theme::badge()
                };
                let marker = if idx == self.selected { "▸" } else { " " };
                Line::from(vec![
                    Span::styled(marker, theme::title()),
                    Span::styled(format!("{:>3} ", entry.chapter.ordinal()), style),
                ])
            })
            .collect();

        frame.render_widget(
            Paragraph::new(lines).style(Style::default().bg(theme::BG_SIDEBAR)),
            area,
        );
    }

    fn render_expanded(
        &self,
        frame: &mut Frame,
        area: Rect,
        session: &ReaderSession,
        area_focus: AreaFocus,
    ) {
        let outer = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(theme::BORDER))
            .style(Style::default().bg(theme::BG_SIDEBAR));
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        let count_label = session.match_count_label();
        let rows = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(u16::from(count_label.is_some())),
            Constraint::Min(1),
        ])
        .split(inner);

        self.render_search_box(frame, rows[0], area_focus == AreaFocus::Search);

        if let Some(label) = count_label {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(format!(" {label}"), theme::title()))),
                rows[1],
            );
        }

        let listing = session.listing();
        if listing.is_empty() {
            render_no_results(frame, rows[2], session.query());
            return;
        }

        let width = rows[2].width as usize;
        let active = session.active_chapter_id();
        let items: Vec<ListItem> = listing
            .iter()
            .map(|entry| listing_item(entry, Some(entry.chapter.id) == active, width))
            .collect();

        let list = List::new(items).highlight_style(
            Style::default()
                .bg(theme::BG_ACTIVE)
                .add_modifier(if area_focus == AreaFocus::Sidebar {
                    Modifier::BOLD
                } else {
                    Modifier::empty()
                }),
        );
        let mut state = ListState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(list, rows[2], &mut state);
    }

    fn render_search_box(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let block = if focused {
            theme::block_focused("Search")
        } else {
            theme::block_default("Search")
        };
        let inner = block.inner(area);

        let (skip, col) = search_window(self.search.cursor_column(), inner.width);
        let content = if self.search.text().is_empty() && !focused {
            Line::from(Span::styled(SEARCH_PLACEHOLDER, theme::dim()))
        } else {
            Line::from(Span::styled(
                self.search.text().chars().skip(skip).collect::<String>(),
                Style::default().fg(theme::TEXT),
            ))
        };
        frame.render_widget(Paragraph::new(content).block(block), area);

        if focused && inner.width > 0 {
            frame.set_cursor_position((inner.x + col, inner.y));
        }
    }
}

/// Horizontal scroll for the search box: chars to skip so the cursor stays
/// visible, and the cursor column within the box.
fn search_window(cursor: usize, width: u16) -> (usize, u16) {
    let last = usize::from(width.saturating_sub(1));
    let skip = cursor.saturating_sub(last);
    let col = u16::try_from(cursor - skip).unwrap_or(u16::MAX);
    (skip, col.min(width.saturating_sub(1)))
}

/// The "nothing matched" state with its clear-search hint.
fn render_no_results(frame: &mut Frame, area: Rect, query: &str) {
    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled(
            format!("No chapters found matching \"{query}\""),
            theme::muted(),
        )),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Esc / Ctrl+U", theme::title()),
            Span::styled(" Clear search", theme::muted()),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(ratatui::layout::Alignment::Center)
            .wrap(ratatui::widgets::Wrap { trim: true }),
        area,
    );
}

/// Build one listing row: ordinal badge + title, then snippets or summary.
fn listing_item(entry: &ListingEntry<'_>, is_active: bool, width: usize) -> ListItem<'static> {
    let chapter = entry.chapter;
    let badge = format!(" {} ", chapter.ordinal());
    let title_width = width.saturating_sub(badge.chars().count() + 1);
    let (badge_style, title_style) = if is_active {
        (theme::badge_active(), theme::title())
    } else {
        (theme::badge(), Style::default().fg(theme::TEXT))
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(badge, badge_style),
        Span::raw(" "),
        Span::styled(truncate(&chapter.title, title_width), title_style),
    ])];

    match &entry.preview {
        ListingPreview::Snippets(set) => {
            for snippet in set.iter() {
                lines.extend(snippet_lines(snippet, width));
            }
            if set.has_more {
                lines.push(Line::from(Span::styled(
                    "  ...and more",
                    theme::dim().add_modifier(Modifier::ITALIC),
                )));
            }
        }
        ListingPreview::Summary(summary) => {
            let mut summary_lines = wrap_styled(
                &[(*summary, theme::muted())],
                width.saturating_sub(2),
                Span::raw("  "),
            );
            if summary_lines.len() > SUMMARY_MAX_LINES {
                summary_lines.truncate(SUMMARY_MAX_LINES);
                if let Some(last) = summary_lines.last_mut() {
                    last.spans.push(Span::styled("…", theme::muted()));
                }
            }
            lines.extend(summary_lines);
        }
    }

    lines.push(Line::raw(""));
    ListItem::new(lines)
}

/// One snippet as wrapped lines, matches highlighted.
fn snippet_lines(snippet: &Snippet, width: usize) -> Vec<Line<'static>> {
    let mut pieces: Vec<(&str, Style)> = Vec::with_capacity(snippet.segments.len() + 2);
    if snippet.truncated_start {
        pieces.push((ELLIPSIS, theme::snippet()));
    }
    for segment in &snippet.segments {
        let style = match segment {
            Segment::Match(_) => theme::matched(),
            Segment::Plain(_) => theme::snippet(),
        };
        pieces.push((segment.text(), style));
    }
    if snippet.truncated_end {
        pieces.push((ELLIPSIS, theme::snippet()));
    }
    wrap_styled(
        &pieces,
        width.saturating_sub(4),
        Span::styled("  │ ", Style::default().fg(theme::BORDER)),
    )
}
