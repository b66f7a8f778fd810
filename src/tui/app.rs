use std::io;
use std::time::Duration;

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind,
};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};

use super::events::{Action, AppEvent, AreaFocus, Notification, NotificationLevel};
use super::layout::{AppLayout, SidebarVisibility};
use super::sidebar::SidebarState;
use super::theme;
use super::views::detail::DetailViewState;
use super::widgets::input_buffer::InputOutcome;
use crate::config::{AppConfig, BookConfig};
use crate::core::session::ReaderSession;

/// Ticks a status flash stays visible.
const NOTIFICATION_TTL_TICKS: u32 = 12;
/// Lines scrolled per mouse wheel notch.
const MOUSE_SCROLL_LINES: isize = 3;

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// Which area has keyboard input.
    pub area_focus: AreaFocus,
    /// Query, active chapter and the dataset they derive from.
    pub session: ReaderSession,
    /// Search box and chapter listing.
    pub sidebar: SidebarState,
    /// Chapter detail pane.
    pub detail: DetailViewState,
    /// Whether the help modal is open.
    pub show_help: bool,
    /// Status bar flash.
    pub notification: Option<Notification>,
    book: BookConfig,
}

impl AppState {
    pub fn new(session: ReaderSession, config: &AppConfig) -> Self {
        let mut sidebar = SidebarState::new(config.tui.sidebar_collapsed);
        sidebar.sync_to_chapter(&session.listing(), session.active_chapter_id());
        Self {
            running: true,
            area_focus: AreaFocus::Sidebar,
            session,
            sidebar,
            detail: DetailViewState::new(),
            show_help: false,
            notification: None,
            book: config.book.clone(),
        }
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                _ = tick_interval.tick() => {
                    self.handle_event(AppEvent::Tick);
                }
                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(crossterm_event)) => {
                        self.handle_event(AppEvent::Input(crossterm_event));
                    }
                    Some(Err(e)) => {
                        log::error!("Terminal event stream error: {e}");
                        return Err(e);
                    }
                    None => self.handle_event(AppEvent::Quit),
                },
            }
        }

        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => self.handle_input(crossterm_event),
            AppEvent::Action(action) => self.handle_action(action),
            AppEvent::Tick => self.on_tick(),
            AppEvent::Quit => self.running = false,
        }
    }

    fn handle_input(&mut self, event: Event) {
        if let Event::Mouse(mouse) = &event {
            match mouse.kind {
                MouseEventKind::ScrollDown => self.detail.scroll_by(MOUSE_SCROLL_LINES),
                MouseEventKind::ScrollUp => self.detail.scroll_by(-MOUSE_SCROLL_LINES),
                _ => {}
            }
            return;
        }

        // Priority 1: Help modal
        if self.show_help {
            if let Some(action) = self.map_help_input(&event) {
                self.handle_action(action);
            }
            return;
        }

        // Priority 2: Focused area
        let consumed = match self.area_focus {
            AreaFocus::Search => self.handle_search_input(&event),
            AreaFocus::Sidebar => self.handle_sidebar_input(&event),
            AreaFocus::Detail => self.handle_detail_input(&event),
        };
        if consumed {
            return;
        }

        // Priority 3: Global keybindings
        if let Some(action) = self.map_input_to_action(&event) {
            self.handle_action(action);
        }
    }

    /// Search box input. Printable keys always edit the query, so global
    /// letter bindings do not fire while typing.
    fn handle_search_input(&mut self, event: &Event) -> bool {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return false;
        };

        match (*modifiers, *code) {
            (_, KeyCode::Esc) => {
                self.handle_action(Action::ClearSearch);
                self.handle_action(Action::FocusSidebar);
                true
            }
            (_, KeyCode::Enter | KeyCode::Down) => {
                self.handle_action(Action::FocusSidebar);
                true
            }
            (KeyModifiers::NONE | KeyModifiers::SHIFT, code) => {
                match self.sidebar.search.handle_key(code) {
                    InputOutcome::Edited => {
                        self.sync_query();
                        true
                    }
                    InputOutcome::Moved => true,
                    InputOutcome::Ignored => false,
                }
            }
            _ => false,
        }
    }

    fn handle_sidebar_input(&mut self, event: &Event) -> bool {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return false;
        };

        let (len, selected_id) = {
            let listing = self.session.listing();
            (listing.len(), self.sidebar.selected_chapter_id(&listing))
        };
        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
                self.sidebar.select_next(len);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
                self.sidebar.select_prev(len);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('g') | KeyCode::Home) => {
                self.sidebar.selected = 0;
                true
            }
            (KeyModifiers::SHIFT, KeyCode::Char('G')) | (KeyModifiers::NONE, KeyCode::End) => {
                self.sidebar.select_last(len);
                true
            }
            (KeyModifiers::NONE, KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right) => {
                if let Some(id) = selected_id {
                    self.handle_action(Action::SelectChapter(id));
                    self.handle_action(Action::FocusDetail);
                }
                true
            }
            (KeyModifiers::NONE, KeyCode::Esc | KeyCode::Char('c'))
                if !self.session.query().is_empty() =>
            {
                self.handle_action(Action::ClearSearch);
                true
            }
            _ => false,
        }
    }

    fn handle_detail_input(&mut self, event: &Event) -> bool {
        if self.detail.handle_input(event) {
            return true;
        }
        match event {
            Event::Key(KeyEvent {
                code: KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left,
                kind: KeyEventKind::Press,
                ..
            }) => {
                self.handle_action(Action::FocusSidebar);
                true
            }
            _ => false,
        }
    }

    fn map_help_input(&self, event: &Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };
        match code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Some(Action::CloseHelp),
            _ => None,
        }
    }

    fn map_input_to_action(&self, event: &Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        match (*modifiers, *code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
            (KeyModifiers::CONTROL, KeyCode::Char('b')) => Some(Action::ToggleSidebar),
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => Some(Action::ClearSearch),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, code) => match code {
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Char('?') => Some(Action::ShowHelp),
                KeyCode::Char('/') => Some(Action::FocusSearch),
                KeyCode::Tab => Some(Action::FocusNext),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::SelectChapter(id) => match self.session.select_chapter(id) {
                Ok(()) => {
                    self.detail.reset_scroll();
                    self.sidebar
                        .sync_to_chapter(&self.session.listing(), Some(id));
                }
                Err(e) => {
                    log::warn!("Chapter selection rejected: {e}");
                    self.push_notification(e.to_string(), NotificationLevel::Warning);
                }
            },
            Action::ClearSearch => {
                self.sidebar.search.clear();
                self.sync_query();
            }
            Action::FocusSearch => {
                self.sidebar.user_collapsed = false;
                self.area_focus = AreaFocus::Search;
            }
            Action::FocusSidebar => self.area_focus = AreaFocus::Sidebar,
            Action::FocusDetail => self.area_focus = AreaFocus::Detail,
            Action::FocusNext => self.area_focus = self.area_focus.next(),
            Action::ToggleSidebar => self.sidebar.toggle_collapse(),
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
        }
    }

    /// Push the search box text into the session and re-anchor the
    /// listing selection.
    fn sync_query(&mut self) {
        self.session.set_query(self.sidebar.search.text());
        log::debug!("Query changed: {:?}", self.session.query());
        self.sidebar
            .sync_to_chapter(&self.session.listing(), self.session.active_chapter_id());
    }

    // ── Notifications ───────────────────────────────────────────────────

    /// Replace the status flash.
    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        self.notification = Some(Notification {
            message,
            level,
            ttl_ticks: NOTIFICATION_TTL_TICKS,
        });
    }

    /// Tick: age the status flash.
    fn on_tick(&mut self) {
        if let Some(n) = &mut self.notification {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
            if n.ttl_ticks == 0 {
                self.notification = None;
            }
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_BASE)),
            area,
        );

        let (layout, visibility) = AppLayout::compute(area, self.sidebar.user_collapsed);

        self.render_header(frame, layout.header);

        if let Some(sidebar_area) = layout.sidebar {
            self.sidebar
                .render(frame, sidebar_area, visibility, &self.session, self.area_focus);
        }

        let detail = self.session.detail();
        self.detail.render(
            frame,
            layout.main,
            &detail,
            self.area_focus == AreaFocus::Detail,
        );

        self.render_status_bar(frame, layout.status, visibility);

        if self.show_help {
            render_help_modal(frame, area);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::raw(" "),
            Span::styled(self.book.title.clone(), theme::title()),
        ];
        if let Some(author) = &self.book.author {
            spans.push(Span::styled(format!("  by {author}"), theme::muted()));
        }
        let count = self.session.dataset().len();
        let chapters = if count == 1 { "chapter" } else { "chapters" };

        let cols = Layout::horizontal([Constraint::Min(1), Constraint::Length(16)]).split(area);
        frame.render_widget(
            Paragraph::new(Line::from(spans)).style(Style::default().bg(theme::BG_SURFACE)),
            cols[0],
        );
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("{count} {chapters} "),
                theme::dim(),
            )))
            .alignment(Alignment::Right)
            .style(Style::default().bg(theme::BG_SURFACE)),
            cols[1],
        );
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect, visibility: SidebarVisibility) {
        let mut spans = vec![
            Span::styled(" MEMOIR ", theme::brand_badge()),
            Span::raw(" "),
        ];

        if self.area_focus == AreaFocus::Search {
            spans.push(Span::styled(" SEARCH ", theme::search_badge()));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            self.area_focus.label(),
            Style::default()
                .fg(theme::GOLD)
                .add_modifier(Modifier::BOLD),
        ));

        // The sidebar's search box is off-screen when collapsed or hidden.
        if visibility != SidebarVisibility::Expanded && !self.session.query().is_empty() {
            spans.push(Span::raw(" │ "));
            spans.push(Span::styled(
                format!("/{}", self.session.query()),
                Style::default().fg(theme::TEXT),
            ));
            if let Some(label) = self.session.match_count_label() {
                spans.push(Span::styled(format!("  {label}"), theme::muted()));
            }
        }

        spans.push(Span::raw(" │ "));
        match &self.notification {
            Some(n) => {
                let color = match n.level {
                    NotificationLevel::Info => theme::GOLD,
                    NotificationLevel::Warning => theme::WARNING,
                };
                spans.push(Span::styled(n.message.clone(), Style::default().fg(color)));
            }
            None => {
                for (key, label) in [
                    ("/", ":search "),
                    ("Tab", ":focus "),
                    ("Ctrl+B", ":sidebar "),
                    ("?", ":help "),
                    ("q", ":quit"),
                ] {
                    spans.push(Span::styled(key, theme::key_hint()));
                    spans.push(Span::styled(label, theme::muted()));
                }
            }
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

fn render_help_modal(frame: &mut Frame, area: Rect) {
    let modal = centered_rect(60, 80, area);

    let keybindings = [
        ("Global:", ""),
        ("q / Ctrl+C", "Quit"),
        ("?", "Toggle this help"),
        ("/", "Search chapters"),
        ("Ctrl+U", "Clear search"),
        ("Tab", "Cycle focus: search, chapters, reading"),
        ("Ctrl+B", "Collapse/expand sidebar"),
        ("", ""),
        ("Search box:", ""),
        ("type", "Filter chapters as you type"),
        ("Enter / Down", "Go to the chapter list"),
        ("Esc", "Clear search and go to the list"),
        ("", ""),
        ("Chapter list:", ""),
        ("j/k", "Move selection"),
        ("g / G", "First / last chapter"),
        ("Enter / l", "Open chapter"),
        ("Esc / c", "Clear search"),
        ("", ""),
        ("Reading pane:", ""),
        ("j/k", "Scroll"),
        ("PgUp / PgDn / Space", "Page"),
        ("g / G", "Top / bottom"),
        ("Esc / h", "Back to the chapter list"),
    ];

    let mut lines = vec![
        Line::raw(""),
        Line::from(Span::styled(" Keybindings", theme::title())),
        Line::raw(""),
    ];

    for (key, desc) in keybindings {
        if key.is_empty() {
            lines.push(Line::raw(""));
        } else if desc.is_empty() {
            lines.push(Line::from(Span::styled(format!("  {key}"), theme::title())));
        } else {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    format!("{key:<22}"),
                    Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD),
                ),
                Span::styled(desc, theme::muted()),
            ]));
        }
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::raw("  Press "),
        Span::styled("?", theme::title()),
        Span::raw(" or "),
        Span::styled("Esc", theme::title()),
        Span::raw(" to close"),
    ]));

    let block = Block::default()
        .title(" Help ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::GOLD))
        .style(Style::default().bg(theme::BG_SURFACE));

    frame.render_widget(Clear, modal);
    frame.render_widget(Paragraph::new(lines).block(block), modal);
}

/// Calculate a centered rect using percentage of parent area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
