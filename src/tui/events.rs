/// Events flowing through the Elm-architecture event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick; expires the status flash.
    Tick,
    /// Raw terminal input (keyboard/mouse/resize).
    Input(crossterm::event::Event),
    /// A resolved action to execute.
    Action(Action),
    /// Request to quit the application.
    Quit,
}

/// High-level actions dispatched by the input mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Reading
    SelectChapter(u32),
    ClearSearch,

    // Navigation
    FocusSearch,
    FocusSidebar,
    FocusDetail,
    FocusNext,
    ToggleSidebar,

    // Modals
    ShowHelp,
    CloseHelp,

    // Application
    Quit,
}

/// Which area receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AreaFocus {
    /// Typing edits the query.
    Search,
    /// j/k move through the chapter list.
    Sidebar,
    /// j/k scroll the chapter passage.
    Detail,
}

impl AreaFocus {
    pub const ALL: [AreaFocus; 3] = [AreaFocus::Search, AreaFocus::Sidebar, AreaFocus::Detail];

    pub fn label(self) -> &'static str {
        match self {
            AreaFocus::Search => "Search",
            AreaFocus::Sidebar => "Chapters",
            AreaFocus::Detail => "Reading",
        }
    }

    pub fn next(self) -> AreaFocus {
        let idx = AreaFocus::ALL.iter().position(|&f| f == self).unwrap_or(0);
        AreaFocus::ALL[(idx + 1) % AreaFocus::ALL.len()]
    }
}

/// Notification level for the status flash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
}

/// A short-lived message shown in the status bar.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}
