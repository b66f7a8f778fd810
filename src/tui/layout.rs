//! Screen split: header row, chapter sidebar, reading pane, status row.

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Sidebar width with the search box and previews showing.
pub const SIDEBAR_EXPANDED_WIDTH: u16 = 42;
/// Sidebar width when only ordinal badges fit.
pub const SIDEBAR_COLLAPSED_WIDTH: u16 = 6;
/// Terminals narrower than this get the collapsed sidebar.
pub const AUTO_COLLAPSE_THRESHOLD: u16 = 90;
/// Terminals narrower than this get no sidebar at all.
pub const HIDE_SIDEBAR_THRESHOLD: u16 = 40;
/// The passage is set in a column no wider than this.
pub const READING_MAX_WIDTH: u16 = 96;

/// How much of the chapter sidebar is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarVisibility {
    Expanded,
    Collapsed,
    Hidden,
}

impl SidebarVisibility {
    /// Terminal width wins over the Ctrl+B preference: a hidden sidebar
    /// stays hidden, and a narrow terminal never expands it.
    pub fn for_width(width: u16, user_collapsed: bool) -> Self {
        if width < HIDE_SIDEBAR_THRESHOLD {
            Self::Hidden
        } else if user_collapsed || width < AUTO_COLLAPSE_THRESHOLD {
            Self::Collapsed
        } else {
            Self::Expanded
        }
    }

    pub fn width(self) -> Option<u16> {
        match self {
            Self::Expanded => Some(SIDEBAR_EXPANDED_WIDTH),
            Self::Collapsed => Some(SIDEBAR_COLLAPSED_WIDTH),
            Self::Hidden => None,
        }
    }
}

/// Regions for one frame.
pub struct AppLayout {
    /// Book title and author.
    pub header: Rect,
    pub sidebar: Option<Rect>,
    /// Reading pane, already narrowed to the reading column.
    pub main: Rect,
    pub status: Rect,
}

impl AppLayout {
    pub fn compute(area: Rect, user_collapsed: bool) -> (Self, SidebarVisibility) {
        let visibility = SidebarVisibility::for_width(area.width, user_collapsed);

        let [header, body, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let (sidebar, pane) = match visibility.width() {
            Some(width) => {
                let [sidebar, pane] =
                    Layout::horizontal([Constraint::Length(width), Constraint::Min(1)])
                        .areas(body);
                (Some(sidebar), pane)
            }
            None => (None, body),
        };

        (
            AppLayout {
                header,
                sidebar,
                main: reading_column(pane),
                status,
            },
            visibility,
        )
    }
}

/// Center a column of at most [`READING_MAX_WIDTH`] inside `pane`.
pub fn reading_column(pane: Rect) -> Rect {
    let [column] = Layout::horizontal([Constraint::Max(READING_MAX_WIDTH)])
        .flex(Flex::Center)
        .areas(pane);
    column
}
