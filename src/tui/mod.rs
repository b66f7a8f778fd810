//! Terminal interface: ratatui rendering over a tokio event loop.

pub mod app;
pub mod events;
pub mod layout;
pub mod sidebar;
pub mod theme;
pub mod views;
pub mod widgets;
