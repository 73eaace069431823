//! Terminal User Interface module
//!
//! Interactive SetAside built on ratatui: a navigation bar over the five
//! views, modal forms for data entry, and a status bar.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;
pub mod theme;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
