//! Terminal User Interface module
//!
//! An interactive entry screen built on ratatui: type a sentence, watch the
//! preview update, press Tab to take a suggestion and Enter to save.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;
pub mod view;

// Widgets
pub mod widgets;

pub use app::App;
pub use terminal::run_entry;
