//! Terminal User Interface module
//!
//! A ratatui dashboard over an analysis file: the map with one marker per
//! location, the ranked list, details for the selected location and a
//! status bar. Exports run in the background.

pub mod app;
pub mod event;
pub mod handler;
pub mod layout;
pub mod terminal;
pub mod views;

pub use app::App;
pub use terminal::run_tui;
