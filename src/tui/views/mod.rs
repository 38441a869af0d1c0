//! TUI Views module
//!
//! The map, the ranked list, the detail panel for the selected location and
//! the status bar.

pub mod detail;
pub mod list;
pub mod map;
pub mod status_bar;

use ratatui::style::Color;
use ratatui::Frame;

use super::app::App;
use super::layout::AppLayout;
use crate::map::MarkerStatus;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = AppLayout::new(frame.area());

    map::render(frame, app, layout.map);
    list::render(frame, app, layout.list);
    detail::render(frame, app, layout.detail);
    status_bar::render(frame, app, layout.status_bar);
}

/// Terminal color for a marker status
pub fn status_color(status: MarkerStatus) -> Color {
    match status {
        MarkerStatus::High => Color::Green,
        MarkerStatus::Medium => Color::Yellow,
        MarkerStatus::Low => Color::LightRed,
    }
}
