//! Status bar view
//!
//! Shows the selected location, export progress and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::App;

/// Render the status bar
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let mut spans = vec![Span::styled(
        format!(" {} locations ", app.analysis.locations.len()),
        Style::default().fg(Color::White),
    )];

    if let Some(location) = app.selected_location() {
        spans.push(Span::raw("│ "));
        spans.push(Span::styled(
            location.summary.name.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" "));
    }

    if app.exports_in_flight > 0 {
        spans.push(Span::raw("│ "));
        spans.push(Span::styled(
            format!("exporting ({}) ", app.exports_in_flight),
            Style::default().fg(Color::Magenta),
        ));
    }

    if let Some(ref message) = app.status_message {
        spans.push(Span::raw("│ "));
        spans.push(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        ));
    }

    // Key hints (right-aligned)
    let hints = " ↑↓/jk:Select  1-9:Marker  e:Export PDF  q:Quit ";

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize).saturating_sub(left_len + hints.chars().count());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
