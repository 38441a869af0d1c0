//! Ranked location list

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use super::status_color;
use crate::map::Marker;
use crate::tui::app::App;

/// Render the list of locations, best first
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title(" Locations ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let ranked = app.analysis.ranked();
    let items: Vec<ListItem> = ranked
        .iter()
        .enumerate()
        .map(|(rank, location)| {
            let marker = Marker::from_location(location);
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:>2}. ", rank + 1)),
                Span::raw(location.summary.name.clone()),
                Span::raw("  "),
                Span::styled(
                    marker.score_label(),
                    Style::default().fg(status_color(marker.status)),
                ),
            ]))
        })
        .collect();

    let selected_index = app
        .map
        .selected()
        .and_then(|id| ranked.iter().position(|l| l.id == id));

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(selected_index);

    frame.render_stateful_widget(list, area, &mut state);
}
