//! Map view
//!
//! Draws a street grid and one label per marker at its projected cell.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
    Frame,
};

use super::status_color;
use crate::map::{MapView, MarkerStatus};
use crate::tui::app::{marker_label, App};

/// Render the map panel
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let legend = Line::from(
        [MarkerStatus::High, MarkerStatus::Medium, MarkerStatus::Low]
            .into_iter()
            .flat_map(|status| {
                [
                    Span::styled(" ● ", Style::default().fg(status_color(status))),
                    Span::raw(status.legend()),
                ]
            })
            .chain(std::iter::once(Span::raw(" ")))
            .collect::<Vec<_>>(),
    );

    let block = Block::default()
        .title(" Map ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .title_bottom(legend)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    app.map_area = Some(inner);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let buf = frame.buffer_mut();
    let street = Style::default().fg(Color::DarkGray);

    for pct in [25u16, 50, 75] {
        let y = inner.y + (inner.height - 1) * pct / 100;
        buf.set_string(inner.x, y, "┄".repeat(inner.width as usize), street);
        let x = inner.x + (inner.width - 1) * pct / 100;
        for row in inner.y..inner.y + inner.height {
            buf.set_string(x, row, "┆", street);
        }
    }

    let selected = app.map.selected();
    for (index, marker) in app.map.markers().iter().enumerate() {
        let (x, y) = MapView::project(marker, inner.width, inner.height);
        let color = status_color(marker.status);
        let style = if selected == Some(marker.id) {
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        };
        let max_width = (inner.width - x) as usize;
        buf.set_stringn(inner.x + x, inner.y + y, marker_label(index, marker), max_width, style);
    }
}
