//! Detail panel for the selected location

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::document::{render_report, SectionKind};
use crate::tui::app::App;

/// Render the selected location's score, listings and placeholders
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title(" Details ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let Some(location) = app.selected_location() else {
        let text = Paragraph::new("Select a location with ↑/↓ or 1-9")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    };

    let input = app.analysis.report_for(location, String::new());
    let document = render_report(&input, "$");
    let heading = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(location.summary.name.clone(), heading)),
        Line::from(format!(
            "Score {}/100  |  {} confidence",
            location.summary.score,
            location.summary.confidence.as_upper()
        )),
        Line::from(""),
    ];

    for kind in [
        SectionKind::ScoreBreakdown,
        SectionKind::Competitors,
        SectionKind::Revenue,
    ] {
        let Some(section) = document.section(kind) else {
            continue;
        };
        let mut section_lines = section.lines().into_iter();
        if let Some(title) = section_lines.next() {
            lines.push(Line::from(Span::styled(title, heading)));
        }
        lines.extend(section_lines.map(Line::from));
        lines.push(Line::from(""));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
