//! Event handler for the TUI
//!
//! Routes keyboard and mouse events to app actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::app::App;
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Tick => app.poll(),
        Event::Resize(_, _) => {}
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        KeyCode::Down | KeyCode::Char('j') => {
            app.clear_status();
            app.select_next();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.clear_status();
            app.select_prev();
        }

        KeyCode::Char(c @ '1'..='9') => {
            if let Some(number) = c.to_digit(10) {
                app.pick_number(number as usize);
                app.poll();
            }
        }

        KeyCode::Char('e') | KeyCode::Char('E') => app.start_export(),

        _ => {}
    }
}

/// Handle a mouse event; left clicks on a marker label select it
fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
        if app.click_at(mouse.column, mouse.row) {
            app.poll();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::{KeyEventKind, KeyEventState};

    use super::*;
    use crate::export::{MemorySink, MemorySurface, PdfRasterizer, ReportExporter};
    use crate::models::analysis::fixtures::analysis;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn app(runtime: &tokio::runtime::Runtime) -> App {
        let exporter = ReportExporter::new(
            Arc::new(MemorySurface::new()),
            Arc::new(PdfRasterizer::new()),
            Arc::new(MemorySink::new()),
        );
        App::new(analysis(), Arc::new(exporter), runtime.handle().clone())
    }

    #[test]
    fn test_navigation_keys() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&runtime);

        handle_event(&mut app, key(KeyCode::Char('j')));
        assert_eq!(app.map.selected(), Some(2));
        handle_event(&mut app, key(KeyCode::Up));
        assert_eq!(app.map.selected(), Some(1));
        handle_event(&mut app, key(KeyCode::Char('3')));
        assert_eq!(app.map.selected(), Some(3));
    }

    #[test]
    fn test_quit_keys() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&runtime);
        handle_event(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_mouse_click_outside_map_is_ignored() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&runtime);
        handle_event(
            &mut app,
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: 0,
                row: 0,
                modifiers: KeyModifiers::NONE,
            }),
        );
        assert_eq!(app.map.selected(), Some(1));
    }
}
