//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.
//! Exports run on the tokio runtime; their results come back through a
//! channel that is drained on every tick, so the UI never waits on them.

use std::sync::mpsc;
use std::sync::Arc;

use ratatui::layout::Rect;
use tokio::runtime::Handle;
use tracing::debug;

use crate::export::{ExportOutcome, ReportExporter};
use crate::map::{MapView, Marker};
use crate::models::{generated_at_now, AnalysisFile, AnalyzedLocation};

/// Result of a background export
#[derive(Debug)]
pub struct ExportMessage {
    pub location: String,
    pub result: Result<ExportOutcome, String>,
}

/// Main application state
pub struct App {
    /// The loaded analysis
    pub analysis: AnalysisFile,

    /// Markers and selection
    pub map: MapView,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: Option<String>,

    /// Exports started but not yet reported back
    pub exports_in_flight: usize,

    /// Inner map area from the last render, for mouse hit testing
    pub map_area: Option<Rect>,

    exporter: Arc<ReportExporter>,
    runtime: Handle,
    export_tx: mpsc::Sender<ExportMessage>,
    export_rx: mpsc::Receiver<ExportMessage>,
    clicks: mpsc::Receiver<u32>,
}

impl App {
    /// Create a new App instance with the top-ranked location selected
    pub fn new(analysis: AnalysisFile, exporter: Arc<ReportExporter>, runtime: Handle) -> Self {
        let (export_tx, export_rx) = mpsc::channel();
        let (click_tx, clicks) = mpsc::channel();

        let top = analysis.top_ranked().map(|l| l.id);
        let map = MapView::from_analysis(&analysis)
            .with_selected(top)
            .on_click(move |id| {
                let _ = click_tx.send(id);
            });

        Self {
            analysis,
            map,
            should_quit: false,
            status_message: None,
            exports_in_flight: 0,
            map_area: None,
            exporter,
            runtime,
            export_tx,
            export_rx,
            clicks,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// The location behind the selected marker
    pub fn selected_location(&self) -> Option<&AnalyzedLocation> {
        self.map.selected().and_then(|id| self.analysis.get(id))
    }

    pub fn select_next(&mut self) {
        self.map.select_next();
    }

    pub fn select_prev(&mut self) {
        self.map.select_prev();
    }

    /// Click the marker numbered `number` on the map
    pub fn pick_number(&mut self, number: usize) {
        if !self.map.click_number(number) {
            self.set_status(format!("No marker #{}", number));
        }
    }

    /// Click whatever marker label covers the cell at (`column`, `row`)
    pub fn click_at(&mut self, column: u16, row: u16) -> bool {
        let Some(area) = self.map_area else {
            return false;
        };
        let hit = self
            .map
            .markers()
            .iter()
            .enumerate()
            .find(|(index, marker)| {
                let (x, y) = MapView::project(marker, area.width, area.height);
                let label_width = marker_label(*index, marker).chars().count() as u16;
                let left = area.x + x;
                row == area.y + y && column >= left && column < left.saturating_add(label_width)
            })
            .map(|(_, marker)| marker.id);

        match hit {
            Some(id) => self.map.click(id),
            None => false,
        }
    }

    /// Export the selected location in the background
    pub fn start_export(&mut self) {
        let Some(location) = self.selected_location() else {
            self.set_status("No location selected");
            return;
        };

        let input = self.analysis.report_for(location, generated_at_now());
        let name = location.summary.name.clone();
        let exporter = Arc::clone(&self.exporter);
        let tx = self.export_tx.clone();

        self.runtime.spawn(async move {
            let result = exporter.export(&input).await.map_err(|e| e.to_string());
            let _ = tx.send(ExportMessage {
                location: input.location.name.clone(),
                result,
            });
        });

        self.exports_in_flight += 1;
        debug!(location = %name, "Started background export");
        self.set_status(format!("Exporting {}...", name));
    }

    /// Apply finished exports and marker clicks
    pub fn poll(&mut self) {
        while let Ok(message) = self.export_rx.try_recv() {
            self.exports_in_flight = self.exports_in_flight.saturating_sub(1);
            match message.result {
                Ok(outcome) => self.set_status(format!("Saved {}", outcome.path.display())),
                Err(error) => self.set_status(format!("{}: {}", message.location, error)),
            }
        }

        while let Ok(id) = self.clicks.try_recv() {
            if let Some(location) = self.analysis.get(id) {
                let name = location.summary.name.clone();
                self.set_status(format!("Selected {}", name));
            }
        }
    }
}

/// Text drawn at a marker's position
pub fn marker_label(index: usize, marker: &Marker) -> String {
    format!("{} {} {}", index + 1, marker.name, marker.score_label())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::export::{
        MemorySink, MemorySurface, RasterError, Rasterizer, ReadinessPolicy, RenderOptions,
        RenderedDocument, StagedNode,
    };
    use crate::models::analysis::fixtures::analysis;

    struct StubRasterizer {
        fail: bool,
    }

    #[async_trait]
    impl Rasterizer for StubRasterizer {
        async fn render(
            &self,
            _node: &StagedNode,
            _options: &RenderOptions,
        ) -> Result<RenderedDocument, RasterError> {
            if self.fail {
                return Err(RasterError::Encode("boom".into()));
            }
            Ok(RenderedDocument {
                bytes: b"%PDF".to_vec(),
                page_count: 1,
            })
        }
    }

    fn app(runtime: &tokio::runtime::Runtime, fail: bool) -> App {
        let exporter = ReportExporter::new(
            Arc::new(MemorySurface::new()),
            Arc::new(StubRasterizer { fail }),
            Arc::new(MemorySink::new()),
        )
        .with_readiness(ReadinessPolicy::Immediate);
        App::new(analysis(), Arc::new(exporter), runtime.handle().clone())
    }

    fn wait_for_export(app: &mut App) {
        for _ in 0..200 {
            app.poll();
            if app.exports_in_flight == 0 {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("export did not finish");
    }

    #[test]
    fn test_starts_on_top_ranked() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let app = app(&runtime, false);
        assert_eq!(app.map.selected(), Some(1));
        assert_eq!(app.selected_location().unwrap().summary.name, "Williamsburg, Brooklyn");
    }

    #[test]
    fn test_pick_number_reports_selection() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&runtime, false);
        app.pick_number(2);
        app.poll();
        assert_eq!(app.map.selected(), Some(2));
        assert_eq!(app.status_message.as_deref(), Some("Selected Astoria, Queens"));

        app.pick_number(9);
        assert_eq!(app.status_message.as_deref(), Some("No marker #9"));
    }

    #[test]
    fn test_click_at_marker_label() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&runtime, false);
        app.map_area = Some(Rect::new(1, 1, 101, 21));

        // Marker 2 sits at 70%, 25%
        assert!(app.click_at(1 + 70 + 3, 1 + 5));
        assert_eq!(app.map.selected(), Some(2));
        assert!(!app.click_at(0, 0));
    }

    #[test]
    fn test_background_export_reports_back() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&runtime, false);
        app.start_export();
        assert_eq!(app.exports_in_flight, 1);

        wait_for_export(&mut app);
        assert!(app.status_message.unwrap().starts_with("Saved Vantage_Report_Williamsburg,_Brooklyn_"));
    }

    #[test]
    fn test_failed_export_shows_normalized_message() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&runtime, true);
        app.start_export();

        wait_for_export(&mut app);
        assert_eq!(
            app.status_message.as_deref(),
            Some("Williamsburg, Brooklyn: Failed to generate PDF. Please try again.")
        );
    }
}
