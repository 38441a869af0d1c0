//! CLI command for the interactive map

use std::path::Path;
use std::sync::Arc;

use tokio::runtime::Handle;

use crate::config::{Settings, VantagePaths};
use crate::error::{VantageError, VantageResult};
use crate::export::ReportExporter;
use crate::models::load_analysis;
use crate::tui::run_tui;

/// Open the map dashboard for an analysis file
///
/// Blocks until the user quits; call it outside the runtime `runtime`
/// belongs to.
pub fn handle_map_command(
    paths: &VantagePaths,
    settings: &Settings,
    file: &Path,
    runtime: Handle,
) -> VantageResult<()> {
    let analysis = load_analysis(file)?;
    if analysis.locations.is_empty() {
        return Err(VantageError::Validation(format!(
            "{} contains no locations",
            file.display()
        )));
    }

    let exporter = Arc::new(ReportExporter::from_settings(settings, paths));
    run_tui(analysis, exporter, runtime).map_err(|e| VantageError::Tui(e.to_string()))
}
