//! CLI commands for location reports
//!
//! Reports are cut from an analysis file one location at a time; without
//! `--location` the top-ranked location is used.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Subcommand;
use tracing::info;

use crate::config::{Settings, VantagePaths};
use crate::display::{format_location_list, format_report_preview};
use crate::document::html::to_html;
use crate::error::{VantageError, VantageResult};
use crate::export::ReportExporter;
use crate::models::{
    generated_at_now, load_analysis, AnalysisFile, AnalyzedLocation, ReportInput,
};

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// List the locations in an analysis file, best first
    List {
        /// Analysis file (JSON or YAML)
        file: PathBuf,
    },

    /// Preview a location report in the terminal
    Show {
        /// Analysis file (JSON or YAML)
        file: PathBuf,

        /// Location id or name (defaults to the top-ranked location)
        #[arg(short, long)]
        location: Option<String>,
    },

    /// Export a location report as PDF
    #[command(alias = "pdf")]
    Export {
        /// Analysis file (JSON or YAML)
        file: PathBuf,

        /// Location id or name (defaults to the top-ranked location)
        #[arg(short, long)]
        location: Option<String>,

        /// Directory to write the PDF into
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Settle delay before capture, in milliseconds
        #[arg(long)]
        settle_ms: Option<u64>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the report as standalone HTML
    Html {
        /// Analysis file (JSON or YAML)
        file: PathBuf,

        /// Location id or name (defaults to the top-ranked location)
        #[arg(short, long)]
        location: Option<String>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle report commands
pub async fn handle_report_command(
    paths: &VantagePaths,
    settings: &Settings,
    cmd: ReportCommands,
) -> VantageResult<()> {
    match cmd {
        ReportCommands::List { file } => {
            let analysis = load_analysis(&file)?;
            println!("{}", format_location_list(&analysis));
            Ok(())
        }
        ReportCommands::Show { file, location } => {
            let input = load_report(&file, location.as_deref())?;
            input.validate()?;
            print!("{}", format_report_preview(&input, &settings.currency_symbol));
            Ok(())
        }
        ReportCommands::Export {
            file,
            location,
            output_dir,
            settle_ms,
            json,
        } => {
            handle_export(paths, settings, &file, location.as_deref(), output_dir, settle_ms, json)
                .await
        }
        ReportCommands::Html {
            file,
            location,
            output,
        } => handle_html(settings, &file, location.as_deref(), output),
    }
}

/// Pick a location from an analysis by id or name, or the top-ranked one
pub fn select_location<'a>(
    analysis: &'a AnalysisFile,
    key: Option<&str>,
) -> VantageResult<&'a AnalyzedLocation> {
    match key {
        Some(key) => analysis.find(key),
        None => analysis
            .top_ranked()
            .ok_or_else(|| VantageError::location_not_found("(analysis has no locations)")),
    }
}

fn load_report(file: &Path, location: Option<&str>) -> VantageResult<ReportInput> {
    let analysis = load_analysis(file)?;
    let selected = select_location(&analysis, location)?;
    Ok(analysis.report_for(selected, generated_at_now()))
}

async fn handle_export(
    paths: &VantagePaths,
    settings: &Settings,
    file: &Path,
    location: Option<&str>,
    output_dir: Option<PathBuf>,
    settle_ms: Option<u64>,
    json: bool,
) -> VantageResult<()> {
    let input = load_report(file, location)?;

    let mut settings = settings.clone();
    if let Some(dir) = output_dir {
        settings.output_dir = Some(dir);
    }
    if let Some(ms) = settle_ms {
        settings.settle_delay_ms = ms;
    }
    let exporter = ReportExporter::from_settings(&settings, paths);

    let outcome = exporter.export(&input).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("Exported: {}", outcome.path.display());
        println!("  Pages: {}", outcome.page_count);
    }
    Ok(())
}

fn handle_html(
    settings: &Settings,
    file: &Path,
    location: Option<&str>,
    output: Option<PathBuf>,
) -> VantageResult<()> {
    let input = load_report(file, location)?;
    input.validate()?;
    let document = crate::document::render_report(&input, &settings.currency_symbol);
    let html = to_html(&document);

    match output {
        Some(path) => {
            fs::write(&path, html).map_err(|e| {
                VantageError::Io(format!("Failed to write {}: {}", path.display(), e))
            })?;
            info!(path = %path.display(), "Wrote report HTML");
            println!("Wrote: {}", path.display());
        }
        None => println!("{}", html),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::fixtures::analysis;

    #[test]
    fn test_select_defaults_to_top_ranked() {
        let analysis = analysis();
        assert_eq!(select_location(&analysis, None).unwrap().id, 1);
        assert_eq!(select_location(&analysis, Some("2")).unwrap().id, 2);
        assert_eq!(select_location(&analysis, Some("park slope")).unwrap().id, 3);
        assert!(select_location(&analysis, Some("Harlem")).unwrap_err().is_not_found());
    }

    #[test]
    fn test_select_from_empty_analysis() {
        let empty = AnalysisFile::default();
        assert!(select_location(&empty, None).unwrap_err().is_not_found());
    }
}
