//! Report export orchestration
//!
//! An export renders the report tree, stages it on a surface for capture,
//! waits for the surface to settle, rasterizes it and hands the bytes to a
//! sink. The staged node is owned by a [`StagingGuard`], so it is detached
//! on every exit path including errors, panics and a dropped future.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, error, info};

use super::filename::{report_filename, DEFAULT_PREFIX};
use super::pdf::PdfRasterizer;
use super::rasterizer::{Rasterizer, RenderOptions};
use super::readiness::ReadinessPolicy;
use super::sink::{DocumentSink, FileSink};
use super::stage::{MemorySurface, PageFrame, StagedNode, StagingGuard, Surface};
use crate::config::{Settings, VantagePaths};
use crate::document::{render_report, Document};
use crate::error::{VantageError, VantageResult};
use crate::models::ReportInput;

/// Result of a successful export
#[derive(Debug, Clone, Serialize)]
pub struct ExportOutcome {
    /// Suggested filename, as derived from the location name
    pub filename: String,
    /// Where the sink put the document
    pub path: PathBuf,
    pub page_count: usize,
}

/// Exports location reports as paginated documents
pub struct ReportExporter {
    surface: Arc<dyn Surface>,
    rasterizer: Arc<dyn Rasterizer>,
    sink: Arc<dyn DocumentSink>,
    options: RenderOptions,
    readiness: ReadinessPolicy,
    frame: PageFrame,
    prefix: String,
    currency_symbol: String,
}

impl ReportExporter {
    pub fn new(
        surface: Arc<dyn Surface>,
        rasterizer: Arc<dyn Rasterizer>,
        sink: Arc<dyn DocumentSink>,
    ) -> Self {
        Self {
            surface,
            rasterizer,
            sink,
            options: RenderOptions::default(),
            readiness: ReadinessPolicy::default(),
            frame: PageFrame::letter(),
            prefix: DEFAULT_PREFIX.to_string(),
            currency_symbol: "$".to_string(),
        }
    }

    /// PDF exporter writing into the configured reports directory
    pub fn from_settings(settings: &Settings, paths: &VantagePaths) -> Self {
        Self::new(
            Arc::new(MemorySurface::new()),
            Arc::new(PdfRasterizer::new()),
            Arc::new(FileSink::new(settings.reports_dir(paths))),
        )
        .with_options(RenderOptions::from_settings(settings))
        .with_readiness(ReadinessPolicy::from_millis(settings.settle_delay_ms))
        .with_prefix(settings.filename_prefix.clone())
        .with_currency_symbol(settings.currency_symbol.clone())
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_readiness(mut self, readiness: ReadinessPolicy) -> Self {
        self.readiness = readiness;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    pub fn surface(&self) -> &Arc<dyn Surface> {
        &self.surface
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render the report tree without staging or rasterizing it
    pub fn render_preview(&self, input: &ReportInput) -> VantageResult<Document> {
        input.validate()?;
        Ok(render_report(input, &self.currency_symbol))
    }

    /// Export a report dated today (UTC)
    pub async fn export(&self, input: &ReportInput) -> VantageResult<ExportOutcome> {
        self.export_dated(input, Utc::now().date_naive()).await
    }

    /// Export a report, embedding `date` in the filename
    ///
    /// Invalid input is rejected before anything is staged. Every later
    /// failure is logged and reported as [`VantageError::ExportFailed`].
    pub async fn export_dated(
        &self,
        input: &ReportInput,
        date: NaiveDate,
    ) -> VantageResult<ExportOutcome> {
        input.validate()?;

        let filename = report_filename(&self.prefix, &input.location.name, date);
        let document = Arc::new(render_report(input, &self.currency_symbol));
        info!(location = %input.location.name, filename = %filename, "Exporting report");

        match self.capture(document, &filename).await {
            Ok(outcome) => {
                info!(path = %outcome.path.display(), pages = outcome.page_count, "Report exported");
                Ok(outcome)
            }
            Err(cause) => {
                error!(location = %input.location.name, error = %cause, "Error generating PDF");
                Err(VantageError::ExportFailed)
            }
        }
    }

    async fn capture(
        &self,
        document: Arc<Document>,
        filename: &str,
    ) -> VantageResult<ExportOutcome> {
        let node = StagedNode::new(document, self.frame.clone());
        let guard = StagingGuard::stage(Arc::clone(&self.surface), node)?;

        self.readiness.wait().await;

        let rendered = self
            .rasterizer
            .render(guard.node(), &self.options)
            .await
            .map_err(|e| VantageError::Render(e.to_string()))?;
        debug!(bytes = rendered.bytes.len(), "Rasterized staged node");

        let page_count = rendered.page_count;
        let bytes = rendered.bytes;
        let sink = Arc::clone(&self.sink);
        let name = filename.to_string();
        let path = tokio::task::spawn_blocking(move || sink.deliver(&name, &bytes))
            .await
            .map_err(|e| VantageError::Delivery(format!("Delivery task failed: {}", e)))??;
        drop(guard);

        Ok(ExportOutcome {
            filename: filename.to_string(),
            path,
            page_count,
        })
    }
}
