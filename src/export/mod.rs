//! Report export pipeline
//!
//! - `filename`: output naming
//! - `stage`: staging surface and the guard that cleans it up
//! - `readiness`: settle policy between staging and capture
//! - `rasterizer`: render options and the rendering collaborator
//! - `layout` / `pdf`: the built-in PDF backend
//! - `sink`: delivery of finished documents
//! - `exporter`: the orchestration of all of the above

pub mod exporter;
pub mod filename;
pub mod layout;
pub mod pdf;
pub mod rasterizer;
pub mod readiness;
pub mod sink;
pub mod stage;

pub use exporter::{ExportOutcome, ReportExporter};
pub use filename::{report_filename, sanitize_location_name};
pub use pdf::PdfRasterizer;
pub use rasterizer::{RasterError, Rasterizer, RenderOptions, RenderedDocument};
pub use readiness::ReadinessPolicy;
pub use sink::{DocumentSink, FileSink, MemorySink};
pub use stage::{MemorySurface, PageFrame, StagedNode, StagingGuard, Surface};
