//! Vantage - location intelligence reports from the terminal
//!
//! This library turns scored retail locations into printable reports. It
//! renders each report as a structured document tree, stages it on a
//! capture surface, paginates it onto US Letter pages and delivers the
//! resulting PDF, cleaning up the staged node whatever happens.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Paths, settings and process-wide API keys
//! - `error`: Custom error types
//! - `models`: Report input, analysis files and money
//! - `document`: The report tree, its builder and HTML rendering
//! - `export`: Staging, rasterizing and delivering PDF reports
//! - `imagery`: Generated storefront and floor plan images
//! - `map`: Map markers and selection
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//! - `tui`: The interactive map dashboard
//!
//! # Example
//!
//! ```rust,ignore
//! use vantage_cli::config::{Settings, VantagePaths};
//! use vantage_cli::export::ReportExporter;
//!
//! let paths = VantagePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let exporter = ReportExporter::from_settings(&settings, &paths);
//! let outcome = exporter.export(&input).await?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod document;
pub mod error;
pub mod export;
pub mod imagery;
pub mod map;
pub mod models;
pub mod tui;

pub use error::{VantageError, VantageResult};
