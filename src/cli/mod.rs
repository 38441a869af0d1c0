//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the report, imagery and map
//! layers.

pub mod image;
pub mod map;
pub mod report;

pub use image::{handle_image_command, ImageCommands};
pub use map::handle_map_command;
pub use report::{handle_report_command, ReportCommands};
