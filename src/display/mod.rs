//! Display formatting for terminal output

pub mod report;

pub use report::{format_location_list, format_report_preview};
