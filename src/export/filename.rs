//! Report filenames
//!
//! `<Prefix>_<LocationName>_<YYYY-MM-DD>.pdf`, where every run of whitespace
//! in the location name collapses to a single `_`. Names are not unique:
//! two exports of the same location on the same day share a filename.

use chrono::NaiveDate;

/// Default filename prefix
pub const DEFAULT_PREFIX: &str = "Vantage_Report";

/// Extension of exported reports
pub const REPORT_EXTENSION: &str = "pdf";

/// Replace each run of whitespace with a single underscore, keeping all other characters
pub fn sanitize_location_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push('_');
            }
            in_whitespace = true;
        } else {
            out.push(ch);
            in_whitespace = false;
        }
    }
    out
}

/// Build the filename for a report exported on `date`
pub fn report_filename(prefix: &str, location_name: &str, date: NaiveDate) -> String {
    format!(
        "{}_{}_{}.{}",
        prefix,
        sanitize_location_name(location_name),
        date.format("%Y-%m-%d"),
        REPORT_EXTENSION
    )
}
