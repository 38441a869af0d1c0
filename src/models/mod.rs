//! Core data models for Vantage
//!
//! This module contains the data structures reports are built from:
//! scored locations, their metrics, competitors and revenue scenarios,
//! plus the money type used for budgets.

pub mod analysis;
pub mod money;
pub mod report;

pub use analysis::{load_analysis, AnalysisFile, AnalyzedLocation};
pub use money::Money;
pub use report::{
    generated_at_now, Competitor, ConfidenceLabel, ConfidenceTier, LocationSummary, Metric,
    ReportInput, RevenueScenario,
};
