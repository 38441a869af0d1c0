//! Report input model
//!
//! A [`ReportInput`] is built fresh for every export, consumed once by the
//! exporter and dropped. Nothing here is persisted.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::{serde_dollars, Money};
use crate::error::{VantageError, VantageResult};

/// Local time as shown in report headers, e.g. `10/16/2026, 9:30:00 AM`
pub fn generated_at_now() -> String {
    Local::now().format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// Coarse qualitative tier attached to a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    /// Canonical uppercase label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-form confidence label as supplied by the scoring service
///
/// Usually one of HIGH/MEDIUM/LOW, but any text is carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfidenceLabel(String);

impl ConfidenceLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The label exactly as supplied
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The label as rendered on badges
    pub fn as_upper(&self) -> String {
        self.0.trim().to_uppercase()
    }

    /// Parse the label into a known tier, if it is one
    pub fn tier(&self) -> Option<ConfidenceTier> {
        match self.as_upper().as_str() {
            "HIGH" => Some(ConfidenceTier::High),
            "MEDIUM" => Some(ConfidenceTier::Medium),
            "LOW" => Some(ConfidenceTier::Low),
            _ => None,
        }
    }
}

impl From<&str> for ConfidenceLabel {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<ConfidenceTier> for ConfidenceLabel {
    fn from(tier: ConfidenceTier) -> Self {
        Self::new(tier.as_str())
    }
}

impl fmt::Display for ConfidenceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One line of the score breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub score: u8,
    pub confidence: ConfidenceLabel,
}

/// A nearby competing business
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub distance: String,
    pub weakness: String,
}

impl Competitor {
    /// Rating suitable for display; zero counts as "no rating"
    pub fn display_rating(&self) -> Option<f64> {
        self.rating.filter(|r| *r > 0.0)
    }
}

/// A revenue projection scenario; all amounts are pre-formatted display strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueScenario {
    pub scenario: String,
    pub monthly: String,
    pub annual: String,
    pub margin: String,
}

/// Scored candidate location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSummary {
    pub name: String,
    pub score: u8,
    pub confidence: ConfidenceLabel,
    #[serde(default)]
    pub metrics: Vec<Metric>,
    #[serde(default)]
    pub competitors: Vec<Competitor>,
    #[serde(default)]
    pub revenue: Vec<RevenueScenario>,
}

/// Everything a single report export needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_demo: Option<String>,
    #[serde(
        default,
        with = "serde_dollars",
        skip_serializing_if = "Option::is_none"
    )]
    pub budget: Option<Money>,
    pub location: LocationSummary,
    pub generated_at: String,
}

impl ReportInput {
    /// Business type, if set to something non-blank
    pub fn business_type(&self) -> Option<&str> {
        non_blank(&self.business_type)
    }

    /// Target demographic, if set to something non-blank
    pub fn target_demo(&self) -> Option<&str> {
        non_blank(&self.target_demo)
    }

    /// Budget, if set to a non-zero amount
    pub fn budget(&self) -> Option<Money> {
        self.budget.filter(|b| !b.is_zero())
    }

    /// Whether the business-profile section should be rendered
    pub fn has_business_profile(&self) -> bool {
        self.business_type().is_some() || self.target_demo().is_some() || self.budget().is_some()
    }

    /// Check the input before anything is staged or rendered
    pub fn validate(&self) -> VantageResult<()> {
        let location = &self.location;

        if location.name.trim().is_empty() {
            return Err(VantageError::Validation(
                "location name must not be empty".into(),
            ));
        }

        if location.score > 100 {
            return Err(VantageError::Validation(format!(
                "score for '{}' must be between 0 and 100, got {}",
                location.name, location.score
            )));
        }

        if let Some(metric) = location.metrics.iter().find(|m| m.score > 100) {
            return Err(VantageError::Validation(format!(
                "metric '{}' score must be between 0 and 100, got {}",
                metric.label, metric.score
            )));
        }

        if let Some(competitor) = location
            .competitors
            .iter()
            .find(|c| c.rating.is_some_and(|r| !r.is_finite() || r < 0.0))
        {
            return Err(VantageError::Validation(format!(
                "competitor '{}' has an invalid rating",
                competitor.name
            )));
        }

        Ok(())
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}


#[cfg(test)]
mod tests {
    use super::fixtures::input;
    use super::*;

    #[test]
    fn test_generated_at_format() {
        let stamp = generated_at_now();
        assert!(stamp.contains(", "));
        assert!(stamp.ends_with("AM") || stamp.ends_with("PM"));
    }

    #[test]
    fn test_confidence_label() {
        let label = ConfidenceLabel::new(" medium ");
        assert_eq!(label.as_upper(), "MEDIUM");
        assert_eq!(label.tier(), Some(ConfidenceTier::Medium));
        assert_eq!(ConfidenceLabel::new("unsure").tier(), None);
    }

    #[test]
    fn test_valid_input() {
        assert!(input("Williamsburg, Brooklyn").validate().is_ok());
    }

    #[test]
    fn test_blank_name_rejected() {
        let err = input("   ").validate().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_score_out_of_range_rejected() {
        let mut report = input("SoHo");
        report.location.score = 101;
        assert!(report.validate().unwrap_err().is_validation());

        let mut report = input("SoHo");
        report.location.metrics[0].score = 200;
        assert!(report.validate().is_err());
    }

    #[test]
    fn test_negative_rating_rejected() {
        let mut report = input("SoHo");
        report.location.competitors[0].rating = Some(-1.0);
        assert!(report.validate().is_err());
    }

    #[test]
    fn test_business_profile_presence() {
        let mut report = input("SoHo");
        assert!(report.has_business_profile());

        report.business_type = None;
        report.target_demo = Some("  ".into());
        report.budget = Some(Money::zero());
        assert!(!report.has_business_profile());

        report.budget = Some(Money::from_dollars(1));
        assert!(report.has_business_profile());
    }

    #[test]
    fn test_zero_rating_is_not_displayed() {
        let competitor = Competitor {
            name: "Cafe".into(),
            rating: Some(0.0),
            distance: "0.1 mi".into(),
            weakness: "None".into(),
        };
        assert_eq!(competitor.display_rating(), None);
    }

    #[test]
    fn test_deserialize_minimal_location() {
        let json = r#"{
            "location": {"name": "Astoria", "score": 55, "confidence": "LOW"},
            "generated_at": "now"
        }"#;
        let report: ReportInput = serde_json::from_str(json).unwrap();
        assert!(report.location.metrics.is_empty());
        assert!(report.budget.is_none());
        assert!(!report.has_business_profile());
    }
}
