//! Analysis files: the scored candidate locations a dashboard works from
//!
//! An analysis file holds the business profile once plus every scored
//! location with its map position. Reports are cut from it one location at
//! a time.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::money::{serde_dollars, Money};
use super::report::{LocationSummary, ReportInput};
use crate::error::{VantageError, VantageResult};

/// A scored location placed on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedLocation {
    pub id: u32,
    /// Horizontal map position, percent of width
    pub x: f32,
    /// Vertical map position, percent of height
    pub y: f32,
    #[serde(flatten)]
    pub summary: LocationSummary,
}

/// A complete analysis run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisFile {
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
    #[serde(default)]
    pub locations: Vec<AnalyzedLocation>,
}

impl AnalysisFile {
    /// Find a location by numeric id or by case-insensitive name
    pub fn find(&self, key: &str) -> VantageResult<&AnalyzedLocation> {
        let key = key.trim();
        if let Ok(id) = key.parse::<u32>() {
            if let Some(location) = self.locations.iter().find(|l| l.id == id) {
                return Ok(location);
            }
        }
        self.locations
            .iter()
            .find(|l| l.summary.name.eq_ignore_ascii_case(key))
            .ok_or_else(|| VantageError::location_not_found(key))
    }

    /// Find a location by id
    pub fn get(&self, id: u32) -> Option<&AnalyzedLocation> {
        self.locations.iter().find(|l| l.id == id)
    }

    /// The highest-scoring location; the first one wins ties
    pub fn top_ranked(&self) -> Option<&AnalyzedLocation> {
        self.locations
            .iter()
            .reduce(|best, l| if l.summary.score > best.summary.score { l } else { best })
    }

    /// Locations ordered by descending score, stable for ties
    pub fn ranked(&self) -> Vec<&AnalyzedLocation> {
        let mut ranked: Vec<&AnalyzedLocation> = self.locations.iter().collect();
        ranked.sort_by(|a, b| b.summary.score.cmp(&a.summary.score));
        ranked
    }

    /// Build the report input for one location
    pub fn report_for(&self, location: &AnalyzedLocation, generated_at: impl Into<String>) -> ReportInput {
        ReportInput {
            business_type: self.business_type.clone(),
            target_demo: self.target_demo.clone(),
            budget: self.budget,
            location: location.summary.clone(),
            generated_at: generated_at.into(),
        }
    }
}

/// Load an analysis file; `.yaml`/`.yml` are read as YAML, everything else as JSON
pub fn load_analysis<P: AsRef<Path>>(path: P) -> VantageResult<AnalysisFile> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|e| {
        VantageError::Io(format!("Failed to open {}: {}", path.display(), e))
    })?;
    let reader = BufReader::new(file);

    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

    let analysis: AnalysisFile = if is_yaml {
        serde_yaml::from_reader(reader)
            .map_err(|e| VantageError::Yaml(format!("Failed to parse {}: {}", path.display(), e)))?
    } else {
        serde_json::from_reader(reader)
            .map_err(|e| VantageError::Json(format!("Failed to parse {}: {}", path.display(), e)))?
    };

    tracing::debug!(
        path = %path.display(),
        locations = analysis.locations.len(),
        "loaded analysis file"
    );

    Ok(analysis)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::models::report::fixtures::location;

    pub fn analysis() -> AnalysisFile {
        let mut second = location("Astoria, Queens");
        second.score = 64;
        second.confidence = "MEDIUM".into();
        second.competitors.clear();

        let mut third = location("Park Slope");
        third.score = 87;

        AnalysisFile {
            business_type: Some("bubble tea".into()),
            target_demo: Some("Gen Z".into()),
            budget: Some(Money::from_dollars(15000)),
            locations: vec![
                AnalyzedLocation {
                    id: 1,
                    x: 35.0,
                    y: 40.0,
                    summary: location("Williamsburg, Brooklyn"),
                },
                AnalyzedLocation {
                    id: 2,
                    x: 70.0,
                    y: 25.0,
                    summary: second,
                },
                AnalyzedLocation {
                    id: 3,
                    x: 55.0,
                    y: 75.0,
                    summary: third,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::analysis;
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_find_by_id_and_name() {
        let analysis = analysis();
        assert_eq!(analysis.find("2").unwrap().summary.name, "Astoria, Queens");
        assert_eq!(analysis.find("park slope").unwrap().id, 3);
        assert!(analysis.find("Harlem").unwrap_err().is_not_found());
    }

    #[test]
    fn test_top_ranked_prefers_first_on_tie() {
        let analysis = analysis();
        assert_eq!(analysis.top_ranked().unwrap().id, 1);

        let ranked: Vec<u32> = analysis.ranked().iter().map(|l| l.id).collect();
        assert_eq!(ranked, vec![1, 3, 2]);
    }

    #[test]
    fn test_report_for_carries_profile() {
        let analysis = analysis();
        let report = analysis.report_for(analysis.get(2).unwrap(), "today");
        assert_eq!(report.location.name, "Astoria, Queens");
        assert_eq!(report.business_type.as_deref(), Some("bubble tea"));
        assert_eq!(report.budget, Some(Money::from_dollars(15000)));
        assert_eq!(report.generated_at, "today");
    }

    #[test]
    fn test_load_yaml_and_json() {
        let temp_dir = TempDir::new().unwrap();

        let yaml_path = temp_dir.path().join("analysis.yaml");
        let mut file = File::create(&yaml_path).unwrap();
        writeln!(
            file,
            "business_type: coffee shop\nbudget: 15000\nlocations:\n  - id: 7\n    x: 10\n    y: 20\n    name: Midtown\n    score: 71\n    confidence: MEDIUM\n"
        )
        .unwrap();

        let loaded = load_analysis(&yaml_path).unwrap();
        assert_eq!(loaded.locations[0].summary.name, "Midtown");
        assert_eq!(loaded.budget, Some(Money::from_dollars(15000)));

        let json_path = temp_dir.path().join("analysis.json");
        std::fs::write(&json_path, serde_json::to_string(&analysis()).unwrap()).unwrap();
        let loaded = load_analysis(&json_path).unwrap();
        assert_eq!(loaded, analysis());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_analysis("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, VantageError::Io(_)));
    }
}
