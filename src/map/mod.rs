//! Map markers for analyzed locations
//!
//! The map is purely presentational: it holds an ordered list of markers, a
//! selection and a click callback. Rendering lives in the TUI.

use std::fmt;

use serde::Serialize;

use crate::models::{AnalysisFile, AnalyzedLocation, ConfidenceTier};

/// Score at or above which a location without a known tier is HIGH
pub const HIGH_SCORE: u8 = 80;
/// Score at or above which a location without a known tier is MEDIUM
pub const MEDIUM_SCORE: u8 = 60;

/// Marker color class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarkerStatus {
    High,
    Medium,
    Low,
}

impl MarkerStatus {
    pub fn from_score(score: u8) -> Self {
        if score >= HIGH_SCORE {
            Self::High
        } else if score >= MEDIUM_SCORE {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }

    /// Legend text
    pub fn legend(&self) -> &'static str {
        match self {
            Self::High => "High Score",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl From<ConfidenceTier> for MarkerStatus {
    fn from(tier: ConfidenceTier) -> Self {
        match tier {
            ConfidenceTier::High => Self::High,
            ConfidenceTier::Medium => Self::Medium,
            ConfidenceTier::Low => Self::Low,
        }
    }
}

impl fmt::Display for MarkerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A location pinned on the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: u32,
    pub name: String,
    pub score: u8,
    /// Percent of map width
    pub x: f32,
    /// Percent of map height
    pub y: f32,
    pub status: MarkerStatus,
}

impl Marker {
    /// Marker for a location; an unrecognized confidence label reads as LOW
    pub fn from_location(location: &AnalyzedLocation) -> Self {
        let status = location
            .summary
            .confidence
            .tier()
            .map(MarkerStatus::from)
            .unwrap_or(MarkerStatus::Low);
        Self {
            id: location.id,
            name: location.summary.name.clone(),
            score: location.summary.score,
            x: location.x,
            y: location.y,
            status,
        }
    }

    /// Marker whose status comes from the score alone
    pub fn scored(id: u32, name: impl Into<String>, score: u8, x: f32, y: f32) -> Self {
        Self {
            id,
            name: name.into(),
            score,
            x,
            y,
            status: MarkerStatus::from_score(score),
        }
    }

    pub fn score_label(&self) -> String {
        format!("{}/100", self.score)
    }
}

type ClickHandler = Box<dyn FnMut(u32) + Send>;

/// Ordered markers with a selection
#[derive(Default)]
pub struct MapView {
    markers: Vec<Marker>,
    selected: Option<u32>,
    on_click: Option<ClickHandler>,
}

impl fmt::Debug for MapView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapView")
            .field("markers", &self.markers)
            .field("selected", &self.selected)
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}

impl MapView {
    pub fn new(markers: Vec<Marker>) -> Self {
        Self {
            markers,
            ..Self::default()
        }
    }

    /// Markers for every location in file order
    pub fn from_analysis(analysis: &AnalysisFile) -> Self {
        Self::new(analysis.locations.iter().map(Marker::from_location).collect())
    }

    pub fn with_selected(mut self, id: Option<u32>) -> Self {
        self.selected = id.filter(|id| self.index_of(*id).is_some());
        self
    }

    /// Register the callback invoked on every marker click
    pub fn on_click<F>(mut self, handler: F) -> Self
    where
        F: FnMut(u32) + Send + 'static,
    {
        self.on_click = Some(Box::new(handler));
        self
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn selected(&self) -> Option<u32> {
        self.selected
    }

    pub fn selected_marker(&self) -> Option<&Marker> {
        self.selected.and_then(|id| self.marker(id))
    }

    pub fn marker(&self, id: u32) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    fn index_of(&self, id: u32) -> Option<usize> {
        self.markers.iter().position(|m| m.id == id)
    }

    /// Click a marker by id; unknown ids are ignored
    pub fn click(&mut self, id: u32) -> bool {
        if self.index_of(id).is_none() {
            return false;
        }
        self.selected = Some(id);
        if let Some(handler) = self.on_click.as_mut() {
            handler(id);
        }
        true
    }

    /// Click the marker shown with number `number` (1-based)
    pub fn click_number(&mut self, number: usize) -> bool {
        match number.checked_sub(1).and_then(|i| self.markers.get(i)) {
            Some(marker) => {
                let id = marker.id;
                self.click(id)
            }
            None => false,
        }
    }

    /// Select the next marker, wrapping around
    pub fn select_next(&mut self) {
        self.step(1);
    }

    /// Select the previous marker, wrapping around
    pub fn select_prev(&mut self) {
        self.step(-1);
    }

    fn step(&mut self, delta: isize) {
        let len = self.markers.len();
        if len == 0 {
            return;
        }
        let next = match self.selected.and_then(|id| self.index_of(id)) {
            Some(i) => (i as isize + delta).rem_euclid(len as isize) as usize,
            None if delta >= 0 => 0,
            None => len - 1,
        };
        self.selected = Some(self.markers[next].id);
    }

    /// Grid cell for a marker on a `width` x `height` canvas
    pub fn project(marker: &Marker, width: u16, height: u16) -> (u16, u16) {
        let cell = |pct: f32, size: u16| -> u16 {
            if size == 0 {
                return 0;
            }
            let pct = if pct.is_finite() { pct.clamp(0.0, 100.0) } else { 0.0 };
            let max = size - 1;
            ((pct / 100.0) * max as f32).round() as u16
        };
        (cell(marker.x, width), cell(marker.y, height))
    }
}
