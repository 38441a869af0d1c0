//! User settings for Vantage
//!
//! Manages export preferences: where reports land, how long to let staged
//! content settle, and the rasterization parameters handed to the renderer.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::VantagePaths;
use crate::error::VantageError;

/// User settings for Vantage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Directory reports are written to (defaults to `<base>/reports`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Settle delay before capture, in milliseconds
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Prefix of exported report filenames
    #[serde(default = "default_filename_prefix")]
    pub filename_prefix: String,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Page margin on every side, in inches
    #[serde(default = "default_page_margin")]
    pub page_margin_in: f32,

    /// Image compression quality handed to the renderer (0, 1]
    #[serde(default = "default_image_quality")]
    pub image_quality: f32,

    /// Pixel density multiplier handed to the renderer
    #[serde(default = "default_pixel_scale")]
    pub pixel_scale: u32,
}

fn default_schema_version() -> u32 {
    1
}

fn default_settle_delay_ms() -> u64 {
    2000
}

fn default_filename_prefix() -> String {
    "Vantage_Report".to_string()
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_page_margin() -> f32 {
    0.5
}

fn default_image_quality() -> f32 {
    0.98
}

fn default_pixel_scale() -> u32 {
    2
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            output_dir: None,
            settle_delay_ms: default_settle_delay_ms(),
            filename_prefix: default_filename_prefix(),
            currency_symbol: default_currency(),
            page_margin_in: default_page_margin(),
            image_quality: default_image_quality(),
            pixel_scale: default_pixel_scale(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &VantagePaths) -> Result<Self, VantageError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                VantageError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                VantageError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &VantagePaths) -> Result<(), VantageError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            VantageError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            VantageError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Directory exported reports should be written to
    pub fn reports_dir(&self, paths: &VantagePaths) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| paths.reports_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.settle_delay_ms, 2000);
        assert_eq!(settings.filename_prefix, "Vantage_Report");
        assert_eq!(settings.pixel_scale, 2);
        assert!((settings.image_quality - 0.98).abs() < f32::EPSILON);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = VantagePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.settle_delay_ms = 250;
        settings.output_dir = Some(temp_dir.path().join("out"));

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.settle_delay_ms, 250);
        assert_eq!(loaded.reports_dir(&paths), temp_dir.path().join("out"));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let loaded: Settings = serde_json::from_str(r#"{"settle_delay_ms": 10}"#).unwrap();
        assert_eq!(loaded.settle_delay_ms, 10);
        assert_eq!(loaded.currency_symbol, "$");
        assert!(loaded.output_dir.is_none());
    }
}
