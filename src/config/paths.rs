//! Path management for Vantage
//!
//! Provides XDG-compliant path resolution for configuration and exported reports.
//!
//! ## Path Resolution Order
//!
//! 1. `VANTAGE_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/vantage` or `~/.config/vantage`
//! 3. Windows: `%APPDATA%\vantage`

use std::path::PathBuf;

use crate::error::VantageError;

/// Manages all paths used by Vantage
#[derive(Debug, Clone)]
pub struct VantagePaths {
    /// Base directory for all Vantage data
    base_dir: PathBuf,
}

impl VantagePaths {
    /// Create a new VantagePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, VantageError> {
        let base_dir = if let Ok(custom) = std::env::var("VANTAGE_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create VantagePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/vantage/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the default directory exported reports are saved to
    pub fn reports_dir(&self) -> PathBuf {
        self.base_dir.join("reports")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), VantageError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| VantageError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.reports_dir())
            .map_err(|e| VantageError::Io(format!("Failed to create reports directory: {}", e)))?;

        Ok(())
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, VantageError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("vantage"));
    }
    let dirs = directories::BaseDirs::new()
        .ok_or_else(|| VantageError::Config("Could not determine home directory".into()))?;
    Ok(dirs.home_dir().join(".config").join("vantage"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, VantageError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| VantageError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("vantage"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = VantagePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.reports_dir(), temp_dir.path().join("reports"));
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = VantagePaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.reports_dir().exists());
        assert!(!paths.is_initialized());
    }
}
