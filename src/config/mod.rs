//! Configuration module for Vantage
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - Process-wide API keys sourced from the environment

pub mod keys;
pub mod paths;
pub mod settings;

pub use keys::ApiKeys;
pub use paths::VantagePaths;
pub use settings::Settings;
