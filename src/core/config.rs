//! Configuration management for toponym.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::canonical::{Scorer, DEFAULT_SIMILARITY_THRESHOLD};
use crate::core::context::windower::{
    DEFAULT_CLOSE_MARKER, DEFAULT_OPEN_MARKER, DEFAULT_WINDOW_RADIUS,
};
use crate::core::error::{Result, ToponymError};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub canonical: CanonicalConfig,
    #[serde(default)]
    pub document: DocumentConfig,
}

/// Context window configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WindowConfig {
    /// Tokens kept on each side of the entity (signed so that a
    /// negative value is reported, not rejected by the parser)
    #[serde(default = "default_radius")]
    pub radius: i64,

    /// Delimiter written before the marked entity
    #[serde(default = "default_open_marker")]
    pub open_marker: String,

    /// Delimiter written after the marked entity
    #[serde(default = "default_close_marker")]
    pub close_marker: String,
}

/// Canonicalization configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CanonicalConfig {
    /// Minimum similarity (0-100) to join a cluster
    #[serde(default = "default_threshold")]
    pub threshold: i64,

    /// String metric applied to token-sorted names
    #[serde(default)]
    pub scorer: Scorer,
}

/// Document loading configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocumentConfig {
    /// Replace each newline with a space when reading documents
    #[serde(default = "default_normalize_newlines")]
    pub normalize_newlines: bool,
}

// Default value functions
fn default_radius() -> i64 {
    DEFAULT_WINDOW_RADIUS as i64
}

fn default_open_marker() -> String {
    DEFAULT_OPEN_MARKER.to_string()
}

fn default_close_marker() -> String {
    DEFAULT_CLOSE_MARKER.to_string()
}

fn default_threshold() -> i64 {
    i64::from(DEFAULT_SIMILARITY_THRESHOLD)
}

fn default_normalize_newlines() -> bool {
    true
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            open_marker: default_open_marker(),
            close_marker: default_close_marker(),
        }
    }
}

impl Default for CanonicalConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            scorer: Scorer::default(),
        }
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            normalize_newlines: default_normalize_newlines(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ToponymError::InvalidConfiguration(format!("Failed to read config file: {e}"))
        })?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    ///
    /// This method uses XDG Base Directory specification for file locations.
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. TOPONYM_CONFIG env var
    /// 2. XDG config file (~/.config/toponym/config.toml)
    /// 3. ./toponym.toml in the working directory
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("TOPONYM_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("toponym.toml").exists() {
                Self::from_file("toponym.toml")?
            } else {
                Self::default()
            }
        };

        // Override with environment variables
        config.merge_env();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Window configuration
        if let Ok(radius) = env::var("TOPONYM_WINDOW_RADIUS") {
            if let Ok(r) = radius.parse() {
                self.window.radius = r;
            }
        }
        if let Ok(marker) = env::var("TOPONYM_OPEN_MARKER") {
            self.window.open_marker = marker;
        }
        if let Ok(marker) = env::var("TOPONYM_CLOSE_MARKER") {
            self.window.close_marker = marker;
        }

        // Canonical configuration
        if let Ok(threshold) = env::var("TOPONYM_THRESHOLD") {
            if let Ok(t) = threshold.parse() {
                self.canonical.threshold = t;
            }
        }
        if let Ok(scorer) = env::var("TOPONYM_SCORER") {
            match scorer.parse() {
                Ok(s) => self.canonical.scorer = s,
                Err(e) => tracing::warn!("Ignoring TOPONYM_SCORER: {}", e),
            }
        }

        // Document configuration
        if let Ok(normalize) = env::var("TOPONYM_NORMALIZE_NEWLINES") {
            if let Ok(n) = normalize.parse() {
                self.document.normalize_newlines = n;
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate window config
        if self.window.radius < 0 {
            return Err(ToponymError::InvalidConfiguration(format!(
                "Window radius must be >= 0, got {}",
                self.window.radius
            )));
        }

        if self.window.open_marker.is_empty() || self.window.close_marker.is_empty() {
            return Err(ToponymError::InvalidConfiguration(
                "Entity markers must be non-empty".to_string(),
            ));
        }

        // Validate canonical config
        if !(0..=100).contains(&self.canonical.threshold) {
            return Err(ToponymError::InvalidConfiguration(format!(
                "Similarity threshold must be within 0..=100, got {}",
                self.canonical.threshold
            )));
        }

        Ok(())
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Window radius: {} tokens", self.window.radius);
        tracing::info!(
            "  Markers: {} {}",
            self.window.open_marker,
            self.window.close_marker
        );
        tracing::info!("  Threshold: {}", self.canonical.threshold);
        tracing::info!("  Scorer: {}", self.canonical.scorer);
        tracing::info!(
            "  Normalize newlines: {}",
            self.document.normalize_newlines
        );
    }
}
