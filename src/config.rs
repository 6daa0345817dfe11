//! Configuration file parser for ~/.config/roster/config.toml.
//!
//! The config file is optional: a missing or empty file yields
//! `Config::default()`. Unknown keys are accepted but logged.
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::adapter::AdapterConfig;
use crate::artwork::DEFAULT_MEMORY_CACHE_SIZE;
use crate::labels::Labels;
use crate::theme::Rgba;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration
// ============================================================================

/// Top-level application configuration.
///
/// Every field has a default, so any subset of keys can be given.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme variant name ("dark" or "light").
    pub theme: String,

    /// Start in extended mode (line three, background artwork, play on tap).
    pub extended: bool,

    /// Tint laid over extended rows, `#RRGGBBAA`.
    pub overlay_color: Rgba,

    /// Directory holding artwork files named by the SHA-256 of the artist name.
    pub artwork_dir: Option<PathBuf>,

    /// Number of artworks kept in memory.
    pub artwork_cache_size: usize,

    /// Sort the catalog by artist name on load.
    pub sort_by_name: bool,

    /// Row subtitle templates.
    pub labels: Labels,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            extended: false,
            overlay_color: Rgba::LIST_ITEM_OVERLAY,
            artwork_dir: None,
            artwork_cache_size: DEFAULT_MEMORY_CACHE_SIZE,
            sort_by_name: true,
            labels: Labels::default(),
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 7] = [
        "theme",
        "extended",
        "overlay_color",
        "artwork_dir",
        "artwork_cache_size",
        "sort_by_name",
        "labels",
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML or a bad value → `Err(ConfigError::Parse)`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        Self::parse(&content)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(content)?;
        tracing::info!(theme = %config.theme, extended = config.extended, "Loaded configuration");
        Ok(config)
    }

    /// Settings handed to the list adapter.
    pub fn adapter_config(&self) -> AdapterConfig {
        AdapterConfig {
            extended: self.extended,
            overlay: self.overlay_color,
            ..AdapterConfig::default()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
