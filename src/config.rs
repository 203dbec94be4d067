//! Configuration file parser for ~/.config/aisle/config.toml.
//!
//! The config file is optional; a missing file yields `Config::default()`.
//! Unknown keys are accepted but logged, since they are usually typos.
use crate::api::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::state::ViewMode;
use crate::theme::ThemeVariant;
use crate::util::TimeDisplay;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

/// Top-level application configuration.
///
/// Every field has a default, so any subset of keys can be given.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API root; `/categories` is appended.
    pub base_url: String,

    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,

    /// Initial view: "table" or "cards".
    pub view_mode: String,

    /// "dark" or "light".
    pub theme: String,

    /// Show timestamps in the local timezone instead of UTC.
    pub local_time: bool,

    /// Keybinding overrides: action name -> key string.
    pub keybindings: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            view_mode: "table".to_string(),
            theme: "dark".to_string(),
            local_time: false,
            keybindings: HashMap::new(),
        }
    }
}

const KNOWN_KEYS: [&str; 6] = [
    "base_url",
    "timeout_secs",
    "view_mode",
    "theme",
    "local_time",
    "keybindings",
];

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing or empty file → defaults
    /// - Invalid TOML or wrong types → `ConfigError::Parse`
    /// - Over 1 MB → `ConfigError::TooLarge`
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

    /// Parse config from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            tracing::debug!("Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(content)?;
        tracing::info!(
            base_url = %config.base_url,
            view_mode = %config.view_mode,
            theme = %config.theme,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Request timeout. Zero is treated as the default rather than "never".
    pub fn timeout(&self) -> Duration {
        match self.timeout_secs {
            0 => DEFAULT_TIMEOUT,
            secs => Duration::from_secs(secs),
        }
    }

    /// Parsed view mode, falling back to table for unknown names.
    pub fn initial_view_mode(&self) -> ViewMode {
        ViewMode::from_str_name(&self.view_mode).unwrap_or_else(|| {
            tracing::warn!(view_mode = %self.view_mode, "Unknown view mode, using table");
            ViewMode::Table
        })
    }

    /// Parsed theme, falling back to dark for unknown names.
    pub fn theme_variant(&self) -> ThemeVariant {
        ThemeVariant::from_str_name(&self.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %self.theme, "Unknown theme, using dark");
            ThemeVariant::Dark
        })
    }

    pub fn time_display(&self) -> TimeDisplay {
        if self.local_time {
            TimeDisplay::Local
        } else {
            TimeDisplay::Utc
        }
    }
}
