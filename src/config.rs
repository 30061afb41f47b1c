//! TOML-based dispatcher configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::plan::cost::DEFAULT_CO2_FACTOR;
use crate::plan::dispatch::DEFAULT_STEP_MW;

/// Top-level dispatcher configuration parsed from TOML.
///
/// All fields have defaults matching the standard preset. Load from TOML
/// with [`DispatchConfig::from_toml_file`] or use
/// [`DispatchConfig::standard`] for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DispatchConfig {
    /// Cost model and dispatch search parameters.
    #[serde(default)]
    pub model: ModelConfig,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Cost model and dispatch search parameters.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    /// Tons of CO2 emitted per MWh by fuel-burning plants.
    pub co2_factor: f64,
    /// Granularity of the descending output search (MW).
    pub step_mw: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            co2_factor: DEFAULT_CO2_FACTOR,
            step_mw: DEFAULT_STEP_MW,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// TCP port the API listens on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8888 }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default level filter; `RUST_LOG` takes precedence when set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"model.step_mw"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl DispatchConfig {
    /// Returns the standard configuration: 0.3 t/MWh and a 1 MW search step.
    pub fn standard() -> Self {
        Self::default()
    }

    /// Returns the fine-step preset: same cost model, 0.1 MW search step.
    pub fn fine_step() -> Self {
        Self {
            model: ModelConfig {
                step_mw: 0.1,
                ..ModelConfig::default()
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["standard", "fine_step"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "standard" => Ok(Self::standard()),
            "fine_step" => Ok(Self::fine_step()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let m = &self.model;

        if !m.co2_factor.is_finite() || m.co2_factor < 0.0 {
            errors.push(ConfigError {
                field: "model.co2_factor".into(),
                message: "must be a finite number >= 0".into(),
            });
        }
        if !m.step_mw.is_finite() || m.step_mw <= 0.0 {
            errors.push(ConfigError {
                field: "model.step_mw".into(),
                message: "must be a finite number > 0".into(),
            });
        }

        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigError {
                field: "logging.level".into(),
                message: format!(
                    "must be one of {}, got \"{}\"",
                    LOG_LEVELS.join(", "),
                    self.logging.level
                ),
            });
        }

        errors
    }
}
