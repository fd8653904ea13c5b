// crates/launch-gate-config/src/config.rs
// ============================================================================
// Module: Launch Gate Configuration
// Description: Configuration loading and validation for Launch Gate.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: launch-gate-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Missing or invalid configuration fails closed: a config that cannot be
//! read, parsed, and validated never produces an evaluator.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use launch_gate_core::CONFLICT_WINDOW_DAYS;
use launch_gate_core::DEFAULT_WARNING_DAYS;
use launch_gate_core::DocumentKey;
use launch_gate_core::EvaluatorConfig;
use launch_gate_core::TtlTable;
use launch_gate_core::runtime::repository::DEFAULT_TTL_DAYS;
use launch_gate_core::runtime::repository::LONG_LIVED_TTL_DAYS;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "launch-gate.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "LAUNCH_GATE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum warning window in days.
pub(crate) const MAX_WARNING_DAYS: u32 = 3_650;
/// Maximum TTL value in days.
pub(crate) const MAX_TTL_DAYS: u32 = 36_500;
/// Maximum number of per-key TTL overrides.
pub(crate) const MAX_TTL_OVERRIDES: usize = 1_024;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Launch Gate configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LaunchGateConfig {
    /// Evaluation window settings.
    #[serde(default)]
    pub evaluation: EvaluationConfig,
    /// Evidence TTL settings.
    #[serde(default)]
    pub ttl: TtlConfig,
}

impl LaunchGateConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.evaluation.validate()?;
        self.ttl.validate()?;
        Ok(())
    }

    /// Builds the evaluator settings described by this configuration.
    #[must_use]
    pub const fn evaluator_config(&self) -> EvaluatorConfig {
        EvaluatorConfig {
            warning_days: self.evaluation.warning_days,
        }
    }

    /// Builds the evidence TTL table described by this configuration.
    #[must_use]
    pub fn ttl_table(&self) -> TtlTable {
        let overrides: BTreeMap<DocumentKey, u32> = self
            .ttl
            .overrides
            .iter()
            .map(|(key, ttl)| (DocumentKey::new(key), *ttl))
            .collect();
        TtlTable::new(self.ttl.default_days, self.ttl.long_lived_days, overrides)
    }
}

/// Evaluation window settings.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationConfig {
    /// Days before expiry at which re-verification becomes due.
    #[serde(default = "default_warning_days")]
    pub warning_days: u32,
    /// Days an unresolved conflict locks out re-verification.
    ///
    /// Informational: evidence enforces its fixed window; a mismatch here is
    /// rejected at validation so documentation and behavior cannot diverge.
    #[serde(default = "default_conflict_window_days")]
    pub conflict_window_days: u32,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            warning_days: DEFAULT_WARNING_DAYS,
            conflict_window_days: CONFLICT_WINDOW_DAYS,
        }
    }
}

impl EvaluationConfig {
    /// Validates evaluation window settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.warning_days == 0 {
            return Err(ConfigError::Invalid(
                "evaluation.warning_days must be positive".to_string(),
            ));
        }
        if self.warning_days > MAX_WARNING_DAYS {
            return Err(ConfigError::Invalid(
                "evaluation.warning_days exceeds maximum".to_string(),
            ));
        }
        if self.conflict_window_days != CONFLICT_WINDOW_DAYS {
            return Err(ConfigError::Invalid(format!(
                "evaluation.conflict_window_days must be {CONFLICT_WINDOW_DAYS}",
            )));
        }
        Ok(())
    }
}

/// Evidence TTL settings.
#[derive(Debug, Clone, Deserialize)]
pub struct TtlConfig {
    /// Fallback TTL in days for documents without an override.
    #[serde(default = "default_ttl_days")]
    pub default_days: u32,
    /// TTL in days for long-lived EU declaration categories.
    #[serde(default = "default_long_lived_ttl_days")]
    pub long_lived_days: u32,
    /// Per-document-key TTL overrides in days.
    #[serde(default)]
    pub overrides: BTreeMap<String, u32>,
}

impl Default for TtlConfig {
    fn default() -> Self {
        Self {
            default_days: DEFAULT_TTL_DAYS,
            long_lived_days: LONG_LIVED_TTL_DAYS,
            overrides: BTreeMap::new(),
        }
    }
}

impl TtlConfig {
    /// Validates TTL settings.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_ttl("ttl.default_days", self.default_days)?;
        validate_ttl("ttl.long_lived_days", self.long_lived_days)?;
        if self.overrides.len() > MAX_TTL_OVERRIDES {
            return Err(ConfigError::Invalid("ttl.overrides exceeds maximum entries".to_string()));
        }
        for (key, ttl) in &self.overrides {
            if key.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "ttl.overrides keys must be non-empty".to_string(),
                ));
            }
            validate_ttl(&format!("ttl.overrides.{key}"), *ttl)?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Default for `evaluation.warning_days`.
const fn default_warning_days() -> u32 {
    DEFAULT_WARNING_DAYS
}

/// Default for `evaluation.conflict_window_days`.
const fn default_conflict_window_days() -> u32 {
    CONFLICT_WINDOW_DAYS
}

/// Default for `ttl.default_days`.
const fn default_ttl_days() -> u32 {
    DEFAULT_TTL_DAYS
}

/// Default for `ttl.long_lived_days`.
const fn default_long_lived_ttl_days() -> u32 {
    LONG_LIVED_TTL_DAYS
}

/// Validates a TTL value against the allowed range.
fn validate_ttl(field: &str, ttl_days: u32) -> Result<(), ConfigError> {
    if ttl_days == 0 {
        return Err(ConfigError::Invalid(format!("{field} must be positive")));
    }
    if ttl_days > MAX_TTL_DAYS {
        return Err(ConfigError::Invalid(format!("{field} exceeds maximum")));
    }
    Ok(())
}

/// Resolves the config path from the caller or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}
