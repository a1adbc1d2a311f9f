//! Configuration file loading with precedence handling.

use crate::model::StyleConfig;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "ROWVIEW_CONFIG";

/// Environment variable overriding the font family.
pub const FONT_FAMILY_ENV_VAR: &str = "ROWVIEW_FONT_FAMILY";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/rowview/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Font family used for every row.
    #[serde(default)]
    pub font_family: Option<String>,

    /// Font size in pixels.
    #[serde(default)]
    pub font_size: Option<f32>,

    /// Extra vertical space per row, in pixels.
    #[serde(default)]
    pub line_spacing: Option<f32>,

    /// Rows scrolled per arrow key or wheel notch.
    #[serde(default)]
    pub scroll_lines: Option<u16>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Font family.
    pub font_family: String,
    /// Font size in pixels.
    pub font_size: f32,
    /// Line spacing in pixels.
    pub line_spacing: f32,
    /// Rows per scroll step.
    pub scroll_lines: u16,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl ResolvedConfig {
    /// Style configuration for the view.
    pub fn style(&self) -> StyleConfig {
        StyleConfig::new(self.font_family.clone(), self.font_size, self.line_spacing)
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            font_family: "monospace".to_string(),
            font_size: 12.0,
            line_spacing: 2.0,
            scroll_lines: 3,
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/rowview/rowview.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("rowview").join("rowview.log")
    } else {
        PathBuf::from("rowview.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/rowview/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rowview").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `ROWVIEW_CONFIG` environment variable
/// 3. Default path `~/.config/rowview/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Some(env_path) = std::env::var_os(CONFIG_ENV_VAR) {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(format!("{CONFIG_ENV_VAR} is empty")));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for `ROWVIEW_FONT_FAMILY`.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(family) = std::env::var(FONT_FAMILY_ENV_VAR) {
        config.font_family = family;
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        font_family: config.font_family.unwrap_or(defaults.font_family),
        font_size: config.font_size.unwrap_or(defaults.font_size),
        line_spacing: config.line_spacing.unwrap_or(defaults.line_spacing),
        scroll_lines: config.scroll_lines.unwrap_or(defaults.scroll_lines),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence. Only flags the user actually passed
/// are applied.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    font_size_override: Option<f32>,
    line_spacing_override: Option<f32>,
) -> ResolvedConfig {
    if let Some(font_size) = font_size_override {
        config.font_size = font_size;
    }

    if let Some(line_spacing) = line_spacing_override {
        config.line_spacing = line_spacing;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
