//! Configuration module.
//!
//! Resolves the viewer configuration from defaults, a TOML file, environment
//! variables and CLI flags, in that order of increasing precedence.

pub mod loader;

pub use loader::{
    ConfigError, ConfigFile, ResolvedConfig, apply_cli_overrides, apply_env_overrides,
    default_config_path, default_log_path, load_config_file, load_config_with_precedence,
    merge_config,
};
