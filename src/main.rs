//! rowview - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// rowview - scrollable, editable view of a text file
#[derive(Parser, Debug)]
#[command(name = "rowview")]
#[command(version)]
#[command(about = "Terminal viewer for line-oriented documents")]
pub struct Args {
    /// Path to the document (starts with an empty document if not provided)
    pub file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Font size in pixels (must be positive)
    #[arg(long, value_parser = parse_font_size)]
    pub font_size: Option<f32>,

    /// Extra vertical space per row in pixels (must not be negative)
    #[arg(long, value_parser = parse_line_spacing)]
    pub line_spacing: Option<f32>,
}

fn parse_font_size(value: &str) -> Result<f32, String> {
    let size: f32 = value.parse().map_err(|e| format!("{e}"))?;
    if size.is_finite() && size > 0.0 {
        Ok(size)
    } else {
        Err(format!("font size must be positive, got {value}"))
    }
}

fn parse_line_spacing(value: &str) -> Result<f32, String> {
    let spacing: f32 = value.parse().map_err(|e| format!("{e}"))?;
    if spacing.is_finite() && spacing >= 0.0 {
        Ok(spacing)
    } else {
        Err(format!("line spacing must not be negative, got {value}"))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = rowview::config::load_config_with_precedence(args.config.clone())?;
        let merged = rowview::config::merge_config(config_file);
        let with_env = rowview::config::apply_env_overrides(merged);
        rowview::config::apply_cli_overrides(with_env, args.font_size, args.line_spacing)
    };

    rowview::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    rowview::view::run_with_file(args.file.as_deref(), &config)?;

    Ok(())
}
