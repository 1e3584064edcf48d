//! # distzip Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! Loads the optional configuration files and merges them into a single
//! [`Config`]. Command-line flags are layered on top by the command handler.
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags (handled in `commands::pack`)
//! 2. Project-specific `.distzip.toml` in the project root or its ancestors
//! 3. User-specific `~/.config/distzip/config.toml`
//! 4. Default values (`PackOptions::resolve`, `DEFAULT_OUT_DIR`)
//!
//! The project file search stops at the first directory that contains a
//! `.git` directory.
//!
//! ## Example
//!
//! ```toml
//! [build]
//! out_dir = "dist"
//!
//! [pack]
//! include = "dist/**/*"
//! exclude = ["dist/**/*.map"]
//! zip_name = "site.zip"
//! silent = false
//! ```
//!
use crate::common::fs::io;
use crate::core::error::{DistzipError, Result};
use crate::plugin::options::PackOptions;
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Output directory used when neither a flag nor a config file names one.
pub const DEFAULT_OUT_DIR: &str = "dist";

const PROJECT_CONFIG_FILENAME: &str = ".distzip.toml";

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub pack: PackOptions,
}

/// The `[build]` table: what the host would otherwise tell the plugin.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Output directory, relative to the project root.
    pub out_dir: Option<String>,
}

/// Loads and merges user and project configuration for a project rooted at (or below) `start`.
pub fn load_config(start: &Path) -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config(start)?;
    let merged = merge_configs(user_config.unwrap_or_default(), project_config);
    validate_config(&merged).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged);
    Ok(merged)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("dev", "distzip", "distzip") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config(start: &Path) -> Result<Option<Config>> {
    if let Some(project_config_path) = find_project_config_path(start) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.distzip.toml) found.");
        Ok(None)
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = io::read_file_to_string(path)?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project = match project {
        Some(p) => p,
        None => return user,
    };
    Config {
        build: BuildConfig {
            out_dir: project.build.out_dir.or(user.build.out_dir),
        },
        pack: user.pack.merge(project.pack),
    }
}

/// Rejects configuration values that would place the archive or the output
/// directory outside the project.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(out_dir) = &config.build.out_dir {
        validate_out_dir(out_dir)?;
    }
    if let Some(zip_name) = &config.pack.zip_name {
        validate_zip_name(zip_name)?;
    }
    Ok(())
}

pub fn validate_out_dir(out_dir: &str) -> Result<()> {
    if out_dir.trim().is_empty() {
        return Err(anyhow!(DistzipError::Config(
            "out_dir must not be empty.".to_string()
        )));
    }
    if Path::new(out_dir).is_absolute() {
        return Err(anyhow!(DistzipError::Config(format!(
            "out_dir '{}' must be relative to the project root.",
            out_dir
        ))));
    }
    Ok(())
}

pub fn validate_zip_name(zip_name: &str) -> Result<()> {
    if zip_name.trim().is_empty() || zip_name.ends_with('/') {
        return Err(anyhow!(DistzipError::Config(format!(
            "zip_name '{}' must name a file.",
            zip_name
        ))));
    }
    if Path::new(zip_name).is_absolute() {
        return Err(anyhow!(DistzipError::Config(format!(
            "zip_name '{}' must be relative to the output directory.",
            zip_name
        ))));
    }
    Ok(())
}
