//! # distzip Pack Command
//!
//! File: cli/src/commands/pack.rs
//!
//! ## Overview
//!
//! Implements `distzip pack`, a minimal build host around [`ZipPack`]. It is
//! meant to run as the last step of a build script, once the output directory
//! has been written.
//!
//! ## Architecture
//!
//! 1. Resolve the project root (`--root`, `~` expanded) and load
//!    `.distzip.toml` / user configuration from there.
//! 2. Layer command-line flags over the file configuration.
//! 3. Construct the plugin, hand it the build context, then signal build
//!    completion, passing `--build-error` along as the build's failure.
//!
//! ## Examples
//!
//! ```bash
//! # Zip everything in ./dist into ./dist/dist.zip
//! distzip pack
//!
//! # Custom selection and archive name
//! distzip pack --include 'dist/**/*' --exclude 'dist/**/*.map' --zip-name site.zip
//!
//! # Add a file under a custom name right before the archive is sealed
//! distzip pack --add LICENSE.txt=./LICENSE
//!
//! # Output directory from the environment, as set by a build script
//! DISTZIP_OUT_DIR=build distzip pack
//!
//! # Forward a failed build: nothing is written
//! distzip pack --build-error "vite build exited with 1"
//! ```
//!
use crate::core::config::{self, DEFAULT_OUT_DIR};
use crate::core::error::{DistzipError, Result};
use crate::plugin::options::PackOptions;
use crate::plugin::{BuildContext, ZipPack};
use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// # Pack Arguments (`PackArgs`)
///
/// Command-line arguments accepted by `distzip pack`. Every flag is optional;
/// unset flags fall back to the configuration files and then to the defaults.
#[derive(Parser, Debug)]
pub struct PackArgs {
    /// Project root. Include/exclude patterns are relative to it.
    #[arg(long, env = "DISTZIP_ROOT", default_value = ".")]
    root: String,

    /// Build output directory, relative to the root (default: "dist").
    #[arg(long, env = "DISTZIP_OUT_DIR")]
    out_dir: Option<String>,

    /// Glob selecting files to archive. Repeatable.
    #[arg(short, long, value_name = "GLOB")]
    include: Vec<String>,

    /// Glob removing files from the selection. Repeatable.
    #[arg(short, long, value_name = "GLOB")]
    exclude: Vec<String>,

    /// Archive file name, relative to the output directory (default: "dist.zip").
    #[arg(short = 'o', long, value_name = "NAME")]
    zip_name: Option<String>,

    /// Do not print the archive size summary.
    #[arg(long)]
    silent: bool,

    /// Treat the build as failed with this message; no archive is written.
    #[arg(long, value_name = "MESSAGE")]
    build_error: Option<String>,

    /// Add the file at PATH to the archive as NAME before it is sealed. Repeatable.
    #[arg(long = "add", value_name = "NAME=PATH", value_parser = parse_extra_entry)]
    add: Vec<ExtraEntry>,
}

/// A file added under a caller-chosen name through the `before_close` hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraEntry {
    name: String,
    source: PathBuf,
}

fn parse_extra_entry(value: &str) -> std::result::Result<ExtraEntry, DistzipError> {
    match value.split_once('=') {
        Some((name, source)) if !name.is_empty() && !source.is_empty() => Ok(ExtraEntry {
            name: name.to_string(),
            source: PathBuf::from(source),
        }),
        _ => Err(DistzipError::ArgumentParsing(format!(
            "expected NAME=PATH, got '{}'",
            value
        ))),
    }
}

/// # Handle Pack Command (`handle_pack`)
///
/// Loads configuration, merges flags, and runs one plugin build cycle.
pub async fn handle_pack(args: PackArgs) -> Result<()> {
    info!("Handling pack command...");
    debug!("Pack args: {:?}", args);

    let root = PathBuf::from(shellexpand::tilde(&args.root).into_owned());
    let root = root
        .canonicalize()
        .with_context(|| format!("Project root not found: {}", root.display()))?;

    let file_config = config::load_config(&root).context("Failed to load distzip configuration")?;
    let out_dir = args
        .out_dir
        .clone()
        .or(file_config.build.out_dir)
        .unwrap_or_else(|| DEFAULT_OUT_DIR.to_string());
    config::validate_out_dir(&out_dir)?;

    let options = file_config.pack.merge(flag_options(&args));
    if let Some(zip_name) = &options.zip_name {
        config::validate_zip_name(zip_name)?;
    }

    let mut plugin = ZipPack::new(options);
    plugin.config_resolved(BuildContext::new(&root, &out_dir));

    let build_error = args.build_error.map(|message| anyhow::anyhow!(message));
    match plugin.close_bundle(build_error.as_ref()).await? {
        Some(summary) => info!(
            "Packed {} entries into {}",
            summary.entries,
            display_path(&summary.path).display()
        ),
        None => info!("No archive written."),
    }
    Ok(())
}

/// Path relative to the current directory when possible, for messages.
fn display_path(path: &Path) -> PathBuf {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| pathdiff::diff_paths(path, cwd))
        .filter(|relative| !relative.as_os_str().is_empty())
        .unwrap_or_else(|| path.to_path_buf())
}

/// Options set explicitly on the command line; unset flags stay `None`.
fn flag_options(args: &PackArgs) -> PackOptions {
    let mut options = PackOptions::default();
    if !args.include.is_empty() {
        options = options.include(args.include.clone());
    }
    if !args.exclude.is_empty() {
        options = options.exclude(args.exclude.clone());
    }
    if let Some(zip_name) = &args.zip_name {
        options = options.zip_name(zip_name.clone());
    }
    if args.silent {
        options = options.silent(true);
    }
    if !args.add.is_empty() {
        let extras = args.add.clone();
        options = options.before_close(move |archive| {
            for extra in &extras {
                archive
                    .append_file(&extra.source, &extra.name)
                    .with_context(|| format!("Failed to add {}", extra.source.display()))?;
            }
            Ok(())
        });
    }
    options
}
