//! # distzip Option Resolver (`plugin::options`)
//!
//! File: cli/src/plugin/options.rs
//!
//! ## Overview
//!
//! Turns caller-supplied, partially filled [`PackOptions`] into a fully
//! populated, immutable [`PackConfig`]. Resolution is pure and performs no
//! validation: malformed glob patterns are only reported when the archive is
//! assembled.
//!
//! | option         | default                         |
//! |----------------|---------------------------------|
//! | `include`      | every entry below `<outDir>`    |
//! | `exclude`      | none                            |
//! | `zip_name`     | `dist.zip`                      |
//! | `silent`       | `false`                         |
//! | `handle_file`  | none (always default handling)  |
//! | `before_close` | no-op                           |
//!
//! `PackOptions` also deserializes from the `[pack]` table of a
//! `.distzip.toml` file. `include` and `exclude` accept a single string or a
//! list of strings there.
//!
use super::hooks::{BeforeClose, FileDisposition, FileEntry, FileHandler, NoopBeforeClose};
use crate::common::archive::{entry_name, ArchiveSink};
use crate::core::error::Result;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Archive name used when none is configured.
pub const DEFAULT_ZIP_NAME: &str = "dist.zip";

/// Top-level folder the output directory is nested under on the fast path.
pub const FAST_PATH_ROOT: &str = "dist";

/// One or more glob patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "PatternsInput")]
pub struct Patterns(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum PatternsInput {
    One(String),
    Many(Vec<String>),
}

impl From<PatternsInput> for Patterns {
    fn from(input: PatternsInput) -> Self {
        match input {
            PatternsInput::One(pattern) => Patterns(vec![pattern]),
            PatternsInput::Many(patterns) => Patterns(patterns),
        }
    }
}

impl Patterns {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Patterns {
    fn from(pattern: &str) -> Self {
        Patterns(vec![pattern.to_string()])
    }
}

impl From<String> for Patterns {
    fn from(pattern: String) -> Self {
        Patterns(vec![pattern])
    }
}

impl From<Vec<String>> for Patterns {
    fn from(patterns: Vec<String>) -> Self {
        Patterns(patterns)
    }
}

impl From<Vec<&str>> for Patterns {
    fn from(patterns: Vec<&str>) -> Self {
        Patterns(patterns.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Patterns {
    fn from(patterns: [&str; N]) -> Self {
        Patterns(patterns.iter().map(|p| p.to_string()).collect())
    }
}

/// Caller-supplied configuration; every field is optional.
#[derive(Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackOptions {
    #[serde(default)]
    pub include: Option<Patterns>,
    #[serde(default)]
    pub exclude: Option<Patterns>,
    #[serde(default, alias = "archive_name")]
    pub zip_name: Option<String>,
    #[serde(default)]
    pub silent: Option<bool>,
    #[serde(skip)]
    pub handle_file: Option<Arc<dyn FileHandler>>,
    #[serde(skip)]
    pub before_close: Option<Arc<dyn BeforeClose>>,
}

impl fmt::Debug for PackOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackOptions")
            .field("include", &self.include)
            .field("exclude", &self.exclude)
            .field("zip_name", &self.zip_name)
            .field("silent", &self.silent)
            .field("handle_file", &self.handle_file.is_some())
            .field("before_close", &self.before_close.is_some())
            .finish()
    }
}

impl PackOptions {
    pub fn include(mut self, patterns: impl Into<Patterns>) -> Self {
        self.include = Some(patterns.into());
        self
    }

    pub fn exclude(mut self, patterns: impl Into<Patterns>) -> Self {
        self.exclude = Some(patterns.into());
        self
    }

    pub fn zip_name(mut self, name: impl Into<String>) -> Self {
        self.zip_name = Some(name.into());
        self
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = Some(silent);
        self
    }

    /// Sets the per-file hook from a closure.
    pub fn handle_file<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut dyn ArchiveSink, &FileEntry) -> Result<FileDisposition> + Send + Sync + 'static,
    {
        self.handle_file = Some(Arc::new(handler));
        self
    }

    /// Sets the per-file hook from an existing trait object.
    pub fn file_handler(mut self, handler: Arc<dyn FileHandler>) -> Self {
        self.handle_file = Some(handler);
        self
    }

    /// Sets the pre-finalize hook from a closure.
    pub fn before_close<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut dyn ArchiveSink) -> Result<()> + Send + Sync + 'static,
    {
        self.before_close = Some(Arc::new(hook));
        self
    }

    /// Layers `overrides` on top of `self`, field by field.
    pub fn merge(self, overrides: PackOptions) -> PackOptions {
        PackOptions {
            include: overrides.include.or(self.include),
            exclude: overrides.exclude.or(self.exclude),
            zip_name: overrides.zip_name.or(self.zip_name),
            silent: overrides.silent.or(self.silent),
            handle_file: overrides.handle_file.or(self.handle_file),
            before_close: overrides.before_close.or(self.before_close),
        }
    }

    /// Applies defaults and freezes the options.
    pub fn resolve(self) -> PackConfig {
        PackConfig {
            include: match self.include {
                Some(patterns) => Include::Patterns(patterns.into_vec()),
                None => Include::OutputDir,
            },
            exclude: self.exclude.map(Patterns::into_vec).unwrap_or_default(),
            archive_name: self
                .zip_name
                .unwrap_or_else(|| DEFAULT_ZIP_NAME.to_string()),
            silent: self.silent.unwrap_or(false),
            file_handler: self.handle_file,
            before_close: self
                .before_close
                .unwrap_or_else(|| Arc::new(NoopBeforeClose)),
        }
    }
}

/// Which entries are candidates for the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Include {
    /// Everything below the output directory (`<outDir>/**/*`).
    OutputDir,
    /// Explicit glob patterns, relative to the project root.
    Patterns(Vec<String>),
}

/// Fully resolved configuration; read-only once built.
#[derive(Clone)]
pub struct PackConfig {
    include: Include,
    exclude: Vec<String>,
    archive_name: String,
    silent: bool,
    file_handler: Option<Arc<dyn FileHandler>>,
    before_close: Arc<dyn BeforeClose>,
}

impl fmt::Debug for PackConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackConfig")
            .field("include", &self.include)
            .field("exclude", &self.exclude)
            .field("archive_name", &self.archive_name)
            .field("silent", &self.silent)
            .field("file_handler", &self.file_handler.is_some())
            .finish_non_exhaustive()
    }
}

impl PackConfig {
    pub fn include(&self) -> &Include {
        &self.include
    }

    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }

    pub fn archive_name(&self) -> &str {
        &self.archive_name
    }

    pub fn silent(&self) -> bool {
        self.silent
    }

    pub fn file_handler(&self) -> Option<&dyn FileHandler> {
        self.file_handler.as_deref()
    }

    pub fn before_close(&self) -> &dyn BeforeClose {
        &*self.before_close
    }

    /// Include patterns for a build whose output directory is `out_dir`.
    pub fn include_patterns(&self, out_dir: &Path) -> Vec<String> {
        match &self.include {
            Include::OutputDir => vec![default_include(out_dir)],
            Include::Patterns(patterns) => patterns.clone(),
        }
    }

    /// Whether `include` selects exactly the whole output directory.
    pub fn includes_whole_output_dir(&self, out_dir: &Path) -> bool {
        match &self.include {
            Include::OutputDir => true,
            Include::Patterns(patterns) => {
                patterns.len() == 1 && patterns[0] == default_include(out_dir)
            }
        }
    }

    /// Whether the archive can be built by adding the output directory in one go:
    /// default include, no exclude, no per-file hook.
    pub fn uses_fast_path(&self, out_dir: &Path) -> bool {
        self.includes_whole_output_dir(out_dir)
            && self.exclude.is_empty()
            && self.file_handler.is_none()
    }
}

/// The default include pattern for `out_dir`: `<outDir>/**/*`, or `**/*`
/// when the output directory is the project root itself.
pub fn default_include(out_dir: &Path) -> String {
    match entry_name(out_dir) {
        name if name.is_empty() => "**/*".to_string(),
        name => format!("{}/**/*", name),
    }
}
