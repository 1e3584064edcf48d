//! # distzip Build Plugin (`plugin`)
//!
//! File: cli/src/plugin/mod.rs
//!
//! ## Overview
//!
//! [`ZipPack`] is the object a build host talks to. Its lifecycle mirrors a
//! typical bundler plugin:
//!
//! 1. **Construction** (`ZipPack::new`): options are resolved once into an
//!    immutable `PackConfig`.
//! 2. **`config_resolved`**: the host hands over the [`BuildContext`]
//!    (project root and output directory). Called again for every build in
//!    watch mode.
//! 3. **`close_bundle`**: called once after the build finished, with the
//!    build error if there was one. A failed build never touches the archive;
//!    otherwise the archive is assembled and a summary returned.
//!
//! ## Example
//!
//! ```rust,ignore
//! use distzip::plugin::{BuildContext, ZipPack};
//! use distzip::plugin::options::PackOptions;
//!
//! let mut plugin = ZipPack::new(PackOptions::default().exclude("dist/**/*.map"));
//! plugin.config_resolved(BuildContext::new("/work/site", "dist"));
//! let summary = plugin.close_bundle(None).await?;
//! ```
//!
use crate::core::error::{DistzipError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

pub mod assembler;
pub mod hooks;
pub mod options;

pub use assembler::ArchiveSummary;
use options::{PackConfig, PackOptions};

/// Project root and output directory of the build being packaged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    root: PathBuf,
    out_dir: PathBuf,
}

impl BuildContext {
    /// An absolute `out_dir` below `root` is stored relative to it.
    pub fn new(root: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let out_dir = out_dir.into();
        let out_dir = if out_dir.is_absolute() {
            out_dir
                .strip_prefix(&root)
                .map(Path::to_path_buf)
                .unwrap_or(out_dir)
        } else {
            out_dir
        };
        Self { root, out_dir }
    }

    /// Project root; include/exclude patterns are relative to it.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Output directory, relative to the root unless it lies outside of it.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// `<root>/<outDir>`
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.out_dir)
    }
}

/// The zip packaging plugin.
#[derive(Debug)]
pub struct ZipPack {
    config: Arc<PackConfig>,
    context: Option<BuildContext>,
}

impl ZipPack {
    pub fn new(options: PackOptions) -> Self {
        let config = options.resolve();
        debug!("Resolved pack configuration: {:?}", config);
        Self {
            config: Arc::new(config),
            context: None,
        }
    }

    pub fn config(&self) -> &PackConfig {
        &self.config
    }

    /// Records the build context of the upcoming build.
    pub fn config_resolved(&mut self, context: BuildContext) {
        debug!("Build context resolved: {:?}", context);
        self.context = Some(context);
    }

    /// Build-completion hook.
    ///
    /// Returns `Ok(None)` without creating any file when `build_error` is set.
    pub async fn close_bundle(
        &self,
        build_error: Option<&anyhow::Error>,
    ) -> Result<Option<ArchiveSummary>> {
        if let Some(err) = build_error {
            info!("Build failed, skipping archive: {:#}", err);
            return Ok(None);
        }

        let context = self
            .context
            .clone()
            .ok_or(DistzipError::MissingBuildContext)?;
        let summary = assembler::assemble(Arc::clone(&self.config), context).await?;
        Ok(Some(summary))
    }
}
