//! # distzip Archive Assembler (`plugin::assembler`)
//!
//! File: cli/src/plugin/assembler.rs
//!
//! ## Overview
//!
//! Builds `<root>/<outDir>/<archiveName>` from a resolved [`PackConfig`] and a
//! [`BuildContext`]. This is the only place that decides *what* goes into the
//! archive; *how* bytes are compressed is left to the [`ArchiveSink`].
//!
//! ## Architecture
//!
//! 1. Create the destination file (async) and bind a `ZipArchiveWriter` to it.
//! 2. Pick one of two paths, decided once per build:
//!    - **fast path** (whole output directory, no exclude, no file handler):
//!      the output directory is added as one recursive entry under `dist/`;
//!    - **general path**: glob selection under the project root; every plain
//!      file goes through the file handler (if any) and then, unless the
//!      handler reported `Handled`, is added under its root-relative name.
//! 3. Run the `before_close` hook, seal the archive, close the file.
//! 4. Print `"<archiveName> size: <size>"` unless `silent`.
//!
//! Steps 2-3 are synchronous zip work and run as a single `spawn_blocking`
//! job; its `JoinHandle` is the deferred result awaited by [`assemble`]. It
//! resolves after the file was closed and fails on the first fatal error. A
//! file that vanished between enumeration and read is only logged.
//!
use super::hooks::{FileDisposition, FileEntry};
use super::options::{Include, PackConfig, FAST_PATH_ROOT};
use super::BuildContext;
use crate::common::archive::zip::ZipArchiveWriter;
use crate::common::archive::ArchiveSink;
use crate::common::fs::glob;
use crate::common::ui;
use crate::core::error::{self, DistzipError, Result};
use anyhow::Context;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What a finished assembly produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    /// Full path of the written archive.
    pub path: PathBuf,
    /// Size of the archive on disk, in bytes.
    pub size: u64,
    /// Number of entries written (files, directories and synthetic entries).
    pub entries: usize,
}

/// Assembles the archive for one build.
pub async fn assemble(config: Arc<PackConfig>, context: BuildContext) -> Result<ArchiveSummary> {
    let destination = context.output_dir().join(config.archive_name());
    if let Some(parent) = destination.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    info!(
        "Packing build output of {} into {}",
        context.root().display(),
        destination.display()
    );
    let file = tokio::fs::File::create(&destination)
        .await
        .with_context(|| format!("Failed to create archive file {}", destination.display()))?
        .into_std()
        .await;

    let job = {
        let config = Arc::clone(&config);
        let destination = destination.clone();
        tokio::task::spawn_blocking(move || write_archive(&config, &context, file, &destination))
    };
    let entries = job
        .await
        .context("Archive task terminated unexpectedly")??;

    let size = tokio::fs::metadata(&destination)
        .await
        .with_context(|| format!("Failed to read size of {}", destination.display()))?
        .len();
    info!("Archive {} written with {} entries", destination.display(), entries);

    if !config.silent() {
        println!("{}", ui::summary_line(config.archive_name(), size));
    }

    Ok(ArchiveSummary {
        path: destination,
        size,
        entries,
    })
}

/// Writes, seals and closes the archive. Returns the number of entries.
fn write_archive(
    config: &PackConfig,
    context: &BuildContext,
    file: File,
    destination: &Path,
) -> Result<usize> {
    let mut sink = ZipArchiveWriter::new(file).skipping(destination);

    if config.uses_fast_path(context.out_dir()) {
        let output_dir = context.output_dir();
        debug!(
            "Adding {} as a whole under '{}/'",
            output_dir.display(),
            FAST_PATH_ROOT
        );
        sink.append_dir_all(&output_dir, FAST_PATH_ROOT)
            .with_context(|| format!("Failed to add {} to the archive", output_dir.display()))?;
    } else {
        append_selected(config, context, destination, &mut sink)?;
    }

    config
        .before_close()
        .before_close(&mut sink)
        .context("before_close hook failed")?;

    let entries = sink.entry_count();
    let file = sink.finish().context("Failed to finalize zip archive")?;
    file.sync_all()
        .with_context(|| format!("Failed to flush {}", destination.display()))?;
    Ok(entries)
}

/// General path: glob selection, file handler, default insertion.
fn append_selected(
    config: &PackConfig,
    context: &BuildContext,
    destination: &Path,
    sink: &mut dyn ArchiveSink,
) -> Result<()> {
    if config.include() == &Include::OutputDir && context.out_dir().is_absolute() {
        return Err(DistzipError::Config(format!(
            "output directory {} lies outside the project root {}; set explicit include patterns",
            context.out_dir().display(),
            context.root().display()
        ))
        .into());
    }
    let include = config.include_patterns(context.out_dir());
    let selected = glob::select_entries(context.root(), &include, config.exclude())
        .context("Failed to resolve include/exclude patterns")?;
    debug!("{} candidate entries selected by {:?}", selected.len(), include);

    for matched in &selected {
        if !matched.is_file() {
            debug!("Skipping non-file entry {}", matched.path.display());
            continue;
        }
        if matched.path.as_path() == destination {
            continue;
        }

        let entry = FileEntry::from(matched);
        if let Some(handler) = config.file_handler() {
            match handler.handle_file(sink, &entry) {
                Ok(FileDisposition::Handled) => {
                    debug!("'{}' handled by the file handler", entry.archive_name());
                    continue;
                }
                Ok(FileDisposition::Default) => {}
                Err(e) if error::is_vanished(&e) => {
                    warn!("{:#}", e);
                    continue;
                }
                Err(e) => {
                    return Err(e.context(format!(
                        "File handler failed for '{}'",
                        entry.archive_name()
                    )))
                }
            }
        }

        match sink.append_file(&matched.path, entry.archive_name()) {
            Ok(()) => {}
            Err(e) if e.is_vanished() => warn!("{}", e),
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("Failed to add '{}' to the archive", entry.archive_name())))
            }
        }
    }
    Ok(())
}
