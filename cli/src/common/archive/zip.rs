//! # distzip Zip Writer (`common::archive::zip`)
//!
//! File: cli/src/common/archive/zip.rs
//!
//! ## Overview
//!
//! `ZipArchiveWriter` implements [`ArchiveSink`] on top of the `zip` crate.
//! Every entry is deflate-compressed with the library's default level.
//!
//! ## Architecture
//!
//! - Files are opened *before* their entry is started, so a file that vanished
//!   after enumeration never leaves an empty entry behind; the open error is
//!   reported as `ArchiveError::EntryVanished`.
//! - `append_dir_all` walks the source tree with `walkdir` in file-name order,
//!   writes directory entries for subdirectories, never follows symbolic links
//!   and does not archive them either. Entries that vanish during the walk are
//!   logged and skipped.
//! - Paths registered with [`ZipArchiveWriter::skipping`] are never written.
//!   The assembler registers the destination file itself so that the archive
//!   does not end up containing a partial copy of itself.
//! - On Unix, source file permissions are recorded in the entry.
//!
use super::{entry_name, ArchiveSink};
use crate::core::error::ArchiveError;
use ::zip::write::SimpleFileOptions;
use ::zip::{CompressionMethod, ZipWriter};
use std::fs::{File, Metadata};
use std::io::{self, Seek, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Zip-backed archive sink writing into `W`.
pub struct ZipArchiveWriter<W: Write + Seek> {
    inner: ZipWriter<W>,
    skip: Vec<PathBuf>,
    entries: usize,
}

impl<W: Write + Seek> ZipArchiveWriter<W> {
    /// Binds a new zip writer to `destination`.
    pub fn new(destination: W) -> Self {
        Self {
            inner: ZipWriter::new(destination),
            skip: Vec::new(),
            entries: 0,
        }
    }

    /// Never archive `path` when it is met during a directory walk.
    pub fn skipping(mut self, path: impl Into<PathBuf>) -> Self {
        self.skip.push(path.into());
        self
    }

    /// Writes the central directory and hands back the destination.
    pub fn finish(self) -> Result<W, ArchiveError> {
        Ok(self.inner.finish()?)
    }

    fn base_options() -> SimpleFileOptions {
        SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
    }

    fn write_file(&mut self, mut file: File, metadata: &Metadata, name: &str) -> Result<(), ArchiveError> {
        self.inner
            .start_file(name, with_permissions(Self::base_options(), metadata))?;
        io::copy(&mut file, &mut self.inner)?;
        self.entries += 1;
        debug!("Added file entry '{}' ({} bytes)", name, metadata.len());
        Ok(())
    }
}

impl<W: Write + Seek> ArchiveSink for ZipArchiveWriter<W> {
    fn append_file(&mut self, source: &Path, name: &str) -> Result<(), ArchiveError> {
        let file = File::open(source).map_err(|e| ArchiveError::from_open(e, source.to_path_buf()))?;
        let metadata = file.metadata()?;
        self.write_file(file, &metadata, name)
    }

    fn append_bytes(&mut self, name: &str, content: &[u8]) -> Result<(), ArchiveError> {
        self.inner.start_file(name, Self::base_options())?;
        self.inner.write_all(content)?;
        self.entries += 1;
        debug!("Added synthetic entry '{}' ({} bytes)", name, content.len());
        Ok(())
    }

    fn append_dir_all(&mut self, source: &Path, prefix: &str) -> Result<(), ArchiveError> {
        let walker = WalkDir::new(source)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.io_error().map(io::Error::kind) == Some(io::ErrorKind::NotFound) => {
                    warn!("Skipping entry that vanished during the walk: {}", e);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            if self.skip.iter().any(|skipped| skipped.as_path() == entry.path()) {
                debug!("Not archiving {} (excluded from directory add)", entry.path().display());
                continue;
            }

            // `min_depth(1)` guarantees every entry lives below `source`.
            let relative = entry.path().strip_prefix(source).unwrap_or(entry.path());
            let name = join_entry_name(prefix, &entry_name(relative));
            let file_type = entry.file_type();

            if file_type.is_dir() {
                self.inner.add_directory(name.as_str(), Self::base_options())?;
                self.entries += 1;
                debug!("Added directory entry '{}/'", name);
            } else if file_type.is_file() {
                match File::open(entry.path()) {
                    Ok(file) => {
                        let metadata = file.metadata()?;
                        self.write_file(file, &metadata, &name)?;
                    }
                    Err(e) => match ArchiveError::from_open(e, entry.path().to_path_buf()) {
                        vanished @ ArchiveError::EntryVanished { .. } => warn!("{}", vanished),
                        fatal => return Err(fatal),
                    },
                }
            } else {
                debug!("Skipping non-regular entry {}", entry.path().display());
            }
        }
        Ok(())
    }

    fn entry_count(&self) -> usize {
        self.entries
    }
}

fn join_entry_name(prefix: &str, name: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", prefix, name)
    }
}

#[cfg(unix)]
fn with_permissions(options: SimpleFileOptions, metadata: &Metadata) -> SimpleFileOptions {
    use std::os::unix::fs::PermissionsExt;
    options.unix_permissions(metadata.permissions().mode() & 0o777)
}

#[cfg(not(unix))]
fn with_permissions(options: SimpleFileOptions, _metadata: &Metadata) -> SimpleFileOptions {
    options
}
