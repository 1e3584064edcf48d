//! # distzip Archive Engine (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//!
//! ## Overview
//!
//! This module is the boundary between distzip's selection logic and the
//! bytes of the archive. The assembler and the user hooks never touch the zip
//! writer directly; they talk to an [`ArchiveSink`], which only knows how to
//! append entries. Sealing the archive is not part of the trait, so a hook
//! holding `&mut dyn ArchiveSink` cannot close or replace the writer.
//!
//! ## Architecture
//!
//! - **`ArchiveSink`**: append-only handle (files, raw bytes, whole directories).
//! - **`zip`**: `ZipArchiveWriter`, the `ArchiveSink` implementation backed by
//!   the `zip` crate.
//! - **`entry_name`**: converts a relative filesystem path into the `/`-separated
//!   name stored in the archive.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use distzip::common::archive::{zip::ZipArchiveWriter, ArchiveSink};
//!
//! let file = std::fs::File::create("dist/dist.zip")?;
//! let mut sink = ZipArchiveWriter::new(file);
//! sink.append_file(Path::new("dist/index.html"), "dist/index.html")?;
//! sink.append_bytes("dist/VERSION", b"1.4.2")?;
//! sink.finish()?;
//! ```
//!
use crate::core::error::ArchiveError;
use std::path::{Component, Path};

pub mod zip;

/// Append-only handle onto an archive that is being written.
pub trait ArchiveSink {
    /// Adds the file at `source` under the archive-internal `name`.
    ///
    /// Returns `ArchiveError::EntryVanished` when `source` no longer exists.
    fn append_file(&mut self, source: &Path, name: &str) -> Result<(), ArchiveError>;

    /// Adds an entry named `name` whose content is `content`. Nothing on disk backs it.
    fn append_bytes(&mut self, name: &str, content: &[u8]) -> Result<(), ArchiveError>;

    /// Adds everything below `source` recursively, nested under `prefix`.
    fn append_dir_all(&mut self, source: &Path, prefix: &str) -> Result<(), ArchiveError>;

    /// Number of entries written so far.
    fn entry_count(&self) -> usize;
}

/// Builds the archive entry name for a relative path: normal components joined by `/`.
///
/// `.` components and leading root/prefix components are dropped, so
/// `./dist/assets/logo.svg` and `dist\assets\logo.svg` both become
/// `dist/assets/logo.svg`.
pub fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_name_uses_forward_slashes() {
        assert_eq!(
            entry_name(Path::new("dist/assets/logo.svg")),
            "dist/assets/logo.svg"
        );
        assert_eq!(entry_name(Path::new("./dist/index.html")), "dist/index.html");
        assert_eq!(entry_name(Path::new("")), "");
    }
}
