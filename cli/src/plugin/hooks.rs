//! # distzip Hooks (`plugin::hooks`)
//!
//! File: cli/src/plugin/hooks.rs
//!
//! ## Overview
//!
//! Caller-supplied behavior that runs while the archive is being assembled:
//!
//! - [`FileHandler`]: called once per selected file before default handling.
//!   It may write into the archive itself (for instance under a different
//!   name) and answers with a [`FileDisposition`]. `Handled` means the file
//!   is done and default insertion is skipped, whatever the handler did.
//! - [`BeforeClose`]: called after every file was processed and before the
//!   archive is sealed. Typically used to add synthetic entries.
//!
//! Both traits are implemented for plain closures, so most callers never name
//! them:
//!
//! ```rust,ignore
//! let options = PackOptions::default()
//!     .handle_file(|archive, entry| {
//!         if entry.name() == "index.html" {
//!             archive.append_file(entry.path(), "site/home.html")?;
//!             return Ok(FileDisposition::Handled);
//!         }
//!         Ok(FileDisposition::Default)
//!     })
//!     .before_close(|archive| {
//!         archive.append_bytes("VERSION", b"1.4.2")?;
//!         Ok(())
//!     });
//! ```
//!
use crate::common::archive::{entry_name, ArchiveSink};
use crate::common::fs::glob::MatchedEntry;
use crate::core::error::Result;
use std::ffi::OsStr;
use std::fs::FileType;
use std::path::{Path, PathBuf};

/// Outcome of a [`FileHandler`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileDisposition {
    /// The handler took care of the file; no default insertion.
    Handled,
    /// Insert the file under its default name.
    Default,
}

impl From<bool> for FileDisposition {
    fn from(handled: bool) -> Self {
        if handled {
            FileDisposition::Handled
        } else {
            FileDisposition::Default
        }
    }
}

/// Metadata of a selected file as seen by a [`FileHandler`].
#[derive(Debug, Clone)]
pub struct FileEntry {
    path: PathBuf,
    name: String,
    file_type: FileType,
    archive_name: String,
}

impl FileEntry {
    /// File name without directories (`logo.svg`), lossily converted to UTF-8.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File name exactly as it is on disk.
    pub fn file_name(&self) -> &OsStr {
        self.path.file_name().unwrap_or_default()
    }

    /// Directory containing the file.
    pub fn parent_path(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Whether the entry is a regular file. Symbolic links are never followed.
    pub fn is_file(&self) -> bool {
        self.file_type.is_file()
    }

    /// Full path of the file on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name the file gets under default handling (root-relative, `/`-separated).
    pub fn archive_name(&self) -> &str {
        &self.archive_name
    }
}

impl From<&MatchedEntry> for FileEntry {
    fn from(entry: &MatchedEntry) -> Self {
        Self {
            path: entry.path.clone(),
            name: entry
                .path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            file_type: entry.file_type,
            archive_name: entry_name(&entry.relative),
        }
    }
}

/// Per-file override hook.
pub trait FileHandler: Send + Sync {
    fn handle_file(&self, archive: &mut dyn ArchiveSink, entry: &FileEntry)
        -> Result<FileDisposition>;
}

impl<F> FileHandler for F
where
    F: Fn(&mut dyn ArchiveSink, &FileEntry) -> Result<FileDisposition> + Send + Sync,
{
    fn handle_file(
        &self,
        archive: &mut dyn ArchiveSink,
        entry: &FileEntry,
    ) -> Result<FileDisposition> {
        self(archive, entry)
    }
}

/// Hook that runs right before the archive is sealed.
pub trait BeforeClose: Send + Sync {
    fn before_close(&self, archive: &mut dyn ArchiveSink) -> Result<()>;
}

impl<F> BeforeClose for F
where
    F: Fn(&mut dyn ArchiveSink) -> Result<()> + Send + Sync,
{
    fn before_close(&self, archive: &mut dyn ArchiveSink) -> Result<()> {
        self(archive)
    }
}

/// Default [`BeforeClose`]: adds nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBeforeClose;

impl BeforeClose for NoopBeforeClose {
    fn before_close(&self, _archive: &mut dyn ArchiveSink) -> Result<()> {
        Ok(())
    }
}
