//! # distzip Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout distzip. It follows a
//! two-layer approach:
//! - `DistzipError` and `ArchiveError`: `thiserror` enums for conditions that
//!   callers may want to match on.
//! - `Result<T>`: an alias for `anyhow::Result<T>` used for application-level
//!   propagation, so that context can be attached with `anyhow::Context`.
//!
//! `ArchiveError` is the error type of the archive engine (`ArchiveSink`). It
//! is kept separate from `DistzipError` because the assembler has to tell a
//! benign vanished entry apart from a fatal write failure.
//!
//! ## Examples
//!
//! ```rust,ignore
//! // Return a specific error type
//! if close_called_too_early {
//!     return Err(DistzipError::MissingBuildContext)?;
//! }
//!
//! // Tolerate entries that disappeared during the build
//! match sink.append_file(&path, &name) {
//!     Err(e) if e.is_vanished() => warn!("{}", e),
//!     other => other?,
//! }
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for distzip configuration and host interaction.
#[derive(Error, Debug)]
pub enum DistzipError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Build context has not been resolved; `config_resolved` must run before `close_bundle`.")]
    MissingBuildContext,

    #[error("Argument parsing error: {0}")]
    ArgumentParsing(String),
}

/// Errors raised by the archive engine while selecting and writing entries.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// A selected file disappeared between enumeration and read.
    #[error("Entry vanished before it could be archived: {}", path.display())]
    EntryVanished { path: PathBuf },

    #[error("Invalid glob pattern: {source}")]
    Pattern {
        #[from]
        source: globset::Error,
    },

    #[error("Failed to walk directory tree: {source}")]
    Walk {
        #[from]
        source: walkdir::Error,
    },

    #[error("Zip writer failed: {source}")]
    Zip {
        #[from]
        source: zip::result::ZipError,
    },

    #[error("I/O error while writing archive: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl ArchiveError {
    /// Whether this error is the benign "file vanished" warning.
    pub fn is_vanished(&self) -> bool {
        matches!(self, ArchiveError::EntryVanished { .. })
    }

    /// Classifies an I/O error hit while opening `path`: `NotFound` becomes
    /// `EntryVanished`, everything else stays an I/O error.
    pub fn from_open(err: std::io::Error, path: PathBuf) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            ArchiveError::EntryVanished { path }
        } else {
            ArchiveError::Io { source: err }
        }
    }
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

/// Returns true when `err` (or anything in its context chain) is a vanished entry.
pub fn is_vanished(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<ArchiveError>())
        .any(ArchiveError::is_vanished)
}
