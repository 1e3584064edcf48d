//! # distzip Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared building blocks used by the packaging plugin (`plugin::`) and the
//! command handlers (`commands::`):
//!
//! - **`archive`**: the archive engine seam (`ArchiveSink`) and its zip implementation.
//! - **`fs`**: glob-based file selection and small I/O helpers.
//! - **`ui`**: console formatting (human-readable sizes, completion summary).
//!

/// Archive engine: `ArchiveSink` and the zip-backed writer.
pub mod archive;
/// Filesystem operations (glob selection, I/O).
pub mod fs;
/// Console formatting helpers.
pub mod ui;
