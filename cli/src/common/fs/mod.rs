//! # distzip Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem helpers shared by the assembler and the configuration loader.
//!
//! - **`glob`**: resolves include/exclude glob patterns against a project root
//!   (`walkdir` + `globset`) and returns the matching entries with their type.
//! - **`io`**: file reading with error context.
//!
//! ```rust,ignore
//! use distzip::common::fs::{glob, io};
//!
//! let content = io::read_file_to_string(Path::new(".distzip.toml"))?;
//! let entries = glob::select_entries(root, &["dist/**/*".into()], &[])?;
//! ```
//!

/// Include/exclude glob selection (e.g., `select_entries`).
pub mod glob;
/// Basic file I/O operations (e.g., `read_file_to_string`).
pub mod io;
