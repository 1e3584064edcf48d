//! # distzip Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Thin wrappers around `std::fs` that add context to errors:
//! - **`read_file_to_string`**: reads a whole file, used by configuration loading.
//!
use crate::core::error::Result;
use anyhow::Context;
use std::fs;
use std::path::Path;

/// Reads the entire content of a file into a string.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}
