//! # distzip
//!
//! File: cli/src/lib.rs
//!
//! ## Overview
//!
//! distzip packages a project's build output directory into a single zip
//! archive as the final step of a build. A build host constructs a
//! [`ZipPack`] once, hands it the [`BuildContext`] of each build and calls
//! [`ZipPack::close_bundle`] when the build is over.
//!
//! - `plugin`: the plugin, the option resolver, hooks and the archive assembler
//! - `common`: archive engine, glob selection, formatting helpers
//! - `core`: configuration files and error types
//! - `commands`: the `distzip` command-line interface
//!
pub mod commands;
pub mod common;
pub mod core;
pub mod plugin;

pub use common::archive::ArchiveSink;
pub use plugin::hooks::{BeforeClose, FileDisposition, FileEntry, FileHandler};
pub use plugin::options::{PackConfig, PackOptions, Patterns};
pub use plugin::{ArchiveSummary, BuildContext, ZipPack};
