//! # distzip Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! Command handlers reachable from `main.rs`. Each command defines its own
//! `clap` argument struct and an async `handle_*` function.
//!
//! - `pack`: run one packaging cycle for a build output directory
//!

/// `distzip pack`: archive a build output directory.
pub mod pack;
