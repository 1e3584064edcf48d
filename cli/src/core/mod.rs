//! # distzip Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces shared by the plugin and the command handlers:
//! - `config`: configuration file loading, merging and validation
//! - `error`: error types and the crate-wide `Result` alias
//!
//! ```rust,ignore
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{DistzipError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
