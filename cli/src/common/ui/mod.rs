//! # distzip UI Utilities (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! Console output helpers. The only user-facing line distzip prints is the
//! completion summary, `"<archive name> size: <formatted size>"`.
//!

/// Size units in ascending order, each 1024 times the previous one.
const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// # Format File Size (`human_readable_size`)
///
/// Converts a byte count into a human-readable string. Starting at `B`, the
/// value is divided by 1024 while it is at least 1024 and a larger unit
/// exists. The result is printed with exactly two decimals, a space and the
/// unit symbol. There is no unit above `TB`; larger values keep growing in `TB`.
///
/// ## Examples
///
/// * `0` → `"0.00 B"`
/// * `1536` → `"1.50 KB"`
/// * `1024^4` → `"1.00 TB"`
pub fn human_readable_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", size, UNITS[unit])
}

/// The completion summary printed after the archive has been closed.
pub fn summary_line(archive_name: &str, bytes: u64) -> String {
    format!("{} size: {}", archive_name, human_readable_size(bytes))
}
