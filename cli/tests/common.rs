//! # distzip Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`: locating the
//! compiled binary, scaffolding a project with a build output directory, and
//! reading archives back.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::collections::BTreeSet;
use std::fs;
use std::io::Read;
use std::path::Path;
use tempfile::TempDir;

/// # Get distzip Command (`distzip_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `distzip` binary.
///
/// ## Panics
/// Panics if the `distzip` binary cannot be found via `Command::cargo_bin`.
pub fn distzip_cmd() -> Command {
    Command::cargo_bin("distzip").expect("Failed to find distzip binary for testing")
}

/// Creates a project root (marked as a git repository so that configuration
/// lookup never escapes it) with a populated `dist/` directory.
pub fn scaffold_project() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp project");
    let root = temp_dir.path();
    fs::create_dir_all(root.join(".git")).unwrap();
    fs::create_dir_all(root.join("dist/assets")).unwrap();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("dist/index.html"), "<html>home</html>").unwrap();
    fs::write(root.join("dist/assets/app.js"), "console.log('app')").unwrap();
    fs::write(root.join("dist/assets/logo.svg"), "<svg/>").unwrap();
    fs::write(root.join("src/main.ts"), "export {}").unwrap();
    temp_dir
}

/// Names of all file entries (directory entries excluded) in the archive at `path`.
pub fn archive_files(path: &Path) -> BTreeSet<String> {
    let file = fs::File::open(path).expect("Archive should exist");
    let archive = zip::ZipArchive::new(file).expect("Archive should be a valid zip");
    archive
        .file_names()
        .filter(|name| !name.ends_with('/'))
        .map(str::to_string)
        .collect()
}

/// Content of the entry `name` in the archive at `path`.
pub fn archive_entry(path: &Path, name: &str) -> String {
    let file = fs::File::open(path).expect("Archive should exist");
    let mut archive = zip::ZipArchive::new(file).expect("Archive should be a valid zip");
    let mut content = String::new();
    archive
        .by_name(name)
        .expect("Entry should exist")
        .read_to_string(&mut content)
        .unwrap();
    content
}
