//! # distzip Pack Command Integration Tests
//!
//! File: cli/tests/pack.rs
//!
//! ## Overview
//!
//! Runs `distzip pack` against scaffolded projects and inspects the archives
//! it writes.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::collections::BTreeSet;
use std::fs;

fn names(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_pack_default_archives_output_dir() {
    let project = scaffold_project();
    let root = project.path();

    distzip_cmd()
        .arg("pack")
        .arg("--root")
        .arg(root)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("dist.zip size: "));

    let archive = root.join("dist/dist.zip");
    assert_eq!(
        archive_files(&archive),
        names(&["dist/assets/app.js", "dist/assets/logo.svg", "dist/index.html"])
    );
    assert_eq!(archive_entry(&archive, "dist/index.html"), "<html>home</html>");
}

#[test]
fn test_pack_silent_prints_nothing() {
    let project = scaffold_project();

    distzip_cmd()
        .args(["pack", "--silent", "--root"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(project.path().join("dist/dist.zip").is_file());
}

#[test]
fn test_pack_build_error_writes_nothing() {
    let project = scaffold_project();

    distzip_cmd()
        .args(["pack", "--build-error", "bundler exited with 1", "--root"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(!project.path().join("dist/dist.zip").exists());
}

#[test]
fn test_pack_with_exclude_and_custom_name() {
    let project = scaffold_project();
    let root = project.path();

    distzip_cmd()
        .args(["pack", "-e", "dist/**/*.svg", "-o", "site.zip", "--root"])
        .arg(root)
        .assert()
        .success()
        .stdout(predicate::str::contains("site.zip size:"));

    assert_eq!(
        archive_files(&root.join("dist/site.zip")),
        names(&["dist/assets/app.js", "dist/index.html"])
    );
}

#[test]
fn test_pack_add_inserts_entry_under_given_name() {
    let project = scaffold_project();
    let root = project.path();
    fs::write(root.join("LICENSE"), "MPL-2.0").unwrap();

    distzip_cmd()
        .current_dir(root)
        .args(["pack", "--silent", "--add", "LICENSE.txt=LICENSE"])
        .assert()
        .success();

    let archive = root.join("dist/dist.zip");
    assert!(archive_files(&archive).contains("LICENSE.txt"));
    assert_eq!(archive_entry(&archive, "LICENSE.txt"), "MPL-2.0");
}

#[test]
fn test_pack_add_missing_source_fails() {
    let project = scaffold_project();

    distzip_cmd()
        .current_dir(project.path())
        .args(["pack", "--silent", "--add", "VERSION=does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_pack_rejects_malformed_add() {
    let project = scaffold_project();

    distzip_cmd()
        .args(["pack", "--add", "LICENSE", "--root"])
        .arg(project.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("NAME=PATH"));
}

#[test]
fn test_pack_honors_project_config() {
    let project = scaffold_project();
    let root = project.path();
    fs::write(
        root.join(".distzip.toml"),
        "[pack]\ninclude = [\"dist/**/*.js\", \"src/**/*\"]\nzip_name = \"bundle.zip\"\nsilent = true\n",
    )
    .unwrap();

    distzip_cmd()
        .args(["pack", "--root"])
        .arg(root)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(
        archive_files(&root.join("dist/bundle.zip")),
        names(&["dist/assets/app.js", "src/main.ts"])
    );
}

#[test]
fn test_pack_flags_override_project_config() {
    let project = scaffold_project();
    let root = project.path();
    fs::write(root.join(".distzip.toml"), "[pack]\nzip_name = \"bundle.zip\"\n").unwrap();

    distzip_cmd()
        .args(["pack", "--silent", "-o", "cli.zip", "--root"])
        .arg(root)
        .assert()
        .success();

    assert!(root.join("dist/cli.zip").is_file());
    assert!(!root.join("dist/bundle.zip").exists());
}

#[test]
fn test_pack_rejects_invalid_project_config() {
    let project = scaffold_project();
    fs::write(project.path().join(".distzip.toml"), "[pack]\nlevel = 9\n").unwrap();

    distzip_cmd()
        .args(["pack", "--root"])
        .arg(project.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration"));
}

#[test]
fn test_pack_custom_out_dir_is_rooted_at_dist() {
    let project = scaffold_project();
    let root = project.path();
    fs::create_dir_all(root.join("build")).unwrap();
    fs::write(root.join("build/app.wasm"), [0u8, 97, 115, 109]).unwrap();

    distzip_cmd()
        .args(["pack", "--silent", "--out-dir", "build", "--root"])
        .arg(root)
        .assert()
        .success();

    assert_eq!(
        archive_files(&root.join("build/dist.zip")),
        names(&["dist/app.wasm"])
    );
}

#[test]
fn test_pack_custom_out_dir_general_path_keeps_relative_names() {
    let project = scaffold_project();
    let root = project.path();
    fs::create_dir_all(root.join("build")).unwrap();
    fs::write(root.join("build/app.wasm"), [0u8, 97, 115, 109]).unwrap();
    fs::write(root.join("build/app.wasm.map"), "{}").unwrap();

    distzip_cmd()
        .args(["pack", "--silent", "--out-dir", "build", "-e", "**/*.map", "--root"])
        .arg(root)
        .assert()
        .success();

    assert_eq!(
        archive_files(&root.join("build/dist.zip")),
        names(&["build/app.wasm"])
    );
}

#[test]
fn test_pack_out_dir_from_environment() {
    let project = scaffold_project();
    let root = project.path();
    fs::create_dir_all(root.join("build")).unwrap();
    fs::write(root.join("build/app.wasm"), [0u8, 97, 115, 109]).unwrap();
    fs::write(root.join("build/app.wasm.map"), "{}").unwrap();

    distzip_cmd()
        .env("DISTZIP_OUT_DIR", "build")
        .env("DISTZIP_ROOT", root)
        .args(["pack", "--silent", "-e", "**/*.map"])
        .assert()
        .success();

    assert_eq!(
        archive_files(&root.join("build/dist.zip")),
        names(&["build/app.wasm"])
    );
}

#[test]
fn test_pack_project_root_as_out_dir_with_exclude() {
    let project = scaffold_project();
    let root = project.path();

    distzip_cmd()
        .args(["pack", "--silent", "--out-dir", ".", "-e", "src", "-e", "**/*.svg", "--root"])
        .arg(root)
        .assert()
        .success();

    assert_eq!(
        archive_files(&root.join("dist.zip")),
        names(&["dist/assets/app.js", "dist/index.html"])
    );
}

#[test]
fn test_pack_exclude_directory_drops_subtree() {
    let project = scaffold_project();
    let root = project.path();

    distzip_cmd()
        .args(["pack", "--silent", "-e", "dist/assets", "--root"])
        .arg(root)
        .assert()
        .success();

    assert_eq!(
        archive_files(&root.join("dist/dist.zip")),
        names(&["dist/index.html"])
    );
}

#[test]
fn test_pack_missing_root_fails() {
    distzip_cmd()
        .args(["pack", "--root", "/definitely/not/a/project"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project root not found"));
}
