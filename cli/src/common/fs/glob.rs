//! # distzip Glob Selection (`common::fs::glob`)
//!
//! File: cli/src/common/fs/glob.rs
//!
//! ## Overview
//!
//! Resolves include/exclude glob patterns against a project root and returns
//! the matching directory entries together with their file type.
//!
//! Patterns are matched against root-relative, `/`-separated paths
//! (`dist/assets/logo.svg`). `*` and `?` never cross a `/`; `**` spans any
//! number of directories, including none, so `dist/**/*` matches both
//! `dist/index.html` and `dist/assets/logo.svg`. A leading `./` is ignored.
//! Dot-files are matched like any other name.
//!
//! ## Architecture
//!
//! 1. Each pattern is compiled with `globset`; all includes form one `GlobSet`
//!    and all excludes another. A path is selected when it matches any
//!    include and no exclude.
//! 2. Instead of walking the whole root (which may contain `node_modules` or
//!    a VCS directory), only the literal base of every include pattern is
//!    walked: the leading components that contain no glob syntax.
//! 3. A directory matching an exclude is pruned: nothing below it is selected
//!    and the walk does not enter it.
//! 4. Walks never follow symbolic links. Results are de-duplicated across
//!    overlapping includes and returned in sorted path order.
//!
//! Absolute patterns that point below the root are rewritten as root-relative
//! ones; absolute patterns elsewhere are dropped with a warning.
//!
use crate::common::archive::entry_name;
use crate::core::error::ArchiveError;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::BTreeMap;
use std::fs::FileType;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// A directory entry selected by the include/exclude patterns.
#[derive(Debug, Clone)]
pub struct MatchedEntry {
    /// Absolute (root-joined) path of the entry.
    pub path: PathBuf,
    /// Path relative to the search root.
    pub relative: PathBuf,
    /// Type of the entry itself; symbolic links are not resolved.
    pub file_type: FileType,
}

impl MatchedEntry {
    pub fn is_file(&self) -> bool {
        self.file_type.is_file()
    }
}

/// Compiled include/exclude patterns.
#[derive(Debug, Clone)]
pub struct PatternSet {
    bases: Vec<PathBuf>,
    include: GlobSet,
    exclude: GlobSet,
}

impl PatternSet {
    /// Compiles the given patterns; fails on the first malformed glob.
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self, ArchiveError> {
        let mut bases: Vec<PathBuf> = include.iter().map(|p| literal_base(p)).collect();
        bases.sort();
        bases.dedup();
        Ok(Self {
            bases,
            include: compile(include)?,
            exclude: compile(exclude)?,
        })
    }

    /// Whether a root-relative, `/`-separated path is selected.
    pub fn is_selected(&self, name: &str) -> bool {
        self.include.is_match(name) && !self.exclude.is_match(name)
    }

    /// An excluded directory takes its whole subtree with it; the walk does
    /// not descend into it.
    fn is_pruned(&self, root: &Path, entry: &DirEntry) -> bool {
        if !entry.file_type().is_dir() {
            return false;
        }
        match entry.path().strip_prefix(root) {
            Ok(relative) if !relative.as_os_str().is_empty() => {
                let name = entry_name(relative);
                let pruned = self.exclude.is_match(&name);
                if pruned {
                    debug!("Pruning excluded directory {}", name);
                }
                pruned
            }
            _ => false,
        }
    }

    /// Walks `root` and returns every selected entry, sorted by relative path.
    pub fn select(&self, root: &Path) -> Result<Vec<MatchedEntry>, ArchiveError> {
        let mut selected = BTreeMap::new();

        for base in &self.bases {
            let start = root.join(base);
            if std::fs::symlink_metadata(&start).is_err() {
                debug!("Pattern base {} does not exist, nothing to match", start.display());
                continue;
            }

            let walker = WalkDir::new(&start)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|entry| !self.is_pruned(root, entry));

            for entry in walker {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) if e.io_error().map(io::Error::kind) == Some(io::ErrorKind::NotFound) => {
                        warn!("Skipping entry that vanished during the walk: {}", e);
                        continue;
                    }
                    Err(e) => return Err(e.into()),
                };

                let relative = match entry.path().strip_prefix(root) {
                    Ok(relative) if !relative.as_os_str().is_empty() => relative.to_path_buf(),
                    _ => continue,
                };
                if selected.contains_key(&relative) {
                    continue;
                }
                if !self.is_selected(&entry_name(&relative)) {
                    continue;
                }
                selected.insert(
                    relative.clone(),
                    MatchedEntry {
                        path: entry.path().to_path_buf(),
                        relative,
                        file_type: entry.file_type(),
                    },
                );
            }
        }

        debug!("Glob selection matched {} entries", selected.len());
        Ok(selected.into_values().collect())
    }
}

/// Convenience wrapper: compile `include`/`exclude` and select under `root`.
pub fn select_entries(
    root: &Path,
    include: &[String],
    exclude: &[String],
) -> Result<Vec<MatchedEntry>, ArchiveError> {
    let include = root_relative(root, include);
    let exclude = root_relative(root, exclude);
    PatternSet::new(&include, &exclude)?.select(root)
}

/// Rewrites absolute patterns that point below `root` as root-relative ones.
/// Absolute patterns outside `root` can never match and are dropped with a warning.
fn root_relative(root: &Path, patterns: &[String]) -> Vec<String> {
    patterns
        .iter()
        .filter_map(|pattern| {
            if !Path::new(pattern).is_absolute() {
                return Some(pattern.clone());
            }
            let relative = root
                .to_str()
                .map(|root| root.trim_end_matches('/'))
                .and_then(|root| pattern.strip_prefix(root))
                .and_then(|rest| rest.strip_prefix('/'));
            match relative {
                Some(rest) => Some(rest.to_string()),
                None => {
                    warn!(
                        "Ignoring pattern '{}': it is absolute and outside the project root {}",
                        pattern,
                        root.display()
                    );
                    None
                }
            }
        })
        .collect()
}

fn normalize(pattern: &str) -> &str {
    pattern.strip_prefix("./").unwrap_or(pattern)
}

fn compile(patterns: &[String]) -> Result<GlobSet, ArchiveError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(
            GlobBuilder::new(normalize(pattern))
                .literal_separator(true)
                .build()?,
        );
    }
    Ok(builder.build()?)
}

/// Leading components of `pattern` that contain no glob syntax.
fn literal_base(pattern: &str) -> PathBuf {
    normalize(pattern)
        .split('/')
        .take_while(|part| !part.contains(['*', '?', '[', '{']))
        .filter(|part| !part.is_empty() && *part != ".")
        .collect()
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Result;
    use std::fs;
    use tempfile::tempdir;

    fn patterns(list: &[&str]) -> Vec<String> {
        list.iter().map(|p| p.to_string()).collect()
    }

    fn project() -> Result<tempfile::TempDir> {
        let temp_dir = tempdir()?;
        let root = temp_dir.path();
        fs::create_dir_all(root.join("dist/assets"))?;
        fs::create_dir_all(root.join("src"))?;
        fs::write(root.join("dist/index.html"), "<html></html>")?;
        fs::write(root.join("dist/assets/app.js"), "console.log(1)")?;
        fs::write(root.join("dist/assets/logo.svg"), "<svg/>")?;
        fs::write(root.join("src/main.ts"), "export {}")?;
        Ok(temp_dir)
    }

    fn relative_names(entries: &[MatchedEntry]) -> Vec<String> {
        entries.iter().map(|e| entry_name(&e.relative)).collect()
    }

    #[test]
    fn test_literal_base() {
        assert_eq!(literal_base("dist/**/*"), PathBuf::from("dist"));
        assert_eq!(literal_base("./dist/assets/*.js"), PathBuf::from("dist/assets"));
        assert_eq!(literal_base("**/*.js"), PathBuf::new());
        assert_eq!(literal_base("dist/index.html"), PathBuf::from("dist/index.html"));
    }

    #[test]
    fn test_select_recursive_output_dir() -> Result<()> {
        let temp_dir = project()?;
        let entries = select_entries(temp_dir.path(), &patterns(&["dist/**/*"]), &[])?;
        let names = relative_names(&entries);
        assert_eq!(
            names,
            vec![
                "dist/assets",
                "dist/assets/app.js",
                "dist/assets/logo.svg",
                "dist/index.html"
            ]
        );
        assert!(!entries[0].is_file());
        assert!(entries[1].is_file());
        Ok(())
    }

    #[test]
    fn test_exclude_wins_over_include() -> Result<()> {
        let temp_dir = project()?;
        let entries = select_entries(
            temp_dir.path(),
            &patterns(&["dist/**/*"]),
            &patterns(&["dist/**/*.svg", "dist/*.html"]),
        )?;
        let names = relative_names(&entries);
        assert!(names.contains(&"dist/assets/app.js".to_string()));
        assert!(!names.iter().any(|n| n.ends_with(".svg")));
        assert!(!names.contains(&"dist/index.html".to_string()));
        Ok(())
    }

    #[test]
    fn test_single_star_does_not_cross_directories() -> Result<()> {
        let temp_dir = project()?;
        let entries = select_entries(temp_dir.path(), &patterns(&["dist/*"]), &[])?;
        let names = relative_names(&entries);
        assert_eq!(names, vec!["dist/assets", "dist/index.html"]);
        Ok(())
    }

    #[test]
    fn test_overlapping_includes_are_deduplicated() -> Result<()> {
        let temp_dir = project()?;
        let entries = select_entries(
            temp_dir.path(),
            &patterns(&["dist/**/*.js", "dist/assets/*", "src/*.ts"]),
            &[],
        )?;
        let names = relative_names(&entries);
        assert_eq!(
            names,
            vec![
                "dist/assets/app.js",
                "dist/assets/logo.svg",
                "src/main.ts"
            ]
        );
        Ok(())
    }

    #[test]
    fn test_missing_base_matches_nothing() -> Result<()> {
        let temp_dir = project()?;
        let entries = select_entries(temp_dir.path(), &patterns(&["build/**/*"]), &[])?;
        assert!(entries.is_empty());
        Ok(())
    }

    #[test]
    fn test_excluded_directory_drops_its_subtree() -> Result<()> {
        let temp_dir = project()?;
        fs::create_dir_all(temp_dir.path().join("dist/node_modules/pkg"))?;
        fs::write(temp_dir.path().join("dist/node_modules/pkg/index.js"), "")?;

        let entries = select_entries(
            temp_dir.path(),
            &patterns(&["dist/**/*"]),
            &patterns(&["dist/assets", "**/node_modules"]),
        )?;
        let names = relative_names(&entries);
        assert_eq!(names, vec!["dist/index.html"]);
        Ok(())
    }

    #[test]
    fn test_absolute_patterns_below_root_are_relativized() -> Result<()> {
        let temp_dir = project()?;
        let root = temp_dir.path();
        let include = format!("{}/dist/**/*.js", root.display());
        let exclude = format!("{}/src/**/*", root.display());

        let entries = select_entries(root, &[include, "src/*.ts".into()], &[exclude])?;
        assert_eq!(relative_names(&entries), vec!["dist/assets/app.js"]);
        Ok(())
    }

    #[test]
    fn test_absolute_patterns_outside_root_are_dropped() {
        let root = Path::new("/work/site");
        assert_eq!(
            root_relative(root, &patterns(&["/work/site/dist/**/*", "/elsewhere/*", "dist/*"])),
            patterns(&["dist/**/*", "dist/*"])
        );
    }

    #[test]
    fn test_malformed_pattern_is_an_error() {
        let result = PatternSet::new(&patterns(&["dist/[unclosed"]), &[]);
        assert!(matches!(result, Err(ArchiveError::Pattern { .. })));
    }
}
