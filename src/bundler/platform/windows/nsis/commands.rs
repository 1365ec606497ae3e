//! Install and uninstall file commands for the NSI script.
//!
//! Both lists are derived from the same set of staged files, ordered deepest
//! directory first, so every installed file has a matching `Delete` and every
//! directory that received a file is removed afterwards.

use super::utils::{install_path, nsis_path};
use crate::bundler::manifest::{ManifestEntry, deepest_first};
use std::{
    collections::BTreeSet,
    fmt::Write as _,
    path::{Path, PathBuf},
};

/// Destinations of entries that are included and exist as staged files.
fn staged_files(staging_root: &Path, entries: &[ManifestEntry]) -> Vec<PathBuf> {
    let files = entries
        .iter()
        .filter(|e| e.included && staging_root.join(&e.dest_path).is_file())
        .map(|e| e.dest_path.clone())
        .collect();
    deepest_first(files, |p| p.as_path())
}

/// Every proper ancestor directory of every file, root excluded.
fn ancestor_dirs(files: &[PathBuf]) -> Vec<PathBuf> {
    let dirs: BTreeSet<PathBuf> = files
        .iter()
        .flat_map(|f| f.ancestors().skip(1))
        .filter(|d| !d.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .collect();
    deepest_first(dirs.into_iter().collect(), |p| p.as_path())
}

/// `SetOutPath`/`File` commands installing every staged file.
pub fn install_commands(staging_root: &Path, entries: &[ManifestEntry]) -> String {
    let mut out = String::new();
    let mut out_path: Option<String> = None;

    for rel in staged_files(staging_root, entries) {
        let dir = install_path(rel.parent().unwrap_or(Path::new("")));
        if out_path.as_deref() != Some(dir.as_str()) {
            let _ = writeln!(out, "SetOutPath {dir}");
            out_path = Some(dir);
        }
        let _ = writeln!(out, "File {}", nsis_path(&staging_root.join(&rel)));
    }
    out
}

/// `Delete` commands for every staged file, then `RMDir` for their directories.
pub fn delete_commands(staging_root: &Path, entries: &[ManifestEntry]) -> String {
    let files = staged_files(staging_root, entries);
    let mut out = String::new();

    for rel in &files {
        let _ = writeln!(out, "Delete {}", install_path(rel));
    }
    for dir in ancestor_dirs(&files) {
        let _ = writeln!(out, "RMDir {}", install_path(&dir));
    }
    out
}

/// Install (`true`) or uninstall (`false`) commands.
pub fn file_commands(staging_root: &Path, entries: &[ManifestEntry], install: bool) -> String {
    if install {
        install_commands(staging_root, entries)
    } else {
        delete_commands(staging_root, entries)
    }
}
