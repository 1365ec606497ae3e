//! Ordered record of selected files.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// One (source, destination) pair.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ManifestEntry {
    /// False when an optional source was not found; such entries are never staged.
    pub included: bool,
    /// Absolute or source-root-relative path of the file to copy.
    pub source_path: PathBuf,
    /// Destination relative to the packaging root.
    pub dest_path: PathBuf,
}

/// A file whose contents are produced by the packager itself.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedFile {
    /// Destination relative to the packaging root.
    pub dest_path: PathBuf,
    /// File contents.
    pub contents: String,
}

/// Accumulates manifest entries in construction order.
#[derive(Clone, Debug, Default)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
    generated: Vec<GeneratedFile>,
}

impl Manifest {
    /// Creates an empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn record(&mut self, entry: ManifestEntry) {
        log::trace!(
            "manifest: {} -> {}",
            entry.source_path.display(),
            entry.dest_path.display()
        );
        self.entries.push(entry);
    }

    /// Appends a generated file.
    pub fn record_generated(&mut self, file: GeneratedFile) {
        self.generated.push(file);
    }

    /// Entries in construction order, duplicates included.
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Generated files in construction order.
    pub fn generated(&self) -> &[GeneratedFile] {
        &self.generated
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.generated.is_empty()
    }

    /// Entries deduplicated by destination.
    ///
    /// The last entry written to a destination wins and keeps the position
    /// of that last write; relative order is otherwise preserved.
    pub fn finalize(&self) -> Vec<ManifestEntry> {
        let mut seen = HashSet::new();
        let mut finalized: Vec<ManifestEntry> = self
            .entries
            .iter()
            .rev()
            .filter(|e| seen.insert(e.dest_path.clone()))
            .cloned()
            .collect();
        finalized.reverse();
        finalized
    }

    /// Finalized entries, deepest destination first.
    pub fn sorted_by_depth(&self) -> Vec<ManifestEntry> {
        deepest_first(self.finalize(), |e| e.dest_path.as_path())
    }
}

/// Number of separators in a relative path.
pub fn depth(path: &Path) -> usize {
    path.components().count().saturating_sub(1)
}

/// Sorts paths ascending by (depth, lexical order) and returns them deepest
/// first. The sort is stable.
pub fn deepest_first<T, F>(mut items: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> &Path,
{
    items.sort_by(|a, b| {
        let (a, b) = (key(a), key(b));
        depth(a).cmp(&depth(b)).then_with(|| a.cmp(b))
    });
    items.reverse();
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(src: &str, dst: &str) -> ManifestEntry {
        ManifestEntry {
            included: true,
            source_path: src.into(),
            dest_path: dst.into(),
        }
    }

    #[test]
    fn test_finalize_last_write_wins() {
        let mut manifest = Manifest::new();
        manifest.record(entry("a/one.txt", "one.txt"));
        manifest.record(entry("b/two.txt", "two.txt"));
        manifest.record(entry("c/one.txt", "one.txt"));

        let finalized = manifest.finalize();
        assert_eq!(
            finalized,
            vec![entry("b/two.txt", "two.txt"), entry("c/one.txt", "one.txt")]
        );
        assert_eq!(manifest.len(), 3);
    }

    #[test]
    fn test_depth_counts_separators() {
        assert_eq!(depth(Path::new("readme.txt")), 0);
        assert_eq!(depth(Path::new("skins/default/xui/en-us")), 3);
    }

    #[test]
    fn test_deepest_first_order() {
        let paths: Vec<PathBuf> = ["b.txt", "x/y/z.txt", "a.txt", "x/b.txt", "x/a.txt"]
            .into_iter()
            .map(PathBuf::from)
            .collect();
        let sorted = deepest_first(paths, |p| p.as_path());
        let sorted: Vec<_> = sorted.iter().map(|p| p.to_str().unwrap()).collect();
        assert_eq!(sorted, ["x/y/z.txt", "x/b.txt", "x/a.txt", "b.txt", "a.txt"]);
    }

    #[test]
    fn test_sorted_by_depth_uses_finalized_entries() {
        let mut manifest = Manifest::new();
        manifest.record(entry("old/app.exe", "app.exe"));
        manifest.record(entry("skins/a.xml", "skins/default/a.xml"));
        manifest.record(entry("new/app.exe", "app.exe"));

        let sorted = manifest.sorted_by_depth();
        assert_eq!(
            sorted,
            vec![
                entry("skins/a.xml", "skins/default/a.xml"),
                entry("new/app.exe", "app.exe")
            ]
        );
    }
}
