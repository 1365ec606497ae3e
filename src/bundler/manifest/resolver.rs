//! Prefix-stack path resolution.
//!
//! A [`PathResolver`] keeps a stack of (source, destination) directory frames.
//! Selections are resolved against the join of every source frame and land
//! under the join of every destination frame. Frames may contain glob
//! characters, in which case matches keep their relative layout under the
//! nearest literal destination.

use super::recorder::{GeneratedFile, Manifest, ManifestEntry};
use crate::bundler::error::{Error, Result};
use glob::{MatchOptions, Pattern};
use std::{
    ops::{Deref, DerefMut},
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

const GLOB_CHARS: &[char] = &['*', '?', '['];

/// Options for expanding selections: `*` stays within one path segment and
/// never matches a leading dot.
const SELECT_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Options for exclude patterns, which may span separators.
const EXCLUDE_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

fn is_glob(path: &Path) -> bool {
    path.to_string_lossy().contains(GLOB_CHARS)
}

/// One level of the prefix stack.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PathFrame {
    /// Source subdirectory, relative to the frame below.
    pub source: PathBuf,
    /// Destination subdirectory, relative to the frame below.
    pub dest: PathBuf,
}

/// Resolves selections against a source tree and records them in a [`Manifest`].
#[derive(Debug)]
pub struct PathResolver {
    source_root: PathBuf,
    frames: Vec<PathFrame>,
    excludes: Vec<Pattern>,
    manifest: Manifest,
}

impl PathResolver {
    /// Creates a resolver with an empty stack.
    pub fn new(source_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            frames: Vec::new(),
            excludes: Vec::new(),
            manifest: Manifest::new(),
        }
    }

    /// Current stack depth.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// The manifest recorded so far.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Consumes the resolver, returning its manifest.
    pub fn into_manifest(self) -> Manifest {
        self.manifest
    }

    /// Current source directory: the source root joined with every frame.
    pub fn source_dir(&self) -> PathBuf {
        self.frames
            .iter()
            .fold(self.source_root.clone(), |acc, f| acc.join(&f.source))
    }

    /// Current destination directory, relative to the packaging root.
    pub fn dest_dir(&self) -> PathBuf {
        self.frames
            .iter()
            .fold(PathBuf::new(), |acc, f| acc.join(&f.dest))
    }

    /// Pushes a frame. `dest` defaults to `source`.
    ///
    /// Returns whether the resolved source directory exists. A missing
    /// directory is not an error; the frame is pushed either way.
    pub fn push(&mut self, source: impl AsRef<Path>, dest: Option<&str>) -> bool {
        let source = source.as_ref().to_path_buf();
        let dest = dest.map(PathBuf::from).unwrap_or_else(|| source.clone());
        self.frames.push(PathFrame { source, dest });

        let exists = self.current_source_exists();
        if !exists {
            log::debug!("prefix {} does not exist", self.source_dir().display());
        }
        exists
    }

    /// Pops the top frame, checking that its destination is `expected`.
    ///
    /// The frame is removed even when the check fails.
    pub fn pop(&mut self, expected: impl AsRef<Path>) -> Result<()> {
        let expected = expected.as_ref();
        let frame = self.frames.pop().ok_or_else(|| Error::ScopeMismatch {
            expected: expected.to_path_buf(),
            actual: PathBuf::new(),
        })?;
        if frame.dest != expected {
            return Err(Error::ScopeMismatch {
                expected: expected.to_path_buf(),
                actual: frame.dest,
            });
        }
        Ok(())
    }

    /// Pushes a frame and returns a guard that pops it when dropped.
    pub fn scope(&mut self, source: impl AsRef<Path>, dest: Option<&str>) -> Scope<'_> {
        let depth = self.frames.len();
        let exists = self.push(source, dest);
        Scope {
            resolver: self,
            depth,
            exists,
            ended: false,
        }
    }

    /// Registers an exclude pattern for every later selection.
    pub fn exclude(&mut self, pattern: &str) -> Result<()> {
        self.excludes.push(Pattern::new(pattern)?);
        Ok(())
    }

    /// Selects files matching `pattern` under the current source directory.
    ///
    /// Returns the number of entries recorded.
    pub fn select(&mut self, pattern: &str) -> Result<usize> {
        self.select_inner(pattern, None, true)
    }

    /// Selects `source` under a different destination name.
    ///
    /// For a glob `source`, `dest` names a destination subdirectory instead.
    pub fn select_as(&mut self, source: &str, dest: &str) -> Result<usize> {
        self.select_inner(source, Some(dest), true)
    }

    /// Like [`select_as`](Self::select_as), but a missing source is recorded
    /// as excluded instead of failing.
    pub fn optional(&mut self, source: &str, dest: Option<&str>) -> Result<usize> {
        self.select_inner(source, dest, false)
    }

    /// First candidate, relative to the current source directory, that exists.
    pub fn find_existing<'c>(&self, candidates: &[&'c str]) -> Result<&'c str> {
        let base = self.source_dir();
        candidates
            .iter()
            .copied()
            .find(|c| base.join(c).exists())
            .ok_or_else(|| Error::MissingPath {
                path: PathBuf::from(candidates.join(" | ")),
            })
    }

    /// Records a file with the given contents under the current destination.
    pub fn put_in_file(&mut self, contents: impl Into<String>, dest: &str) {
        self.manifest.record_generated(GeneratedFile {
            dest_path: self.dest_dir().join(dest),
            contents: contents.into(),
        });
    }

    /// Splits the stack at the first glob frame.
    ///
    /// Returns the literal source base, the literal destination base and the
    /// glob part of the source path (empty when no frame is a glob).
    fn split_at_glob(&self) -> (PathBuf, PathBuf, PathBuf) {
        let k = self
            .frames
            .iter()
            .position(|f| is_glob(&f.source))
            .unwrap_or(self.frames.len());
        let (literal, globbed) = self.frames.split_at(k);

        let source = literal
            .iter()
            .fold(self.source_root.clone(), |acc, f| acc.join(&f.source));
        let dest = literal.iter().fold(PathBuf::new(), |acc, f| acc.join(&f.dest));
        let rest = globbed.iter().fold(PathBuf::new(), |acc, f| acc.join(&f.source));
        (source, dest, rest)
    }

    fn current_source_exists(&self) -> bool {
        let (base, _, rest) = self.split_at_glob();
        if rest.as_os_str().is_empty() {
            base.is_dir()
        } else {
            expand(&base, &rest)
                .map(|m| m.iter().any(|p| p.is_dir()))
                .unwrap_or(false)
        }
    }

    fn select_inner(&mut self, source: &str, dest: Option<&str>, required: bool) -> Result<usize> {
        let (base, dest_base, rest) = self.split_at_glob();
        let relative = rest.join(source);

        if is_glob(&relative) {
            let dest_base = match dest {
                Some(dest) => dest_base.join(dest),
                None => dest_base,
            };
            let mut recorded = 0;
            for matched in expand(&base, &relative)? {
                let rel = matched.strip_prefix(&base)?.to_path_buf();
                recorded += self.record_tree(&matched, &dest_base.join(rel))?;
            }
            if recorded == 0 {
                log::debug!("{} matched nothing", base.join(&relative).display());
            }
            return Ok(recorded);
        }

        let path = base.join(&relative);
        let target = dest_base.join(dest.unwrap_or(source));
        if !path.exists() {
            if required {
                return Err(Error::MissingPath { path });
            }
            log::warn!("optional file {} not found", path.display());
            self.manifest.record(ManifestEntry {
                included: false,
                source_path: path,
                dest_path: target,
            });
            return Ok(0);
        }
        self.record_tree(&path, &target)
    }

    /// Records `source` (a file, or every file beneath a directory) at `dest`.
    fn record_tree(&mut self, source: &Path, dest: &Path) -> Result<usize> {
        if !source.is_dir() {
            return Ok(self.record_file(source, dest.to_path_buf()) as usize);
        }

        let mut recorded = 0;
        for entry in WalkDir::new(source).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_dir() {
                continue;
            }
            let rel = entry.path().strip_prefix(source)?;
            if self.record_file(entry.path(), dest.join(rel)) {
                recorded += 1;
            }
        }
        Ok(recorded)
    }

    fn record_file(&mut self, source: &Path, dest: PathBuf) -> bool {
        if self.is_excluded(source) {
            log::trace!("excluded {}", source.display());
            return false;
        }
        self.manifest.record(ManifestEntry {
            included: true,
            source_path: source.to_path_buf(),
            dest_path: dest,
        });
        true
    }

    fn is_excluded(&self, source: &Path) -> bool {
        let name = source.file_name().map(|n| n.to_string_lossy());
        self.excludes.iter().any(|p| {
            p.matches_path_with(source, EXCLUDE_OPTIONS)
                || name
                    .as_deref()
                    .is_some_and(|n| p.matches_with(n, EXCLUDE_OPTIONS))
        })
    }
}

/// Expands a glob relative to a literal base, in sorted order.
fn expand(base: &Path, relative: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!(
        "{}/{}",
        Pattern::escape(&base.to_string_lossy()),
        relative.to_string_lossy()
    );
    let mut matches = glob::glob_with(&pattern, SELECT_OPTIONS)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    matches.sort();
    Ok(matches)
}

/// A pushed frame that is popped when the guard goes out of scope.
///
/// Dereferences to the [`PathResolver`], so selections can be made through
/// the guard. Use [`end`](Scope::end) to close the scope with a destination
/// check.
#[derive(Debug)]
pub struct Scope<'a> {
    resolver: &'a mut PathResolver,
    depth: usize,
    exists: bool,
    ended: bool,
}

impl Scope<'_> {
    /// Whether the scope's source directory exists.
    pub fn exists(&self) -> bool {
        self.exists
    }

    /// Pops the frame, checking its destination.
    pub fn end(mut self, expected: impl AsRef<Path>) -> Result<()> {
        self.ended = true;
        self.resolver.pop(expected)
    }
}

impl Deref for Scope<'_> {
    type Target = PathResolver;

    fn deref(&self) -> &PathResolver {
        &*self.resolver
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut PathResolver {
        &mut *self.resolver
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        if !self.ended {
            self.resolver.frames.truncate(self.depth);
        }
    }
}
