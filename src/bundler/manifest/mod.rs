//! File manifests.
//!
//! [`PathResolver`] turns nested prefix scopes and glob selections into an
//! ordered [`Manifest`] of (source, destination) pairs; [`layout`] holds the
//! viewer's per-platform selections.

pub mod layout;
mod recorder;
mod resolver;

pub use recorder::{GeneratedFile, Manifest, ManifestEntry, deepest_first, depth};
pub use resolver::{PathFrame, PathResolver, Scope};
