//! Declarative file manifests and multi-platform installer packaging.
//!
//! A packaging run selects the files a platform variant ships from the
//! viewer source tree, stages them into a packaging root, and drives the
//! platform's native tools to produce the installer.
//!
//! # Supported Formats
//!
//! | Platform | Artifact | Tools |
//! |----------|----------|-------|
//! | Windows | NSIS installer (.exe) | makensis |
//! | macOS | compressed disk image (.dmg) | strip, hdiutil, SetFile, Rez |
//! | Linux i686 / x86_64 | .tar.bz2 | tar |
//!
//! # Pipeline
//!
//! 1. [`manifest::layout`] drives a [`PathResolver`] over the source tree
//! 2. [`staging`] copies the finalized [`Manifest`] into the staging root
//! 3. [`platform`] turns the staged tree into the installer artifact
//!
//! [`Bundler`] runs these steps for one or several platform variants.

mod builder;
pub mod error;
pub mod manifest;
pub mod naming;
pub mod platform;
pub mod settings;
pub mod staging;
pub mod template;
pub mod utils;

// Public re-exports
pub use builder::{BundleReport, Bundler, PlatformFailure, PlatformRun, required_tools};
pub use error::{Error, Result};
pub use manifest::{GeneratedFile, Manifest, ManifestEntry, PathResolver};
pub use naming::{NamingPolicy, ReleaseKind};
pub use platform::Platform;
pub use settings::{Action, Arch, BuildContext, ProductConfig, Settings, SettingsBuilder};
pub use utils::process::{SystemRunner, ToolInvocation, ToolOutput, ToolRunner};

use std::path::PathBuf;

/// An installer artifact produced by a packaging run.
///
/// # Fields
///
/// - `platform`: The platform variant the installer targets
/// - `path`: Location of the artifact in the build root
/// - `size`: Size of the artifact in bytes
#[derive(Debug, Clone)]
pub struct BundledArtifact {
    /// Platform variant the installer targets.
    pub platform: Platform,

    /// Path of the installer, image or archive.
    pub path: PathBuf,

    /// Artifact size in bytes.
    pub size: u64,
}
