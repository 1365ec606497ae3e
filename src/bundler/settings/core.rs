//! Core Settings struct and implementations.

use super::{Arch, BuildContext, ProductConfig};
use crate::bundler::platform::Platform;
use std::path::{Path, PathBuf};

/// Main settings for one packaging run.
///
/// Central configuration for the packager, constructed via [`SettingsBuilder`].
/// Bundles the immutable [`BuildContext`], the [`ProductConfig`] constants,
/// the target [`Platform`] and the three directory roots a run works with.
///
/// # Examples
///
/// ```no_run
/// use viewer_packager::bundler::{BuildContext, Platform, SettingsBuilder};
///
/// # fn example() -> viewer_packager::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .platform(Platform::LinuxX86_64)
///     .source_root("indra/newview")
///     .staging_root("build/packaged")
///     .build_root("build")
///     .context(BuildContext {
///         channel: Some("Second Life Release".into()),
///         grid: Some("agni".into()),
///         version: vec!["1".into(), "0".into(), "0".into(), "1".into()],
///         ..Default::default()
///     })
///     .build()?;
/// # Ok(())
/// # }
/// ```
///
/// # See Also
///
/// - [`SettingsBuilder`] - Builder for constructing Settings
/// - [`BuildContext`] - Per-run build parameters
#[derive(Clone, Debug)]
pub struct Settings {
    /// Build parameters.
    context: BuildContext,

    /// Product constants.
    product: ProductConfig,

    /// Target platform variant.
    platform: Platform,

    /// Architecture, defaulted from the platform when not given.
    arch: Arch,

    /// Directory all manifest sources are resolved against.
    source_root: PathBuf,

    /// Packaging root; every manifest destination is relative to it.
    staging_root: PathBuf,

    /// Directory receiving intermediate files and final artifacts.
    build_root: PathBuf,
}

impl Settings {
    /// Returns the build context.
    pub fn context(&self) -> &BuildContext {
        &self.context
    }

    /// Returns the product constants.
    pub fn product(&self) -> &ProductConfig {
        &self.product
    }

    /// Returns the target platform.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Returns the target architecture.
    pub fn arch(&self) -> Arch {
        self.arch
    }

    /// Returns the source root.
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Returns the staging (packaging) root.
    pub fn staging_root(&self) -> &Path {
        &self.staging_root
    }

    /// Returns the build output root.
    pub fn build_root(&self) -> &Path {
        &self.build_root
    }

    /// Resolves a path relative to the source root.
    pub fn source_path_of(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.source_root.join(relative)
    }

    /// Resolves a path relative to the staging root.
    pub fn staged_path_of(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.staging_root.join(relative)
    }

    /// Resolves a path relative to the build root.
    pub fn build_path_of(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.build_root.join(relative)
    }

    /// Settings for another platform variant of the same run.
    ///
    /// The staging tree moves to a per-platform subdirectory so variants do
    /// not overwrite each other. An architecture override only carries over
    /// to the platform it was given for; other platforms use their default.
    pub fn for_platform(&self, platform: Platform) -> Self {
        let arch = if platform == self.platform {
            self.arch
        } else {
            if self.arch != self.platform.default_arch() {
                log::warn!(
                    "Architecture override {} applies to {} only; {platform} uses {}",
                    self.arch.tag(),
                    self.platform,
                    platform.default_arch().tag()
                );
            }
            platform.default_arch()
        };

        Self {
            context: self.context.clone(),
            product: self.product.clone(),
            platform,
            arch,
            source_root: self.source_root.clone(),
            staging_root: self.staging_root.join(platform.short_name()),
            build_root: self.build_root.clone(),
        }
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        context: BuildContext,
        product: ProductConfig,
        platform: Platform,
        arch: Arch,
        source_root: PathBuf,
        staging_root: PathBuf,
        build_root: PathBuf,
    ) -> Self {
        Self {
            context,
            product,
            platform,
            arch,
            source_root,
            staging_root,
            build_root,
        }
    }
}
