//! Builder for constructing Settings.

use super::{Arch, BuildContext, ProductConfig, Settings};
use crate::bundler::{error::Error, platform::Platform};
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Provides a fluent API for building packaging settings with validation.
///
/// # See Also
///
/// - [`Settings`] - The built settings struct
#[derive(Default)]
pub struct SettingsBuilder {
    context: Option<BuildContext>,
    product: ProductConfig,
    platform: Option<Platform>,
    arch: Option<Arch>,
    source_root: Option<PathBuf>,
    staging_root: Option<PathBuf>,
    build_root: Option<PathBuf>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the build context.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn context(mut self, context: BuildContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Sets product constants.
    ///
    /// Default: [`ProductConfig::default`]
    pub fn product(mut self, product: ProductConfig) -> Self {
        self.product = product;
        self
    }

    /// Sets the target platform.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Overrides the architecture derived from the platform.
    pub fn arch(mut self, arch: Arch) -> Self {
        self.arch = Some(arch);
        self
    }

    /// Sets the directory manifest sources are resolved against.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn source_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the staging root.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn staging_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.staging_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the build output root.
    ///
    /// Default: parent of the staging root
    pub fn build_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.build_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a required field is missing or the version
    /// has no components.
    pub fn build(self) -> crate::bundler::Result<Settings> {
        let context = self
            .context
            .ok_or_else(|| Error::Config("build context is required".into()))?;
        let platform = self
            .platform
            .ok_or_else(|| Error::Config("platform is required".into()))?;
        let source_root = self
            .source_root
            .ok_or_else(|| Error::Config("source_root is required".into()))?;
        let staging_root = self
            .staging_root
            .ok_or_else(|| Error::Config("staging_root is required".into()))?;

        if context.version.is_empty() || context.version.iter().any(|c| c.is_empty()) {
            return Err(Error::Config(format!(
                "version must have non-empty components, got {:?}",
                context.version
            )));
        }

        let build_root = match self.build_root {
            Some(root) => root,
            None => staging_root
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        };

        Ok(Settings::new(
            context,
            self.product,
            platform,
            self.arch.unwrap_or_else(|| platform.default_arch()),
            source_root,
            staging_root,
            build_root,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> BuildContext {
        BuildContext {
            version: vec!["1".into(), "2".into(), "3".into(), "4".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_platform_is_config_error() {
        let err = SettingsBuilder::new()
            .context(context())
            .source_root("src")
            .staging_root("out/stage")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_empty_version_rejected() {
        let err = SettingsBuilder::new()
            .context(BuildContext::default())
            .platform(Platform::Windows)
            .source_root("src")
            .staging_root("out/stage")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_build_root_defaults_to_staging_parent() {
        let settings = SettingsBuilder::new()
            .context(context())
            .platform(Platform::LinuxI686)
            .source_root("src")
            .staging_root("out/stage")
            .build()
            .unwrap();
        assert_eq!(settings.build_root(), Path::new("out"));
        assert_eq!(settings.arch(), Arch::X86);
    }

    #[test]
    fn test_arch_override_stays_with_its_platform() {
        let settings = SettingsBuilder::new()
            .context(context())
            .platform(Platform::LinuxX86_64)
            .arch(Arch::X86)
            .source_root("src")
            .staging_root("out/stage")
            .build()
            .unwrap();

        let same = settings.for_platform(Platform::LinuxX86_64);
        assert_eq!(same.arch(), Arch::X86);
        assert_eq!(same.staging_root(), Path::new("out/stage/linux_x86_64"));

        assert_eq!(settings.for_platform(Platform::Darwin).arch(), Arch::Universal);
        assert_eq!(settings.for_platform(Platform::LinuxI686).arch(), Arch::X86);
    }
}
