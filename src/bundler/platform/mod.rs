//! Platform-specific packaging implementations.
//!
//! # Supported Platforms
//!
//! | Platform | Artifact | Module |
//! |----------|----------|--------|
//! | Windows | NSIS installer (.exe) | [`windows`] |
//! | macOS | compressed disk image (.dmg) | [`macos`] |
//! | Linux i686 / x86_64 | bzip2 tarball (.tar.bz2) | [`linux`] |
//!
//! Packaging logic is not gated on the host OS: every platform variant can
//! be staged and its installer script generated anywhere. Only the external
//! tools each one drives need to be present.

pub mod linux;
pub mod macos;
pub mod windows;

use crate::bundler::{
    error::Result,
    manifest::Manifest,
    settings::{Arch, Settings},
    utils::process::ToolRunner,
};
use std::{fmt, path::PathBuf};

/// Target platform variant.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Platform {
    /// 32-bit Windows, NSIS installer.
    Windows,
    /// macOS universal bundle, DMG.
    Darwin,
    /// 32-bit Linux tarball.
    LinuxI686,
    /// 64-bit Linux tarball.
    LinuxX86_64,
}

impl Platform {
    /// Every supported variant.
    pub const ALL: [Platform; 4] = [
        Platform::Windows,
        Platform::Darwin,
        Platform::LinuxI686,
        Platform::LinuxX86_64,
    ];

    /// Returns the short name for this platform.
    ///
    /// This is the lowercase identifier used in CLI arguments and staging paths.
    pub fn short_name(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Darwin => "darwin",
            Platform::LinuxI686 => "linux_i686",
            Platform::LinuxX86_64 => "linux_x86_64",
        }
    }

    /// Parses a platform name; accepts the short names and common aliases.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "windows" | "win32" | "win" => Some(Platform::Windows),
            "darwin" | "macos" | "mac" => Some(Platform::Darwin),
            "linux_i686" | "linux" => Some(Platform::LinuxI686),
            "linux_x86_64" | "linux64" => Some(Platform::LinuxX86_64),
            _ => None,
        }
    }

    /// Architecture a build for this platform targets by default.
    pub fn default_arch(&self) -> Arch {
        match self {
            Platform::Windows | Platform::LinuxI686 => Arch::X86,
            Platform::Darwin => Arch::Universal,
            Platform::LinuxX86_64 => Arch::X86_64,
        }
    }

    /// Artifact kind, for display.
    pub fn artifact_kind(&self) -> &'static str {
        match self {
            Platform::Windows => "NSIS installer",
            Platform::Darwin => "DMG",
            Platform::LinuxI686 | Platform::LinuxX86_64 => "tarball",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Work done after staging, before any artifact is built.
pub async fn post_construct<R: ToolRunner>(settings: &Settings, runner: &R) -> Result<()> {
    match settings.platform() {
        Platform::Darwin => macos::strip_viewer(settings, runner).await,
        Platform::Windows | Platform::LinuxI686 | Platform::LinuxX86_64 => Ok(()),
    }
}

/// Builds the platform's installer artifact from the staged tree.
pub async fn package_finish<R: ToolRunner>(
    settings: &Settings,
    manifest: &Manifest,
    runner: &R,
) -> Result<PathBuf> {
    match settings.platform() {
        Platform::Windows => windows::nsis::package_finish(settings, manifest, runner).await,
        Platform::Darwin => macos::dmg::package_finish(settings, runner).await,
        Platform::LinuxI686 | Platform::LinuxX86_64 => {
            linux::package_finish(settings, runner).await
        }
    }
}
