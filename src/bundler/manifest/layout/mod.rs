//! Per-platform file selection.
//!
//! Each platform variant has one `construct` function that drives a
//! [`PathResolver`] over the viewer source tree. Content common to every
//! platform lives in [`common`].

pub mod common;
pub mod darwin;
pub mod linux;
pub mod windows;

use super::{Manifest, PathResolver};
use crate::bundler::{error::Result, platform::Platform, settings::Settings};

/// Selects every file the platform variant ships.
pub fn construct(settings: &Settings) -> Result<Manifest> {
    let mut resolver = PathResolver::new(settings.source_root());

    match settings.platform() {
        Platform::Windows => windows::construct(&mut resolver, settings)?,
        Platform::Darwin => darwin::construct(&mut resolver, settings)?,
        Platform::LinuxI686 | Platform::LinuxX86_64 => linux::construct(&mut resolver, settings)?,
    }

    debug_assert_eq!(resolver.depth(), 0, "unbalanced prefix scopes");
    let manifest = resolver.into_manifest();
    log::info!(
        "Selected {} files for {} ({} generated)",
        manifest.len(),
        settings.platform(),
        manifest.generated().len()
    );
    Ok(manifest)
}
