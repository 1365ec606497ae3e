//! Linux packaging.
//!
//! Linux builds ship as a bzip2-compressed tarball of the staged tree, with
//! permissions normalized so that the archive unpacks usable for any user.

pub mod archive;
pub mod permissions;

use crate::bundler::{
    error::Result,
    naming::NamingPolicy,
    settings::Settings,
    utils::process::ToolRunner,
};
use std::path::PathBuf;

/// Installer (and archive top-level directory) name.
///
/// `installer_name` overrides it; otherwise it is the product, the
/// architecture tag and every version component joined with `_`, followed by
/// the grid or channel suffix.
pub fn installer_name(settings: &Settings) -> Result<String> {
    let naming = NamingPolicy::for_settings(settings);
    if let Some(name) = naming.installer_name() {
        return Ok(name.to_string());
    }

    let mut parts = vec![
        settings.product().name.clone(),
        settings.arch().tag().to_string(),
    ];
    parts.extend(settings.context().version.iter().cloned());
    Ok(format!("{}{}", parts.join("_"), naming.artifact_suffix()?))
}

/// Normalizes permissions and archives the staged tree.
pub async fn package_finish<R: ToolRunner>(settings: &Settings, runner: &R) -> Result<PathBuf> {
    let name = installer_name(settings)?;
    log::info!("Creating tarball {name}.tar.bz2");

    let changed = permissions::normalize(settings.staging_root()).await?;
    log::debug!("Fixed permissions on {changed} staged entries");

    archive::create_tarball(
        runner,
        settings.staging_root(),
        settings.build_root(),
        &name,
    )
    .await
}
