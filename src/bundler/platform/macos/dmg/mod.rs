//! macOS DMG disk image creator.
//!
//! Builds the distributable image with the native hdiutil, SetFile and Rez
//! tools. Every step is a blocking external call and any failure aborts the
//! remaining steps.
//!
//! # Architecture
//!
//! - `creation` - sparse image creation, attach and output parsing
//! - `customization` - volume contents and Finder attributes
//! - `conversion` - detach and UDZO conversion

mod conversion;
mod creation;
mod customization;

pub use creation::{AttachedVolume, parse_attach_output};

use super::{app_name, dmg_template, image_name};
use crate::bundler::{
    error::Result,
    naming::NamingPolicy,
    settings::Settings,
    utils::{fs, process::ToolRunner},
};
use std::path::PathBuf;

/// Packages the staged bundle as a compressed DMG.
///
/// # Process
/// 1. Remove stale sparse and final images
/// 2. Create and privately attach a sparse HFS+ image
/// 3. Parse the device node and mount point from the attach output
/// 4. Copy the bundle and the channel's Finder resources onto the volume
/// 5. Set Finder attributes and create the Applications alias
/// 6. Detach, convert to UDZO and remove the sparse image
///
/// # Returns
/// Path of the final `.dmg`.
pub async fn package_finish<R: ToolRunner>(settings: &Settings, runner: &R) -> Result<PathBuf> {
    let naming = NamingPolicy::for_settings(settings);
    let image = image_name(&naming, settings.context())?;
    let app = app_name(&naming)?;
    let template = dmg_template(settings)?;
    let volume_name = &settings.product().volume_name;

    log::info!("Creating DMG {image}");

    let sparse = settings.build_path_of(format!("{image}.sparseimage"));
    let dmg = settings.build_path_of(format!("{image}.dmg"));
    fs::remove_file(&sparse).await?;
    fs::remove_file(&dmg).await?;
    fs::create_dir_all(settings.build_root(), false).await?;

    creation::create_sparse_image(runner, &sparse, volume_name).await?;
    let volume = creation::attach(runner, &sparse).await?;

    customization::copy_contents(settings, &volume, &app, &template).await?;
    customization::apply_finder_attributes(settings, runner, &volume).await?;

    conversion::detach(runner, &volume.device).await?;
    conversion::convert_to_compressed(runner, &sparse, &dmg).await?;

    log::info!("✓ Created DMG: {}", dmg.display());
    Ok(dmg)
}
