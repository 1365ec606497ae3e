//! Volume contents and Finder attributes.
//!
//! Copies the app bundle and the channel's Finder resources onto the mounted
//! volume, then marks the resources invisible and gives the Applications
//! alias and the volume root their custom icons.

use super::creation::AttachedVolume;
use crate::bundler::{
    error::{Context, Result},
    settings::Settings,
    utils::{
        fs,
        process::{ToolInvocation, ToolRunner},
    },
};
use std::path::Path;

/// Template resource file names and the names they take on the volume.
const RESOURCES: [(&str, &str); 3] = [
    ("_VolumeIcon.icns", ".VolumeIcon.icns"),
    ("background.jpg", "background.jpg"),
    ("_DS_Store", ".DS_Store"),
];

/// Copies the staged bundle and DMG resources onto the volume.
pub async fn copy_contents(
    settings: &Settings,
    volume: &AttachedVolume,
    app_name: &str,
    template: &Path,
) -> Result<()> {
    let bundle = volume.mount_point.join(format!("{app_name}.app"));
    log::info!("Copying to dmg {} -> {}", settings.staging_root().display(), bundle.display());
    fs::copy_dir(settings.staging_root(), &bundle)
        .await
        .context("copying app bundle to volume")?;

    for (source, dest) in RESOURCES {
        let from = settings.source_path_of(template.join(source));
        let to = volume.mount_point.join(dest);
        log::debug!("Copying to dmg {} -> {}", from.display(), to.display());
        fs::copy_file(&from, &to)
            .await
            .with_context(|| format!("copying {source} to volume"))?;
    }
    Ok(())
}

async fn set_file<R: ToolRunner>(runner: &R, attributes: &str, path: &Path) -> Result<()> {
    runner
        .run(
            &ToolInvocation::new("SetFile")
                .args(["-a", attributes])
                .arg(path.to_string_lossy()),
        )
        .await
        .with_context(|| format!("setting attributes on {}", path.display()))?;
    Ok(())
}

/// Hides the resources, creates the Applications alias and sets custom icons.
pub async fn apply_finder_attributes<R: ToolRunner>(
    settings: &Settings,
    runner: &R,
    volume: &AttachedVolume,
) -> Result<()> {
    let mount = &volume.mount_point;

    for (_, dest) in RESOURCES {
        set_file(runner, "V", &mount.join(dest)).await?;
    }

    let alias_source = settings.source_path_of(
        settings
            .product()
            .dmg_template_dir
            .join("release-dmg/Applications-alias.r"),
    );
    let alias = mount.join("Applications");
    runner
        .run(
            &ToolInvocation::new("Rez")
                .arg(alias_source.to_string_lossy())
                .arg("-o")
                .arg(alias.to_string_lossy()),
        )
        .await
        .context("creating Applications alias")?;

    set_file(runner, "AC", &alias).await?;
    set_file(runner, "C", mount).await?;

    log::info!("✓ Volume attributes applied");
    Ok(())
}
