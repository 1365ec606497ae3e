//! macOS packaging.
//!
//! The staged tree is a complete `.app` bundle. Packaging copies it onto a
//! freshly created sparse disk image together with the channel's Finder
//! resources, then converts the image to a compressed DMG.

pub mod dmg;

use crate::bundler::{
    error::{Context, Result},
    manifest::layout::darwin::viewer_binary,
    naming::{NamingPolicy, ReleaseKind},
    settings::{Action, BuildContext, Settings},
    utils::process::{ToolInvocation, ToolRunner},
};
use std::path::PathBuf;

/// Base name of the sparse and final disk images.
pub fn image_name(naming: &NamingPolicy<'_>, context: &BuildContext) -> Result<String> {
    Ok(format!(
        "{}_{}{}",
        naming.product().name,
        context.version_joined("_"),
        naming.artifact_suffix()?
    ))
}

/// Name of the application bundle on the mounted volume, without `.app`.
pub fn app_name(naming: &NamingPolicy<'_>) -> Result<String> {
    Ok(match naming.release_kind()? {
        ReleaseKind::BetaGrid => format!("{} {}", naming.product().name, naming.grid()?),
        ReleaseKind::Release => naming.product().name.clone(),
        ReleaseKind::CustomChannel => naming.channel()?.trim().to_string(),
    })
}

/// Source-relative directory holding the channel's DMG resources.
///
/// Channels without their own resources use the release set.
pub fn dmg_template(settings: &Settings) -> Result<PathBuf> {
    let naming = NamingPolicy::for_settings(settings);
    let base = &settings.product().dmg_template_dir;
    let channel_dir = base.join(format!("{}-dmg", naming.channel_lowerword()?));

    if settings.source_path_of(&channel_dir).is_dir() {
        Ok(channel_dir)
    } else {
        log::debug!(
            "no DMG resources at {}, using release-dmg",
            channel_dir.display()
        );
        Ok(base.join("release-dmg"))
    }
}

/// Strips the staged viewer binary when packaging or running unpacked.
///
/// `-S` keeps enough symbols for annotated backtraces.
pub async fn strip_viewer<R: ToolRunner>(settings: &Settings, runner: &R) -> Result<()> {
    let context = settings.context();
    if !(context.wants(Action::Package) || context.wants(Action::Unpacked)) {
        return Ok(());
    }

    let binary = settings.staged_path_of(viewer_binary(settings));
    log::info!("Stripping {}", binary.display());
    runner
        .run(
            &ToolInvocation::new("strip")
                .arg("-S")
                .arg(binary.to_string_lossy()),
        )
        .await
        .context("stripping viewer binary")?;
    Ok(())
}
