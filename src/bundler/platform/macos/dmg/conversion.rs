//! Detaching and compressing the disk image.
//!
//! The sparse image must be detached before hdiutil can convert it; the
//! result is a compressed read-only UDZO image.

use crate::bundler::{
    error::{Context, Result},
    utils::{
        fs,
        process::{ToolInvocation, ToolRunner},
    },
};
use std::path::Path;

/// Force-detaches a mounted device.
pub async fn detach<R: ToolRunner>(runner: &R, device: &str) -> Result<()> {
    runner
        .run(&ToolInvocation::new("hdiutil").args(["detach", "-force", device]))
        .await
        .context("detaching disk image")?;
    Ok(())
}

/// Converts the sparse image to UDZO at maximum zlib level, then removes it.
pub async fn convert_to_compressed<R: ToolRunner>(
    runner: &R,
    sparse: &Path,
    dmg: &Path,
) -> Result<()> {
    log::info!("Converting temp disk image to final disk image");

    let invocation = ToolInvocation::new("hdiutil")
        .arg("convert")
        .arg(sparse.to_string_lossy())
        .args(["-format", "UDZO", "-imagekey", "zlib-level=9", "-o"])
        .arg(dmg.to_string_lossy());
    runner
        .run(&invocation)
        .await
        .context("converting disk image")?;

    fs::remove_file(sparse).await?;

    log::info!("✓ DMG converted to compressed UDZO format");
    Ok(())
}
