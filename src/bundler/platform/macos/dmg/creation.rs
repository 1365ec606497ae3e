//! Sparse image creation and mounting.

use crate::bundler::{
    error::{Context, Error, Result},
    utils::process::{ToolInvocation, ToolRunner},
};
use regex::Regex;
use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

/// Whole-disk device node, e.g. `/dev/disk3` but not `/dev/disk3s1`.
static DEVICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(/dev/disk[0-9]+)(?:[^s0-9]|$)").expect("device pattern is valid")
});

/// Mount point following the HFS partition type.
static MOUNT_POINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"HFS\s+(.+)").expect("mount point pattern is valid"));

/// A mounted disk image.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttachedVolume {
    /// Device node to detach.
    pub device: String,
    /// Directory the volume is mounted at.
    pub mount_point: PathBuf,
}

/// Creates a 300MB sparse HFS+ image with an SPUD layout.
pub async fn create_sparse_image<R: ToolRunner>(
    runner: &R,
    sparse: &Path,
    volume_name: &str,
) -> Result<()> {
    log::info!("Creating sparse image {}", sparse.display());

    let invocation = ToolInvocation::new("hdiutil")
        .arg("create")
        .arg(sparse.to_string_lossy())
        .args([
            "-volname",
            volume_name,
            "-fs",
            "HFS+",
            "-type",
            "SPARSE",
            "-megabytes",
            "300",
            "-layout",
            "SPUD",
        ]);
    runner
        .run(&invocation)
        .await
        .context("creating sparse image")?;
    Ok(())
}

/// Attaches the image privately and parses where it was mounted.
pub async fn attach<R: ToolRunner>(runner: &R, sparse: &Path) -> Result<AttachedVolume> {
    let invocation = ToolInvocation::new("hdiutil")
        .args(["attach", "-private"])
        .arg(sparse.to_string_lossy());
    let output = runner
        .run(&invocation)
        .await
        .context("attaching sparse image")?;

    let volume = parse_attach_output(&output.stdout)?;
    log::debug!(
        "Attached {} at {}",
        volume.device,
        volume.mount_point.display()
    );
    Ok(volume)
}

/// Extracts the device node and mount point from `hdiutil attach` output.
///
/// Both must be present and non-empty.
pub fn parse_attach_output(stdout: &str) -> Result<AttachedVolume> {
    let device = DEVICE
        .captures(stdout)
        .map(|c| c[1].trim().to_string())
        .filter(|d| !d.is_empty())
        .ok_or_else(|| Error::Parse {
            tool: "hdiutil".into(),
            what: "device node",
        })?;

    let mount_point = MOUNT_POINT
        .captures(stdout)
        .map(|c| c[1].trim().to_string())
        .filter(|m| !m.is_empty())
        .ok_or_else(|| Error::Parse {
            tool: "hdiutil".into(),
            what: "mount point",
        })?;

    Ok(AttachedVolume {
        device,
        mount_point: PathBuf::from(mount_point),
    })
}
