//! `.tar.bz2` creation.
//!
//! The archive's top-level directory must carry the installer name, so the
//! staged tree is renamed for the duration of the `tar` call and always
//! renamed back afterwards.

use crate::bundler::{
    error::{Context, Error, Result},
    utils::{
        fs,
        process::{ToolInvocation, ToolRunner},
    },
};
use std::path::{Path, PathBuf};

/// Archives `staging_root` as `<build_root>/<name>.tar.bz2`.
pub async fn create_tarball<R: ToolRunner>(
    runner: &R,
    staging_root: &Path,
    build_root: &Path,
    name: &str,
) -> Result<PathBuf> {
    let renamed = build_root.join(name);
    let tarball = build_root.join(format!("{name}.tar.bz2"));
    let needs_rename = renamed != staging_root;

    if needs_rename {
        if renamed.exists() {
            return Err(Error::GenericError(format!(
                "cannot rename staged tree: {} already exists",
                renamed.display()
            )));
        }
        fs::rename(staging_root, &renamed).await?;
    }

    // --numeric-owner hides the builder's user name.
    let invocation = ToolInvocation::new("tar")
        .arg("-C")
        .arg(build_root.to_string_lossy())
        .args(["--numeric-owner", "-cjf"])
        .arg(tarball.to_string_lossy())
        .arg(name);
    let result = runner.run(&invocation).await.context("creating tarball");

    if needs_rename {
        fs::rename(&renamed, staging_root).await?;
    }

    result?;
    log::info!("✓ Created tarball: {}", tarball.display());
    Ok(tarball)
}
