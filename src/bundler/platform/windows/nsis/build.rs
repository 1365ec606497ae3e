//! NSIS installer build execution.
//!
//! Compiles NSI scripts into Windows installer executables using makensis.

use crate::bundler::{
    error::{Context, Error, Result},
    utils::process::{ToolInvocation, ToolRunner},
};
use std::path::Path;

/// Program name of the NSIS compiler.
pub const MAKENSIS: &str = "makensis";

/// Run makensis to compile NSI script into installer executable.
///
/// makensis resolves the script's relative `OutFile` against the script's
/// directory, so the installer lands next to the script.
pub async fn run_makensis<R: ToolRunner>(runner: &R, nsi_path: &Path) -> Result<()> {
    log::info!("Running makensis...");

    let script = nsi_path
        .to_str()
        .ok_or_else(|| Error::GenericError("NSI path is not valid UTF-8".into()))?;

    let invocation = ToolInvocation::new(MAKENSIS).args([
        "-V3",
        "-INPUTCHARSET",
        "UTF8",
        "-OUTPUTCHARSET",
        "UTF8",
        script,
    ]);

    runner
        .run(&invocation)
        .await
        .context("makensis compilation failed")?;
    Ok(())
}
