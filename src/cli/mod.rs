//! Command line interface for the viewer packager.
//!
//! Parses the build context from arguments and environment, runs the
//! requested platform variants and reports each artifact or failure.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::bundler::{BundleReport, Bundler, ProductConfig};
use crate::error::Result;
use crate::metadata;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let config = RuntimeConfig::from(&args);

    match execute(&args, &config).await {
        Ok(code) => Ok(code),
        Err(e) => {
            config.output().error(&e.to_string());
            for suggestion in e.recovery_suggestions() {
                let _ = config.indent(&suggestion);
            }
            Ok(1)
        }
    }
}

/// Runs a validated packaging request; returns the process exit code.
pub async fn execute(args: &Args, config: &RuntimeConfig) -> Result<i32> {
    args.validate()?;
    let platforms = args.platforms()?;

    let product = match &args.config {
        Some(path) => metadata::load_product_config(path)?,
        None => ProductConfig::default(),
    };
    let settings = args.settings(product)?;

    config.section(&format!("Packaging {}", settings.product().name))?;
    config.verbose_println(&format!("Source: {}", settings.source_root().display()))?;
    config.verbose_println(&format!("Staging: {}", settings.staging_root().display()))?;

    let bundler = Bundler::new(settings);
    let report = bundler.bundle_platforms(&platforms).await?;

    report_results(&report, config)?;
    Ok(if report.is_success() { 0 } else { 1 })
}

fn report_results(report: &BundleReport, config: &RuntimeConfig) -> Result<()> {
    for run in &report.completed {
        match &run.artifact {
            Some(artifact) => config.success(&format!(
                "{}: {} {} ({} bytes)",
                run.platform,
                run.platform.artifact_kind(),
                artifact.path.display(),
                artifact.size
            ))?,
            None => config.success(&format!(
                "{}: {} files selected, {} staged",
                run.platform,
                run.manifest.len(),
                run.staged
            ))?,
        }
    }

    for failure in &report.failed {
        config
            .output()
            .error(&format!("{}: {}", failure.platform, failure.error));
    }

    if !report.failed.is_empty() {
        config.progress(&format!(
            "{} of {} platforms failed",
            report.failed.len(),
            report.failed.len() + report.completed.len()
        ))?;
    }
    Ok(())
}
