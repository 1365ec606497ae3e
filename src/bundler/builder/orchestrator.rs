//! Main packaging orchestrator.

use super::tool_detection;
use crate::bundler::{
    BundledArtifact, Error, Result, Settings,
    error::ErrorExt,
    manifest::{Manifest, layout},
    naming::NamingPolicy,
    platform::{self, Platform},
    settings::Action,
    staging,
    utils::process::{SystemRunner, ToolRunner},
};

/// Main packager for creating platform installers.
///
/// Drives every step of a run for one platform variant, or for several in
/// sequence: manifest construction, staging, post-processing and the
/// platform's packaging pipeline.
#[derive(Debug)]
pub struct Bundler<R: ToolRunner = SystemRunner> {
    settings: Settings,
    runner: R,
}

/// Outcome of one platform variant that ran to completion.
#[derive(Debug)]
pub struct PlatformRun {
    /// Platform variant.
    pub platform: Platform,
    /// The constructed manifest.
    pub manifest: Manifest,
    /// Files written into the staging tree (zero unless `copy` was requested).
    pub staged: usize,
    /// Installer artifact (only when `package` was requested).
    pub artifact: Option<BundledArtifact>,
}

/// A platform variant abandoned after a platform-local failure.
#[derive(Debug)]
pub struct PlatformFailure {
    /// Platform variant.
    pub platform: Platform,
    /// Why it failed.
    pub error: Error,
}

/// Result of a multi-platform run.
#[derive(Debug, Default)]
pub struct BundleReport {
    /// Variants that completed, in the order they ran.
    pub completed: Vec<PlatformRun>,
    /// Variants that failed with a platform-local error.
    pub failed: Vec<PlatformFailure>,
}

impl BundleReport {
    /// Whether every requested platform completed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Every artifact produced by the run.
    pub fn artifacts(&self) -> impl Iterator<Item = &BundledArtifact> {
        self.completed.iter().filter_map(|run| run.artifact.as_ref())
    }
}

impl Bundler<SystemRunner> {
    /// Create a new bundler that invokes tools as child processes.
    pub fn new(settings: Settings) -> Self {
        Self::with_runner(settings, SystemRunner)
    }
}

impl<R: ToolRunner> Bundler<R> {
    /// Create a bundler with a custom tool runner.
    pub fn with_runner(settings: Settings, runner: R) -> Self {
        Self { settings, runner }
    }

    /// Get reference to bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs the configured platform variant.
    ///
    /// # Process
    ///
    /// 1. Validate channel and grid naming
    /// 2. Check that the external tools for the requested actions exist
    /// 3. Build the manifest from the platform layout
    /// 4. Stage it when `copy` is requested
    /// 5. Run the platform's post-staging step
    /// 6. Build the installer when `package` is requested
    pub async fn bundle(&self) -> Result<PlatformRun> {
        run_variant(&self.settings, &self.runner).await
    }

    /// Runs several platform variants in order.
    ///
    /// Each variant after the first stages into its own subdirectory of the
    /// staging root. Platform-local failures (external tools, unparseable
    /// tool output) are recorded and the next variant runs; any other error
    /// aborts the whole run.
    pub async fn bundle_platforms(&self, platforms: &[Platform]) -> Result<BundleReport> {
        let mut report = BundleReport::default();

        for &platform in platforms {
            let settings = if platforms.len() == 1 && platform == self.settings.platform() {
                self.settings.clone()
            } else {
                self.settings.for_platform(platform)
            };

            match run_variant(&settings, &self.runner).await {
                Ok(run) => report.completed.push(run),
                Err(error) if error.is_platform_local() => {
                    log::error!("{platform} packaging failed: {error}");
                    report.failed.push(PlatformFailure { platform, error });
                }
                Err(error) => return Err(error),
            }
        }

        log::info!(
            "Packaging finished: {} succeeded, {} failed",
            report.completed.len(),
            report.failed.len()
        );
        Ok(report)
    }
}

async fn run_variant<R: ToolRunner>(settings: &Settings, runner: &R) -> Result<PlatformRun> {
    let platform = settings.platform();
    let context = settings.context();
    log::info!("Packaging {platform} ({})", settings.arch().tag());

    // Configuration errors surface here, before anything is touched on disk.
    let flags = NamingPolicy::for_settings(settings).flags_list()?;
    log::debug!("Runtime flags: {flags}");

    tool_detection::ensure_tools(settings, runner)?;

    let manifest = layout::construct(settings)?;

    let staged = if context.wants(Action::Copy) {
        staging::stage(settings, &manifest).await?
    } else {
        0
    };

    platform::post_construct(settings, runner).await?;

    let artifact = if context.wants(Action::Package) {
        let path = platform::package_finish(settings, &manifest, runner).await?;
        let size = tokio::fs::metadata(&path)
            .await
            .fs_context("reading artifact metadata", &path)?
            .len();
        Some(BundledArtifact {
            platform,
            path,
            size,
        })
    } else {
        None
    };

    Ok(PlatformRun {
        platform,
        manifest,
        staged,
        artifact,
    })
}
