//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, with every option
//! also readable from the environment so build scripts can drive the
//! packager without long command lines.

use crate::bundler::{
    Action, Arch, BuildContext, Platform, ProductConfig, Settings, SettingsBuilder,
};
use crate::error::{CliError, Result};
use clap::Parser;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Viewer installer packager
#[derive(Parser, Debug)]
#[command(
    name = "viewer_packager",
    about = "Selects, stages and packages viewer builds into platform installers",
    long_about = "Selects the files a viewer build ships, stages them into a packaging tree and \
drives the platform tools to produce the installer.

Usage:
  viewer_packager --platform windows --channel \"Second Life Release\" --grid agni --version 1.22.11.113941 --actions copy,package
  viewer_packager --platform linux_i686,linux_x86_64 --channel \"Second Life Beta\" --grid aditi --version 1.23.0.1 --staging build/packaged

Exit code 0 = every requested platform produced its artifact."
)]
pub struct Args {
    /// Platforms to package: windows, darwin, linux_i686, linux_x86_64
    #[arg(
        short,
        long = "platform",
        value_name = "PLATFORM",
        value_delimiter = ',',
        required = true,
        env = "VIEWER_PLATFORM"
    )]
    pub platforms: Vec<String>,

    /// Release channel, e.g. "Second Life Release"
    #[arg(long, env = "VIEWER_CHANNEL")]
    pub channel: Option<String>,

    /// Target grid, e.g. agni
    #[arg(long, env = "VIEWER_GRID")]
    pub grid: Option<String>,

    /// Dotted version, e.g. 1.22.11.113941
    #[arg(long = "version", value_name = "VERSION", env = "VIEWER_VERSION")]
    pub viewer_version: Option<String>,

    /// Build configuration the binaries were compiled in
    #[arg(long, default_value = "Release", env = "VIEWER_CONFIGURATION")]
    pub configuration: String,

    /// Actions to perform: copy, package, unpacked
    #[arg(long, value_delimiter = ',', default_value = "copy", env = "VIEWER_ACTIONS")]
    pub actions: Vec<String>,

    /// Installer file name, overriding the derived one
    #[arg(long, env = "VIEWER_INSTALLER_NAME")]
    pub installer_name: Option<String>,

    /// Channel reported at login only
    #[arg(long, env = "VIEWER_LOGIN_CHANNEL")]
    pub login_channel: Option<String>,

    /// Architecture override: i686, x86_64, universal
    #[arg(long, env = "VIEWER_ARCH")]
    pub arch: Option<String>,

    /// Viewer source directory (indra/newview)
    #[arg(short = 's', long, default_value = ".", env = "VIEWER_SOURCE")]
    pub source: PathBuf,

    /// Staging (packaging) directory
    #[arg(long, default_value = "packaged", env = "VIEWER_STAGING")]
    pub staging: PathBuf,

    /// Build output directory (default: parent of the staging directory)
    #[arg(long, env = "VIEWER_BUILD")]
    pub build: Option<PathBuf>,

    /// Product configuration file (TOML with a [product] table)
    #[arg(long, env = "VIEWER_PRODUCT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Additional KEY=VALUE arguments passed through to the build context
    #[arg(long = "extra", value_name = "KEY=VALUE")]
    pub extra: Vec<String>,

    /// Show per-step detail
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> std::result::Result<(), CliError> {
        if self.channel.as_deref().is_none_or(|c| c.trim().is_empty()) {
            return Err(CliError::MissingArgument {
                argument: "channel".to_string(),
            });
        }
        if self.grid.as_deref().is_none_or(|g| g.trim().is_empty()) {
            return Err(CliError::MissingArgument {
                argument: "grid".to_string(),
            });
        }

        self.platforms()?;
        self.version_components()?;
        self.parsed_actions()?;
        self.parsed_arch()?;
        self.extra_args()?;
        Ok(())
    }

    /// Requested platforms in order, duplicates removed.
    pub fn platforms(&self) -> std::result::Result<Vec<Platform>, CliError> {
        let mut platforms = Vec::new();
        for name in &self.platforms {
            let platform = Platform::parse(name).ok_or_else(|| CliError::InvalidArguments {
                reason: format!(
                    "Invalid platform: {name}. Valid platforms: {}",
                    Platform::ALL.map(|p| p.short_name()).join(", ")
                ),
            })?;
            if !platforms.contains(&platform) {
                platforms.push(platform);
            }
        }
        Ok(platforms)
    }

    /// Version split into its dotted components.
    pub fn version_components(&self) -> std::result::Result<Vec<String>, CliError> {
        let version = self
            .viewer_version
            .as_deref()
            .ok_or_else(|| CliError::MissingArgument {
                argument: "version".to_string(),
            })?;

        let components: Vec<String> = version.trim().split('.').map(str::to_string).collect();
        if components
            .iter()
            .any(|c| c.is_empty() || !c.chars().all(|ch| ch.is_ascii_alphanumeric()))
        {
            return Err(CliError::InvalidArguments {
                reason: format!("Invalid version: {version}"),
            });
        }
        Ok(components)
    }

    fn parsed_actions(&self) -> std::result::Result<BTreeSet<Action>, CliError> {
        self.actions
            .iter()
            .map(|name| {
                Action::parse(name).ok_or_else(|| CliError::InvalidArguments {
                    reason: format!("Invalid action: {name}. Valid actions: copy, package, unpacked"),
                })
            })
            .collect()
    }

    fn parsed_arch(&self) -> std::result::Result<Option<Arch>, CliError> {
        self.arch
            .as_deref()
            .map(|tag| {
                Arch::parse(tag).ok_or_else(|| CliError::InvalidArguments {
                    reason: format!("Invalid architecture: {tag}"),
                })
            })
            .transpose()
    }

    fn extra_args(&self) -> std::result::Result<BTreeMap<String, String>, CliError> {
        self.extra
            .iter()
            .map(|pair| match pair.split_once('=') {
                Some((key, value)) if !key.trim().is_empty() => {
                    Ok((key.trim().to_string(), value.to_string()))
                }
                _ => Err(CliError::InvalidArguments {
                    reason: format!("--extra expects KEY=VALUE, got {pair:?}"),
                }),
            })
            .collect()
    }

    /// Build context described by these arguments.
    pub fn build_context(&self) -> std::result::Result<BuildContext, CliError> {
        Ok(BuildContext {
            configuration: self.configuration.clone(),
            channel: self.channel.clone(),
            grid: self.grid.clone(),
            login_channel: self.login_channel.clone(),
            version: self.version_components()?,
            actions: self.parsed_actions()?,
            installer_name: self.installer_name.clone(),
            extra_args: self.extra_args()?,
        })
    }

    /// Settings for the first requested platform.
    ///
    /// Further platforms are derived from it by the bundler.
    pub fn settings(&self, product: ProductConfig) -> Result<Settings> {
        let platform = self
            .platforms()?
            .first()
            .copied()
            .ok_or_else(|| CliError::MissingArgument {
                argument: "platform".to_string(),
            })?;

        let mut builder = SettingsBuilder::new()
            .context(self.build_context()?)
            .product(product)
            .platform(platform)
            .source_root(&self.source)
            .staging_root(&self.staging);
        if let Some(arch) = self.parsed_arch()? {
            builder = builder.arch(arch);
        }
        if let Some(build) = &self.build {
            builder = builder.build_root(build);
        }
        Ok(builder.build()?)
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.verbose, args.quiet),
        }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print success message
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}
