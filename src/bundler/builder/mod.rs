//! Packaging orchestration.
//!
//! This module provides the main [`Bundler`] orchestrator that runs the
//! manifest, staging and packaging steps for one or several platform
//! variants.
//!
//! # Example
//!
//! ```no_run
//! use viewer_packager::bundler::{Action, BuildContext, Bundler, Platform, SettingsBuilder};
//!
//! # async fn example() -> viewer_packager::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .platform(Platform::Windows)
//!     .source_root("indra/newview")
//!     .staging_root("build/packaged")
//!     .build_root("build")
//!     .context(BuildContext {
//!         configuration: "Release".into(),
//!         channel: Some("Second Life Release".into()),
//!         grid: Some("agni".into()),
//!         version: vec!["1".into(), "22".into(), "11".into(), "113941".into()],
//!         actions: [Action::Copy, Action::Package].into(),
//!         ..Default::default()
//!     })
//!     .build()?;
//!
//! let bundler = Bundler::new(settings);
//! let report = bundler
//!     .bundle_platforms(&[Platform::Windows, Platform::Darwin])
//!     .await?;
//!
//! for artifact in report.artifacts() {
//!     println!("Created: {} ({} bytes)", artifact.path.display(), artifact.size);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`orchestrator`] - Main [`Bundler`] struct and the per-variant pipeline
//! - [`tool_detection`] - External tool availability checking

mod orchestrator;
mod tool_detection;

pub use orchestrator::{BundleReport, Bundler, PlatformFailure, PlatformRun};
pub use tool_detection::required_tools;
