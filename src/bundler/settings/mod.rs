//! Configuration structures for packaging runs.
//!
//! This module provides the per-run [`BuildContext`], the product-level
//! [`ProductConfig`], and the [`Settings`] value (plus its builder) that is
//! passed explicitly to every component of a run.

mod arch;
mod builder;
mod context;
mod core;
mod product;

// Re-export all public types
pub use arch::Arch;
pub use builder::SettingsBuilder;
pub use context::{Action, BuildContext};
pub use core::Settings;
pub use product::ProductConfig;
