//! Viewer installer packager.
//!
//! Selects the files a viewer build ships through a declarative, scoped
//! path resolver, stages them, and drives platform tools to produce:
//! - Windows installers (.exe via NSIS)
//! - macOS disk images (.dmg)
//! - Linux archives (.tar.bz2)
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
