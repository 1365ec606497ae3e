//! Top-level error types for the packager binary.
//!
//! Wraps the library's [`bundler::Error`](crate::bundler::Error) together with
//! argument and configuration errors, with recovery suggestions for the CLI.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for packager operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all packager operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Product configuration parse errors
    #[error("TOML error in {}: {error}", path.display())]
    Toml {
        /// Configuration file
        path: PathBuf,
        /// Parser error
        error: toml::de::Error,
    },

    /// Packaging errors
    #[error("Packaging error: {0}")]
    Bundler(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required argument
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        use crate::bundler::Error as E;

        match self {
            BundlerError::Cli(CliError::MissingArgument { argument }) => vec![
                format!("Pass --{argument} or set its environment variable"),
                "Run with --help to list every option".to_string(),
            ],
            BundlerError::Cli(_) => vec!["Run with --help to list every option".to_string()],
            BundlerError::Toml { path, .. } => vec![format!(
                "Check that {} contains a valid [product] table",
                path.display()
            )],
            BundlerError::Bundler(E::MissingPath { .. }) => vec![
                "Check --source points at the viewer's newview directory".to_string(),
                "Build the viewer before packaging it".to_string(),
            ],
            BundlerError::Bundler(E::Config(_)) => {
                vec!["Pass --channel and --grid for every run".to_string()]
            }
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }

    /// Whether the failure only affected some platform variants.
    pub fn is_platform_local(&self) -> bool {
        matches!(self, BundlerError::Bundler(e) if e.is_platform_local())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_argument_suggestion_names_flag() {
        let err: BundlerError = CliError::MissingArgument {
            argument: "grid".into(),
        }
        .into();
        assert_eq!(err.to_string(), "CLI error: Missing required argument: grid");
        assert!(err.recovery_suggestions()[0].contains("--grid"));
    }

    #[test]
    fn test_config_error_is_not_platform_local() {
        let err: BundlerError = crate::bundler::Error::Config("grid is required".into()).into();
        assert!(!err.is_platform_local());
        assert!(err.recovery_suggestions()[0].contains("--grid"));
    }
}
