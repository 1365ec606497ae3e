//! Error types for packaging operations.
//!
//! Provides the error kinds a packaging run can fail with, contextual error
//! chaining, and filesystem errors annotated with the offending path.
//!
//! # Features
//!
//! - **Context trait**: Add context to errors similar to anyhow
//! - **ErrorExt trait**: Filesystem operations with automatic path context
//!
//! # Error policy
//!
//! Configuration and path errors abort a run before anything is staged.
//! External-tool and parse errors abort only the platform variant that raised
//! them; see [`Error::is_platform_local`].

use std::{
    fmt::Display,
    io,
    path::{self, PathBuf},
};
use thiserror::Error as DeriveError;

/// Errors returned by the packager.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// Error with context. Created by the [`Context`] trait.
    #[error("{0}: {1}")]
    Context(String, Box<Self>),

    /// A required build-context value is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required source path does not exist.
    #[error("required path not found: {}", path.display())]
    MissingPath {
        /// Path (or pattern) that was looked up
        path: PathBuf,
    },

    /// A prefix scope was closed with a destination that does not match the
    /// one it was opened with.
    #[error("mismatched prefix scope: expected {expected:?}, popped {actual:?}")]
    ScopeMismatch {
        /// Destination the caller expected to close
        expected: PathBuf,
        /// Destination of the frame actually on top of the stack
        actual: PathBuf,
    },

    /// An external tool exited unsuccessfully.
    #[error("{tool} failed ({status}): {stderr}")]
    ExternalTool {
        /// Program name
        tool: String,
        /// Exit status description
        status: String,
        /// Captured standard error
        stderr: String,
    },

    /// An expected pattern was not found in a tool's textual output.
    #[error("could not parse {what} from {tool} output")]
    Parse {
        /// Program whose output was parsed
        tool: String,
        /// What was being extracted (e.g. "mount point")
        what: &'static str,
    },

    /// Installer template does not match the substitution map.
    #[error("template error: {0}")]
    Template(String),

    /// File system error with path context.
    ///
    /// Created by the [`ErrorExt`] trait's `fs_context` method.
    #[error("{context} {path}: {error}")]
    Fs {
        /// Context describing the operation (e.g., "copying file")
        context: &'static str,
        /// Path that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// Child process could not be spawned at all.
    #[error("failed to run command {command}: {error}")]
    CommandFailed {
        /// Command that failed to execute
        command: String,
        /// The underlying error
        error: io::Error,
    },

    /// Generic I/O error.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// Error walking a directory tree.
    #[error("{0}")]
    WalkdirError(#[from] walkdir::Error),

    /// Path prefix stripping error.
    #[error("{0}")]
    StripError(#[from] path::StripPrefixError),

    /// Invalid glob pattern.
    #[error("{0}")]
    GlobPattern(#[from] glob::PatternError),

    /// Glob execution error.
    #[error("{0}")]
    Glob(#[from] glob::GlobError),

    /// Handlebars template rendering error.
    #[error("{0}")]
    HandleBarsError(#[from] handlebars::RenderError),

    /// Handlebars template parsing error.
    #[error("{0}")]
    HandleBarsTemplate(#[from] handlebars::TemplateError),

    /// Generic error with custom message.
    #[error("{0}")]
    GenericError(String),
}

impl Error {
    /// Whether this error only invalidates the platform variant that raised it.
    ///
    /// A multi-platform run records such failures and moves on to the next
    /// platform; every other error aborts the whole run.
    pub fn is_platform_local(&self) -> bool {
        match self {
            Error::ExternalTool { .. } | Error::Parse { .. } | Error::CommandFailed { .. } => true,
            Error::Context(_, inner) => inner.is_platform_local(),
            _ => false,
        }
    }
}

/// Convenient type alias for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for adding context to errors.
///
/// Similar to `anyhow::Context` but integrated with the packager's Error type.
/// Works with both `Result<T, E>` and `Option<T>`.
pub trait Context<T> {
    /// Add context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Add context to an error using a closure (lazy evaluation).
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context(context.to_string(), Box::new(e)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context(f().to_string(), Box::new(e)))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Extension trait for filesystem operations with automatic path context.
pub trait ErrorExt<T> {
    /// Add filesystem context to an I/O error.
    ///
    /// The `context` should be a present-tense verb phrase describing the operation,
    /// e.g., "reading file", "creating directory", "copying binary".
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_local_classification() {
        let tool = Error::ExternalTool {
            tool: "makensis".into(),
            status: "exit status: 1".into(),
            stderr: String::new(),
        };
        assert!(tool.is_platform_local());

        let wrapped = Err::<(), _>(Error::Parse {
            tool: "hdiutil".into(),
            what: "mount point",
        })
        .context("attaching sparse image")
        .unwrap_err();
        assert!(wrapped.is_platform_local());

        assert!(!Error::Config("channel".into()).is_platform_local());
        assert!(
            !Error::MissingPath {
                path: "fonts/VeraMono.ttf".into()
            }
            .is_platform_local()
        );
    }

    #[test]
    fn test_option_context_message() {
        let err = None::<u8>.context("no grid configured").unwrap_err();
        assert_eq!(err.to_string(), "no grid configured");
    }
}
