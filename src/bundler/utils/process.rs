//! External tool invocation.
//!
//! Every packaging tool (makensis, hdiutil, SetFile, Rez, strip, tar) is run
//! through a [`ToolRunner`]. [`SystemRunner`] spawns real processes; tests
//! substitute a runner that records invocations and replays scripted output.

use crate::bundler::error::{Error, Result};
use std::{fmt, future::Future};

/// A fully specified tool invocation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ToolInvocation {
    /// Program name or path.
    pub program: String,
    /// Arguments, passed without shell interpretation.
    pub args: Vec<String>,
}

impl ToolInvocation {
    /// Starts an invocation of `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Captured output of a successful invocation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runs external tools.
pub trait ToolRunner {
    /// Runs the invocation to completion.
    ///
    /// A non-zero exit status is an [`Error::ExternalTool`].
    fn run(&self, invocation: &ToolInvocation) -> impl Future<Output = Result<ToolOutput>> + Send;

    /// Fails with [`Error::ExternalTool`] if `program` cannot be found.
    fn ensure_available(&self, program: &str) -> Result<()>;
}

/// Runs tools as child processes.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    async fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutput> {
        log::debug!("Running: {invocation}");

        let mut command = tokio::process::Command::new(&invocation.program);
        command.args(&invocation.args);

        let output = command
            .output()
            .await
            .map_err(|error| Error::CommandFailed {
                command: invocation.to_string(),
                error,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(Error::ExternalTool {
                tool: invocation.program.clone(),
                status: output.status.to_string(),
                stderr: if stderr.trim().is_empty() { stdout } else { stderr },
            });
        }

        Ok(ToolOutput { stdout, stderr })
    }

    fn ensure_available(&self, program: &str) -> Result<()> {
        match which::which(program) {
            Ok(path) => {
                log::debug!("Found {program} at: {}", path.display());
                Ok(())
            }
            Err(e) => Err(Error::ExternalTool {
                tool: program.to_string(),
                status: "not found".into(),
                stderr: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! A scripted runner for pipeline tests.

    use super::*;
    use std::{collections::HashMap, sync::Mutex};

    /// Records every invocation; replies with scripted stdout per program.
    #[derive(Debug, Default)]
    pub struct FakeRunner {
        calls: Mutex<Vec<ToolInvocation>>,
        stdout: HashMap<String, String>,
        failing: Option<String>,
        unavailable: Vec<String>,
    }

    impl FakeRunner {
        pub fn new() -> Self {
            Self::default()
        }

        /// Replies to `program` with `stdout`.
        pub fn with_stdout(mut self, program: &str, stdout: &str) -> Self {
            self.stdout.insert(program.into(), stdout.into());
            self
        }

        /// Makes `program` exit unsuccessfully.
        pub fn failing(mut self, program: &str) -> Self {
            self.failing = Some(program.into());
            self
        }

        /// Reports `program` as missing from `PATH`.
        pub fn unavailable(mut self, program: &str) -> Self {
            self.unavailable.push(program.into());
            self
        }

        pub fn calls(&self) -> Vec<ToolInvocation> {
            self.calls.lock().unwrap().clone()
        }

        /// Invocations rendered as display strings.
        pub fn commands(&self) -> Vec<String> {
            self.calls().iter().map(ToString::to_string).collect()
        }
    }

    impl ToolRunner for FakeRunner {
        async fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutput> {
            self.calls.lock().unwrap().push(invocation.clone());
            if self.failing.as_deref() == Some(invocation.program.as_str()) {
                return Err(Error::ExternalTool {
                    tool: invocation.program.clone(),
                    status: "exit status: 1".into(),
                    stderr: "scripted failure".into(),
                });
            }
            Ok(ToolOutput {
                stdout: self
                    .stdout
                    .get(&invocation.program)
                    .cloned()
                    .unwrap_or_default(),
                stderr: String::new(),
            })
        }

        fn ensure_available(&self, program: &str) -> Result<()> {
            if self.unavailable.iter().any(|p| p == program) {
                return Err(Error::ExternalTool {
                    tool: program.into(),
                    status: "not found".into(),
                    stderr: String::new(),
                });
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_quotes_whitespace() {
        let invocation = ToolInvocation::new("SetFile")
            .args(["-a", "V"])
            .arg("/Volumes/Imprudence Installer/.DS_Store");
        assert_eq!(
            invocation.to_string(),
            "SetFile -a V \"/Volumes/Imprudence Installer/.DS_Store\""
        );
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_external_tool_error() {
        let err = SystemRunner
            .run(&ToolInvocation::new("sh").args(["-c", "echo boom >&2; exit 3"]))
            .await
            .unwrap_err();
        match err {
            Error::ExternalTool { tool, stderr, .. } => {
                assert_eq!(tool, "sh");
                assert_eq!(stderr.trim(), "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_program_is_command_failed() {
        let err = SystemRunner
            .run(&ToolInvocation::new("definitely-not-a-real-tool-1234"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::CommandFailed { .. }));
        assert!(SystemRunner
            .ensure_available("definitely-not-a-real-tool-1234")
            .is_err());
    }
}
