//! Colored terminal output for packaging runs.

use std::io::Write;
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Output manager for consistent colored terminal output
#[derive(Debug)]
pub struct OutputManager {
    bufwtr: BufferWriter,
    verbose: bool,
    quiet: bool,
}

impl Clone for OutputManager {
    fn clone(&self) -> Self {
        Self::new(self.verbose, self.quiet)
    }
}

impl OutputManager {
    /// Create a new output manager
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            bufwtr: BufferWriter::stdout(ColorChoice::Auto),
            verbose,
            quiet,
        }
    }

    fn marked(&self, marker: &str, spec: &ColorSpec, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }

        let mut buffer = self.bufwtr.buffer();
        let _ = buffer.set_color(spec);
        let _ = write!(&mut buffer, "{marker}");
        let _ = buffer.reset();
        let _ = writeln!(&mut buffer, " {message}");
        self.bufwtr.print(&buffer)
    }

    /// Print a success message
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.marked(
            "✓",
            ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true),
            message,
        )
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.marked(
            "⚠",
            ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true),
            message,
        )
    }

    /// Print a progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.marked("⋯", ColorSpec::new().set_fg(Some(Color::Magenta)), message)
    }

    /// Print a verbose message (only in verbose mode)
    pub fn verbose(&self, message: &str) -> std::io::Result<()> {
        if !self.verbose {
            return Ok(());
        }
        self.marked("→", ColorSpec::new().set_fg(Some(Color::Blue)), message)
    }

    /// Print an error message (always shown, on stderr)
    pub fn error(&self, message: &str) {
        let bufwtr = BufferWriter::stderr(ColorChoice::Auto);
        let mut buffer = bufwtr.buffer();

        if buffer
            .set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))
            .is_err()
            || write!(&mut buffer, "✗").is_err()
            || buffer.reset().is_err()
            || writeln!(&mut buffer, " {message}").is_err()
            || bufwtr.print(&buffer).is_err()
        {
            println!("[STDERR ERROR] ✗ {message}");
        }
    }

    /// Print a section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }

        let mut buffer = self.bufwtr.buffer();
        let _ = writeln!(&mut buffer);
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true));
        let _ = writeln!(&mut buffer, "═══ {title} ═══");
        let _ = buffer.reset();
        self.bufwtr.print(&buffer)
    }

    /// Print indented text (for sub-items)
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }

        let mut buffer = self.bufwtr.buffer();
        let _ = writeln!(&mut buffer, "    {message}");
        self.bufwtr.print(&buffer)
    }
}
