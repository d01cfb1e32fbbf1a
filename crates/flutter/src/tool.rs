//! Flutter toolchain invocation
//!
//! Thin wrapper over subprocess execution. Quality steps (test, analyze,
//! format) and the intl generators stream their output straight to the
//! terminal; builds capture output so the artifact path can be recovered.

use flutterlane_core::error::{Error, Result};
use flutterlane_core::process::{
    CommandResult, command_exists, run_command, run_command_streaming,
};
use tracing::debug;

/// Handle on the flutter executable
#[derive(Debug, Clone)]
pub struct FlutterTool {
    bin: String,
}

impl FlutterTool {
    /// Create a tool handle for the given executable name or path
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    /// The executable this handle invokes
    pub fn bin(&self) -> &str {
        &self.bin
    }

    /// Fail with `CommandNotFound` unless the executable is on PATH
    pub fn ensure_available(&self) -> Result<()> {
        if command_exists(&self.bin) {
            Ok(())
        } else {
            Err(Error::command_not_found(&self.bin))
        }
    }

    /// Run a flutter command and capture its output
    pub fn run<S: AsRef<str>>(&self, args: &[S]) -> Result<CommandResult> {
        let argv: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        debug!(bin = %self.bin, args = ?argv, "running flutter (captured)");
        run_command(&self.bin, &argv)
    }

    /// Run a flutter command with inherited stdio, failing on non-zero exit
    pub fn run_streaming<S: AsRef<str>>(&self, args: &[S]) -> Result<()> {
        let argv: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        debug!(bin = %self.bin, args = ?argv, "running flutter");
        let code = run_command_streaming(&self.bin, &argv)?;
        if code != 0 {
            return Err(Error::tool(format!(
                "{} {} exited with status {}",
                self.bin,
                argv.first().unwrap_or(&""),
                code
            )));
        }
        Ok(())
    }

    /// Run the test suite
    pub fn test(&self) -> Result<()> {
        self.run_streaming(&["test"])
    }

    /// Run static analysis
    pub fn analyze(&self) -> Result<()> {
        self.run_streaming(&["analyze"])
    }

    /// Format the whole source tree
    pub fn format(&self) -> Result<()> {
        self.run_streaming(&["format", "."])
    }

    /// Run the build_runner code generator
    pub fn build_runner(&self) -> Result<()> {
        self.run_streaming(&[
            "packages",
            "pub",
            "run",
            "build_runner",
            "build",
            "--delete-conflicting-outputs",
        ])
    }
}
