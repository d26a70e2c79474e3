//! The external linter capability.
//!
//! The core never spawns processes itself. A host injects an [`ExternalLinter`] (see
//! `shellcheck-core-process` for the process-backed one) into a
//! [`Checker`](crate::check::Checker).

use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Hard limit for one linter run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// File extensions handed to the linter.
pub const SHELL_SCRIPT_EXTENSIONS: &[&str] = &["sh", "bash"];

/// What to lint.
#[derive(Debug, Clone, Copy)]
pub struct LintRequest<'a> {
    /// Directory the linter runs in (usually the project root).
    pub working_dir: &'a Path,
    /// Path of the file being checked.
    pub file_path: &'a Path,
    /// Unsaved buffer contents. When `None` the linter reads `file_path` from disk.
    pub content: Option<&'a str>,
}

impl<'a> LintRequest<'a> {
    /// Lint the on-disk contents of `file_path`.
    pub fn on_disk(working_dir: &'a Path, file_path: &'a Path) -> Self {
        Self {
            working_dir,
            file_path,
            content: None,
        }
    }

    /// Lint in-memory `content` on behalf of `file_path`.
    pub fn with_content(mut self, content: &'a str) -> Self {
        self.content = Some(content);
        self
    }
}

/// Captured result of one linter run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Everything written to stdout.
    pub stdout: String,
    /// Everything written to stderr.
    pub stderr: String,
    /// Exit code, `None` if the process was terminated by a signal.
    pub exit_code: Option<i32>,
}

#[derive(Debug, Error)]
/// Failures to run the external linter at all.
pub enum InvocationError {
    #[error("linter executable not found: {}", .0.display())]
    /// The configured executable does not exist.
    MissingExecutable(PathBuf),

    #[error("failed to start '{command}': {source}")]
    /// The process could not be spawned.
    Spawn {
        /// Rendered command line.
        command: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error while talking to the linter: {0}")]
    /// Reading or writing the process pipes failed.
    Io(#[from] std::io::Error),

    #[error("command '{command}' timed out after {timeout:?}")]
    /// The process did not finish in time and was terminated.
    Timeout {
        /// Rendered command line.
        command: String,
        /// The limit that was exceeded.
        timeout: Duration,
    },
}

/// A shell-script linter that can be invoked on a file or buffer.
pub trait ExternalLinter {
    /// Run the linter for `request` and capture its output.
    fn invoke(&self, request: &LintRequest<'_>) -> Result<ToolOutput, InvocationError>;

    /// The linter's version string (empty if it cannot be determined).
    fn version(&self) -> Result<String, InvocationError>;
}

impl<L: ExternalLinter + ?Sized> ExternalLinter for &L {
    fn invoke(&self, request: &LintRequest<'_>) -> Result<ToolOutput, InvocationError> {
        (**self).invoke(request)
    }

    fn version(&self) -> Result<String, InvocationError> {
        (**self).version()
    }
}

/// Whether `path` looks like a shell script the linter should check.
pub fn is_shell_script(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SHELL_SCRIPT_EXTENSIONS.contains(&ext))
}
