//! The ShellCheck binary as an [`ExternalLinter`].

use crate::runner::{ProcessError, ToolCommand, run_command};
use regex::Regex;
use shellcheck_core::{
    DEFAULT_EXECUTABLE, DEFAULT_TIMEOUT, ExternalLinter, InvocationError, LintRequest, Settings,
    ToolOutput,
};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, warn};

/// Output format requested from ShellCheck.
pub const FORMAT_ARG: &str = "--format=json";

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^version:(.+)$").expect("valid version regex"));

/// Runs a ShellCheck executable as a child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellcheckProcess {
    executable: PathBuf,
    timeout: Duration,
}

impl Default for ShellcheckProcess {
    fn default() -> Self {
        Self::new(DEFAULT_EXECUTABLE)
    }
}

impl ShellcheckProcess {
    /// Use `executable` (a path, or a bare name looked up on `PATH`).
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Build from user settings (executable and timeout).
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.resolved_executable()).with_timeout(settings.timeout())
    }

    /// Override the per-run timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The executable being run.
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// The per-run timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The command line used to lint `request`.
    ///
    /// Unsaved content is piped through stdin (`-`); otherwise ShellCheck reads the file itself.
    pub fn lint_command(&self, request: &LintRequest<'_>) -> ToolCommand {
        let mut command = ToolCommand::new(&self.executable)
            .arg(FORMAT_ARG)
            .with_timeout(self.timeout);
        if !request.working_dir.as_os_str().is_empty() {
            command = command.current_dir(request.working_dir);
        }
        match request.content {
            Some(content) => command.arg("-").with_input(content),
            None => command.arg(request.file_path.to_string_lossy()),
        }
    }
}

impl ExternalLinter for ShellcheckProcess {
    fn invoke(&self, request: &LintRequest<'_>) -> Result<ToolOutput, InvocationError> {
        let command = self.lint_command(request);
        let output = run_command(&command)?;
        Ok(output.into())
    }

    fn version(&self) -> Result<String, InvocationError> {
        let command = ToolCommand::new(&self.executable)
            .arg("--version")
            .with_timeout(self.timeout);

        match run_command(&command) {
            Ok(output) if output.exit_code == Some(0) => Ok(parse_version(&output.stdout)),
            Ok(output) => {
                debug!(exit_code = ?output.exit_code, "version query failed");
                Ok(String::new())
            }
            Err(ProcessError::Spawn { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                warn!(executable = %self.executable.display(), "shellcheck executable not found");
                Ok(String::new())
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Extract the version number from `shellcheck --version` output.
///
/// Falls back to the whole (trimmed) output when no `version:` line is present.
pub fn parse_version(output: &str) -> String {
    VERSION_RE
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| output.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERSION_OUTPUT: &str = "ShellCheck - shell script analysis tool\n\
                                  version: 0.9.0\n\
                                  license: GNU General Public License, version 3\n\
                                  website: https://www.shellcheck.net\n";

    #[test]
    fn test_parse_version() {
        assert_eq!(parse_version(VERSION_OUTPUT), "0.9.0");
        assert_eq!(parse_version("version: 0.10.0\r\n"), "0.10.0");
        assert_eq!(parse_version("  v0.7.1  \n"), "v0.7.1");
        assert_eq!(parse_version(""), "");
    }

    #[test]
    fn test_parse_version_reuses_pattern_across_calls() {
        let banner = "ShellCheck\nversion: 0.8.0\nlicense: GPLv3\n";
        for _ in 0..3 {
            assert_eq!(parse_version(banner), "0.8.0");
        }
        // Only a line starting with `version:` counts.
        assert_eq!(parse_version("  version: 1\n"), "version: 1");
        assert!(VERSION_RE.is_match(VERSION_OUTPUT));
    }

    #[test]
    fn test_lint_command_for_unsaved_buffer() {
        let linter = ShellcheckProcess::new("/usr/bin/shellcheck");
        let request = LintRequest::on_disk(Path::new("/project"), Path::new("/project/a.sh"))
            .with_content("echo $1\n");

        let command = linter.lint_command(&request);
        assert_eq!(command.args, vec!["--format=json", "-"]);
        assert_eq!(command.input.as_deref(), Some("echo $1\n"));
        assert_eq!(command.working_dir.as_deref(), Some(Path::new("/project")));
        assert_eq!(command.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_lint_command_for_file_on_disk() {
        let linter = ShellcheckProcess::new("shellcheck").with_timeout(Duration::from_secs(5));
        let request = LintRequest::on_disk(Path::new(""), Path::new("scripts/build.sh"));

        let command = linter.lint_command(&request);
        assert_eq!(command.command_line(), "shellcheck --format=json scripts/build.sh");
        assert_eq!(command.input, None);
        assert_eq!(command.working_dir, None);
        assert_eq!(command.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            shellcheck_executable: " /opt/sc/shellcheck ".to_string(),
            timeout_secs: 7,
            ..Settings::default()
        };
        let linter = ShellcheckProcess::from_settings(&settings);
        assert_eq!(linter.executable(), Path::new("/opt/sc/shellcheck"));
        assert_eq!(linter.timeout(), Duration::from_secs(7));

        assert_eq!(
            ShellcheckProcess::from_settings(&Settings::default()),
            ShellcheckProcess::default()
        );
    }
}
