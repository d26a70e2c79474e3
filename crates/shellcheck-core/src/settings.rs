//! Linter settings.
//!
//! Settings are plain data, loaded from a JSON document with camelCase keys:
//!
//! ```json
//! {
//!   "shellcheckExecutable": "/usr/bin/shellcheck",
//!   "treatAllIssuesAsWarnings": false,
//!   "highlightWholeLine": true,
//!   "pluginEnabled": true,
//!   "timeoutSecs": 120
//! }
//! ```
//!
//! Every key is optional.

use crate::annotation::AnnotationOptions;
use crate::linter::DEFAULT_TIMEOUT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Executable looked up on `PATH` when none is configured.
pub const DEFAULT_EXECUTABLE: &str = "shellcheck";

#[derive(Debug, Error)]
/// Errors produced while loading settings.
pub enum SettingsError {
    #[error("I/O error: {0}")]
    /// The settings file could not be read.
    Io(#[from] std::io::Error),

    #[error("invalid settings: {0}")]
    /// The settings file is not valid JSON for [`Settings`].
    Json(#[from] serde_json::Error),
}

/// User settings for the linter integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Path to the ShellCheck executable; empty means "find `shellcheck` on `PATH`".
    pub shellcheck_executable: String,
    /// Report errors as warnings.
    pub treat_all_issues_as_warnings: bool,
    /// Highlight whole lines instead of the reported column span.
    pub highlight_whole_line: bool,
    /// Master switch; nothing is checked when disabled.
    pub plugin_enabled: bool,
    /// Per-run time limit in seconds.
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shellcheck_executable: String::new(),
            treat_all_issues_as_warnings: false,
            highlight_whole_line: false,
            plugin_enabled: true,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Display options derived from these settings.
    pub fn annotation_options(&self) -> AnnotationOptions {
        AnnotationOptions {
            highlight_whole_line: self.highlight_whole_line,
            treat_all_issues_as_warnings: self.treat_all_issues_as_warnings,
        }
    }

    /// Per-run time limit. Zero falls back to [`DEFAULT_TIMEOUT`].
    pub fn timeout(&self) -> Duration {
        match self.timeout_secs {
            0 => DEFAULT_TIMEOUT,
            secs => Duration::from_secs(secs),
        }
    }

    /// The configured executable, or [`DEFAULT_EXECUTABLE`] when unset.
    pub fn resolved_executable(&self) -> PathBuf {
        match self.shellcheck_executable.trim() {
            "" => PathBuf::from(DEFAULT_EXECUTABLE),
            path => PathBuf::from(path),
        }
    }
}
