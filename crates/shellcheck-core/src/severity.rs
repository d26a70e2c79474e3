//! Severity classification of ShellCheck levels.

use serde::Serialize;

/// Severity tier used to render a diagnostic's visual urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational diagnostics (ShellCheck `info`, `style` and unknown levels).
    Info,
    /// Warning diagnostics.
    Warning,
    /// Error diagnostics.
    Error,
}

impl Severity {
    /// Classify a ShellCheck level tag.
    ///
    /// With `demote_errors_to_warnings`, `"error"` is reported as [`Severity::Warning`]; every
    /// other level is unaffected.
    pub fn classify(level: &str, demote_errors_to_warnings: bool) -> Self {
        match level {
            "error" if demote_errors_to_warnings => Self::Warning,
            "error" => Self::Error,
            "warning" => Self::Warning,
            _ => Self::Info,
        }
    }

    /// Lowercase label (`"error"`, `"warning"`, `"info"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
