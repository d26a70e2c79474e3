//! User-facing notifications.
//!
//! The core is UI-agnostic: failures of a check are handed back as small typed messages that the
//! host shows in whatever notification surface it has (balloons, status bar, stderr).

use serde::Serialize;
use std::fmt;

/// Notification urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// An error message.
    Error,
    /// A warning message.
    Warning,
    /// An informational message.
    Info,
}

impl NotificationKind {
    /// Lowercase name (`error`, `warning`, `info`).
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Error => "error",
            NotificationKind::Warning => "warning",
            NotificationKind::Info => "info",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message for the user about a check that produced no annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Message severity.
    pub kind: NotificationKind,
    /// Message text.
    pub message: String,
}

impl Notification {
    /// Create an error notification.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    /// Create a warning notification.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Warning,
            message: message.into(),
        }
    }

    /// Create an informational notification.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_kind_in_lowercase() {
        let json = serde_json::to_string(&Notification::warning("stderr output")).unwrap();
        assert_eq!(json, r#"{"kind":"warning","message":"stderr output"}"#);
        assert_eq!(NotificationKind::Info.to_string(), "info");
    }
}
