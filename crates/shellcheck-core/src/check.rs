//! One buffer check: invoke the linter, decode its output, annotate the buffer.
//!
//! A check is a stateless unit of work over an immutable buffer snapshot. Every failure is
//! recovered at the boundary of the check; [`Checker::check_with_report`] turns it into a
//! [`Notification`] so that one broken run never affects other checks.

use crate::annotation::{Annotation, AnnotationOptions, annotate_issues};
use crate::buffer::TextBuffer;
use crate::issue::Issue;
use crate::linter::{ExternalLinter, InvocationError, LintRequest, ToolOutput};
use crate::notification::Notification;
use crate::parser::{ParseError, parse_issues};
use thiserror::Error;
use tracing::{debug, warn};

/// Exit codes ShellCheck uses for "ran fine" (0: clean, 1: issues found).
pub const EXPECTED_EXIT_CODES: &[i32] = &[0, 1];

#[derive(Debug, Error)]
/// Why a check produced no annotations.
pub enum CheckError {
    #[error(transparent)]
    /// The linter could not be run (missing, spawn failure, timeout).
    Invocation(#[from] InvocationError),

    #[error("linter reported: {stderr}")]
    /// The linter wrote to stderr; its stdout is not trusted.
    ToolReported {
        /// Trimmed stderr text.
        stderr: String,
    },

    #[error("linter exited unexpectedly ({}): {output}", exit_status_label(.code))]
    /// The linter exited with a code outside [`EXPECTED_EXIT_CODES`].
    UnexpectedExit {
        /// Exit code, `None` if terminated by a signal.
        code: Option<i32>,
        /// Trimmed stdout text.
        output: String,
    },

    #[error(transparent)]
    /// The linter's stdout did not match the expected schema.
    Parse(#[from] ParseError),
}

fn exit_status_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

impl CheckError {
    /// Returns `true` if the linter was terminated for exceeding its time limit.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Invocation(InvocationError::Timeout { .. }))
    }

    /// The notification to show the user for this failure.
    pub fn notification(&self) -> Notification {
        match self {
            Self::ToolReported { stderr } => Notification::warning(stderr.clone()),
            Self::Invocation(InvocationError::MissingExecutable(_)) => {
                Notification::warning(self.to_string())
            }
            Self::Invocation(err) => {
                Notification::error(format!("Error running shellcheck inspection: {err}"))
            }
            Self::UnexpectedExit { .. } => Notification::error(self.to_string()),
            Self::Parse(err) => Notification::error(err.raw.trim().to_string()),
        }
    }
}

/// Decode a linter run, applying the stderr / exit-code policy before parsing stdout.
pub fn issues_from_output(output: ToolOutput) -> Result<Vec<Issue>, CheckError> {
    let stderr = output.stderr.trim();
    if !stderr.is_empty() {
        warn!(stderr, "linter wrote to stderr, ignoring its output");
        return Err(CheckError::ToolReported {
            stderr: stderr.to_string(),
        });
    }

    if !output
        .exit_code
        .is_some_and(|code| EXPECTED_EXIT_CODES.contains(&code))
    {
        return Err(CheckError::UnexpectedExit {
            code: output.exit_code,
            output: output.stdout.trim().to_string(),
        });
    }

    Ok(parse_issues(&output.stdout)?)
}

/// Outcome of [`Checker::check_with_report`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// Annotations for the buffer (empty on failure).
    pub annotations: Vec<Annotation>,
    /// Set when the check failed and the user should be told.
    pub notification: Option<Notification>,
}

/// Runs an [`ExternalLinter`] and maps its findings onto buffers.
///
/// A `Checker` holds only immutable configuration; it is `Sync` whenever its linter is, so one
/// checker can serve concurrent checks of different buffers.
#[derive(Debug, Clone)]
pub struct Checker<L> {
    linter: L,
    options: AnnotationOptions,
}

impl<L: ExternalLinter> Checker<L> {
    /// Create a checker around `linter`.
    pub fn new(linter: L, options: AnnotationOptions) -> Self {
        Self { linter, options }
    }

    /// The injected linter.
    pub fn linter(&self) -> &L {
        &self.linter
    }

    /// Display options applied to every check.
    pub fn options(&self) -> AnnotationOptions {
        self.options
    }

    /// Check one buffer.
    ///
    /// `buffer` must hold the same text the linter sees (the request's `content`, or the file on
    /// disk). Issues that fall outside the buffer are dropped silently.
    pub fn check<B: TextBuffer + ?Sized>(
        &self,
        request: &LintRequest<'_>,
        buffer: &B,
    ) -> Result<Vec<Annotation>, CheckError> {
        debug!(
            file = %request.file_path.display(),
            unsaved = request.content.is_some(),
            "running check"
        );

        let output = self.linter.invoke(request)?;
        let issues = issues_from_output(output)?;
        let annotations = annotate_issues(buffer, &issues, self.options);

        debug!(
            file = %request.file_path.display(),
            issues = issues.len(),
            annotations = annotations.len(),
            "check finished"
        );
        Ok(annotations)
    }

    /// Like [`Checker::check`], but converts failures into a notification.
    pub fn check_with_report<B: TextBuffer + ?Sized>(
        &self,
        request: &LintRequest<'_>,
        buffer: &B,
    ) -> CheckReport {
        match self.check(request, buffer) {
            Ok(annotations) => CheckReport {
                annotations,
                notification: None,
            },
            Err(err) => {
                debug!(file = %request.file_path.display(), error = %err, "check failed");
                CheckReport {
                    annotations: Vec::new(),
                    notification: Some(err.notification()),
                }
            }
        }
    }
}
