//! Annotation records emitted for the presentation layer.
//!
//! An [`Annotation`] is the end of the pipeline for one [`Issue`]:
//!
//! ```text
//! Issue -> map_issue -> MappedRange -> select_highlight -> HighlightRange -> Annotation
//! ```
//!
//! Renderers can use annotations for gutter markers, underlines and hover messages.

use crate::buffer::TextBuffer;
use crate::highlight::select_highlight;
use crate::issue::Issue;
use crate::mapping::map_issue;
use crate::severity::Severity;
use serde::Serialize;

/// Name reported in [`Annotation::source`].
pub const ANNOTATION_SOURCE: &str = "shellcheck";

/// A half-open character-offset range (`start..end`) in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnnotationRange {
    /// Range start offset (inclusive), in Unicode scalar values (`char`) from the start of the document.
    pub start: usize,
    /// Range end offset (exclusive), in Unicode scalar values (`char`) from the start of the document.
    pub end: usize,
}

impl AnnotationRange {
    /// Create a new annotation range.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns `true` for zero-width markers.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A single annotation for the current document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    /// Annotation range in character offsets.
    pub range: AnnotationRange,
    /// Severity tier.
    pub severity: Severity,
    /// Formatted message (`"<message> [SC<code>]"`).
    pub message: String,
    /// Diagnostic code with its `SC` prefix, if the linter reported one.
    pub code: Option<String>,
    /// Producer of the annotation.
    pub source: &'static str,
    /// Render after the last character of the line rather than under a character.
    pub anchor_at_line_end: bool,
}

/// Display options for turning issues into annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnnotationOptions {
    /// Highlight from the first non-blank character to the end of the line.
    pub highlight_whole_line: bool,
    /// Report `error` level issues as warnings.
    pub treat_all_issues_as_warnings: bool,
}

/// Build the annotation for one issue, or `None` if the issue does not fit the buffer.
pub fn annotate_issue<B: TextBuffer + ?Sized>(
    buffer: &B,
    issue: &Issue,
    options: AnnotationOptions,
) -> Option<Annotation> {
    let mapped = map_issue(buffer, issue)?;
    let highlight = select_highlight(buffer, &mapped, options.highlight_whole_line);

    Some(Annotation {
        range: AnnotationRange::new(highlight.start, highlight.end),
        severity: Severity::classify(&issue.level, options.treat_all_issues_as_warnings),
        message: issue.formatted_message(),
        code: issue.display_code(),
        source: ANNOTATION_SOURCE,
        anchor_at_line_end: highlight.anchor_at_line_end,
    })
}

/// Build annotations for every issue that fits the buffer, preserving the linter's order.
pub fn annotate_issues<B: TextBuffer + ?Sized>(
    buffer: &B,
    issues: &[Issue],
    options: AnnotationOptions,
) -> Vec<Annotation> {
    issues
        .iter()
        .filter_map(|issue| annotate_issue(buffer, issue, options))
        .collect()
}
