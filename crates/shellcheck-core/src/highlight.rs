//! Choosing the final highlight span for a mapped issue.

use crate::buffer::TextBuffer;
use crate::mapping::MappedRange;

/// The span handed to the presentation layer.
///
/// `start == end` is a valid zero-width marker at `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightRange {
    /// Range start offset (inclusive), in chars.
    pub start: usize,
    /// Range end offset (exclusive), in chars.
    pub end: usize,
    /// Render the marker after the last character of the line instead of under a character.
    pub anchor_at_line_end: bool,
}

/// Select the highlight span for `mapped`.
///
/// - whole-line mode: from the first non-blank character of the issue's lines to the end of
///   its last line (leading indentation is never underlined)
/// - precise mode: the mapped column span
pub fn select_highlight<B: TextBuffer + ?Sized>(
    buffer: &B,
    mapped: &MappedRange,
    highlight_whole_line: bool,
) -> HighlightRange {
    let (start, end) = if highlight_whole_line {
        let start =
            buffer.first_non_whitespace_offset(mapped.line_start_offset, mapped.line_end_offset);
        (start, mapped.line_end_offset)
    } else {
        let (a, b) = (mapped.column_start_offset, mapped.column_end_offset);
        (a.min(b), a.max(b))
    };

    HighlightRange {
        start,
        end,
        anchor_at_line_end: mapped.column_start_offset == mapped.line_end_offset,
    }
}
