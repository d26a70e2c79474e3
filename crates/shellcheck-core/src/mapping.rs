//! Display-column to character-offset mapping.
//!
//! ShellCheck reports 1-based line/column pairs where every tab counts as 8 display columns and
//! every other character as 1. The buffer stores raw characters, so a tab is a single offset.
//! This module walks a line, accumulating display width, to find the character a reported
//! column lands on.
//!
//! ```text
//! "\techo $x"
//!  ^^^^^^^^ tab covers display columns 1..=8
//!          ^ 'e' is column 9, '$' is column 14
//! ```

use crate::buffer::TextBuffer;
use crate::issue::Issue;
use tracing::trace;

/// Display width ShellCheck assumes for a tab character.
pub const TAB_WIDTH: usize = 8;

/// Character-offset spans derived from one [`Issue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappedRange {
    /// Start of the issue's first line.
    pub line_start_offset: usize,
    /// End of the issue's last line (excluding the terminator).
    pub line_end_offset: usize,
    /// Offset the start column lands on (on the first line).
    pub column_start_offset: usize,
    /// Offset the end column lands on (on the last line).
    pub column_end_offset: usize,
}

/// Find the offset in `line_start..line_end` that covers zero-based display column
/// `target_col`.
///
/// Returns the first offset whose cumulative display width exceeds `target_col`, or `None` when
/// the column lies past the rendered content of the line.
pub fn normalize_column<B: TextBuffer + ?Sized>(
    buffer: &B,
    line_start: usize,
    line_end: usize,
    target_col: usize,
) -> Option<usize> {
    let mut col = 0usize;
    for offset in line_start..line_end {
        col += match buffer.char_at(offset)? {
            '\t' => TAB_WIDTH,
            _ => 1,
        };
        if col > target_col {
            return Some(offset);
        }
    }
    None
}

/// Map an issue onto the buffer.
///
/// Returns `None` when the issue's start or end line is outside the buffer, or when its end line
/// comes before its start line. The former happens when the linter analysed a different version
/// of the text than the one being annotated; such issues are dropped, never reported.
pub fn map_issue<B: TextBuffer + ?Sized>(buffer: &B, issue: &Issue) -> Option<MappedRange> {
    let line_count = buffer.line_count();
    let end_line = issue.effective_end_line();

    let (Some(start_line), Some(last_line)) = (issue.line.checked_sub(1), end_line.checked_sub(1))
    else {
        trace!(line = issue.line, end_line, "dropping issue without a line");
        return None;
    };
    if start_line >= line_count || last_line >= line_count {
        trace!(
            line = issue.line,
            end_line,
            line_count,
            "dropping issue outside of buffer"
        );
        return None;
    }
    if last_line < start_line {
        trace!(line = issue.line, end_line, "dropping issue ending before it starts");
        return None;
    }

    let line_start_offset = buffer.line_start_offset(start_line);
    let start_line_end = buffer.line_end_offset(start_line);
    let last_line_start = buffer.line_start_offset(last_line);
    let line_end_offset = buffer.line_end_offset(last_line);

    // Column 0 ("unset") sits at the line start; a column past the content sits at the line end.
    let column_start_offset = match issue.column.checked_sub(1) {
        Some(target) => normalize_column(buffer, line_start_offset, start_line_end, target)
            .unwrap_or(start_line_end),
        None => line_start_offset,
    };
    let column_end_offset = match issue.effective_end_column().checked_sub(1) {
        Some(target) => normalize_column(buffer, last_line_start, line_end_offset, target)
            .unwrap_or(line_end_offset),
        None => last_line_start,
    };

    Some(MappedRange {
        line_start_offset,
        line_end_offset,
        column_start_offset,
        column_end_offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_index::LineIndex;

    #[test]
    fn test_plain_columns_are_char_offsets() {
        let buffer = LineIndex::from_text("echo hello");
        for column in 1..=10 {
            assert_eq!(
                normalize_column(&buffer, 0, 10, column - 1),
                Some(column - 1),
                "column {column}"
            );
        }
    }

    #[test]
    fn test_tab_expands_to_eight_columns() {
        let buffer = LineIndex::from_text("\t\tx");
        // Every display column covered by the first tab resolves to the tab itself.
        for target in 0..8 {
            assert_eq!(normalize_column(&buffer, 0, 3, target), Some(0));
        }
        assert_eq!(normalize_column(&buffer, 0, 3, 8), Some(1));
        assert_eq!(normalize_column(&buffer, 0, 3, 16), Some(2));
    }

    #[test]
    fn test_column_past_content_is_unresolved() {
        let buffer = LineIndex::from_text("ab\ncd");
        assert_eq!(normalize_column(&buffer, 0, 2, 2), None);
        assert_eq!(normalize_column(&buffer, 0, 0, 0), None);
    }
}
