//! Read-only text buffer queries used by the mapping engine.
//!
//! The host editor owns its document; the core only needs a handful of line/offset lookups to
//! turn tool-reported positions into character offsets. All offsets are zero-based and counted
//! in Unicode scalar values (`char`) from the start of the document.

/// Line/offset queries over an immutable document snapshot.
///
/// Implementations must not change while a mapping pass is running: every offset produced for
/// one batch of issues is relative to the same snapshot.
pub trait TextBuffer {
    /// Number of lines in the document (an empty document has one line).
    fn line_count(&self) -> usize;

    /// Character offset of the first character of `line` (zero-based).
    ///
    /// Callers only pass `line < line_count()`.
    fn line_start_offset(&self, line: usize) -> usize;

    /// Character offset just past the last character of `line`, excluding the line terminator.
    ///
    /// Callers only pass `line < line_count()`.
    fn line_end_offset(&self, line: usize) -> usize;

    /// The character at `offset`, or `None` past the end of the document.
    fn char_at(&self, offset: usize) -> Option<char>;

    /// First offset in `start..end` whose character is neither a space nor a tab.
    ///
    /// Returns `start` when the whole range is blank.
    fn first_non_whitespace_offset(&self, start: usize, end: usize) -> usize {
        (start..end)
            .find(|&offset| !matches!(self.char_at(offset), Some(' ' | '\t')))
            .unwrap_or(start)
    }
}

impl<T: TextBuffer + ?Sized> TextBuffer for &T {
    fn line_count(&self) -> usize {
        (**self).line_count()
    }

    fn line_start_offset(&self, line: usize) -> usize {
        (**self).line_start_offset(line)
    }

    fn line_end_offset(&self, line: usize) -> usize {
        (**self).line_end_offset(line)
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        (**self).char_at(offset)
    }

    fn first_non_whitespace_offset(&self, start: usize, end: usize) -> usize {
        (**self).first_non_whitespace_offset(start, end)
    }
}
