//! Logical line index
//!
//! Rope-backed document snapshot implementing [`TextBuffer`], with O(log N) line access.
//!
//! Only `\n` (and `\r\n`) terminate lines. ShellCheck numbers lines the same way, so a stray
//! form feed or lone `\r` in a script must not shift every diagnostic below it.

use crate::buffer::TextBuffer;
use ropey::Rope;

/// Logical line index - implemented using Rope data structure
#[derive(Debug, Clone)]
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Create an empty line index
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Build line index from text
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Get line number and offset within line from character offset
    pub fn char_offset_to_position(&self, char_offset: usize) -> (usize, usize) {
        let char_offset = char_offset.min(self.rope.len_chars());

        let line_idx = self.rope.char_to_line(char_offset);
        let line_start_char = self.rope.line_to_char(line_idx);
        let char_in_line = char_offset - line_start_char;

        (line_idx, char_in_line)
    }

    /// Get total character count
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Get text of the specified line (excluding the line terminator)
    pub fn get_line_text(&self, line_number: usize) -> Option<String> {
        if line_number >= self.rope.len_lines() {
            return None;
        }

        let start = self.rope.line_to_char(line_number);
        let end = self.line_end_offset(line_number);
        Some(self.rope.slice(start..end).to_string())
    }
}

impl TextBuffer for LineIndex {
    fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn line_start_offset(&self, line: usize) -> usize {
        self.rope.line_to_char(line.min(self.rope.len_lines()))
    }

    fn line_end_offset(&self, line: usize) -> usize {
        if line + 1 >= self.rope.len_lines() {
            return self.rope.len_chars();
        }

        // Step back over `\n`, then over `\r` for CRLF documents.
        let mut end = self.rope.line_to_char(line + 1) - 1;
        let start = self.rope.line_to_char(line);
        if end > start && self.rope.char(end - 1) == '\r' {
            end -= 1;
        }
        end
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        self.rope.get_char(offset)
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for LineIndex {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}
