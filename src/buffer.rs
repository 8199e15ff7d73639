use anyhow::anyhow;
use ropey::Rope;

use crate::{
    char_index_range::CharIndexRange,
    editor_context::EditorContext,
    position::Position,
    selection::{CharIndex, SelectionType},
};

/// An immutable text buffer over a `ropey` rope, serving as the crate's
/// reference [`EditorContext`].
///
/// Geometric queries clamp out-of-range inputs instead of failing; only
/// [`Buffer::slice`] is fallible.
#[derive(Clone)]
pub struct Buffer {
    rope: Rope,
}

impl Buffer {
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn char_to_line(&self, char_index: CharIndex) -> usize {
        self.rope
            .try_char_to_line(char_index.0.min(self.rope.len_chars()))
            .unwrap_or_else(|_| self.rope.len_lines().saturating_sub(1))
    }

    pub fn line_to_char(&self, line: usize) -> CharIndex {
        CharIndex(
            self.rope
                .try_line_to_char(line)
                .unwrap_or_else(|_| self.rope.len_chars()),
        )
    }

    pub fn get_line(&self, line: usize) -> Option<ropey::RopeSlice> {
        self.rope.get_line(line)
    }

    pub fn slice(&self, range: &CharIndexRange) -> anyhow::Result<Rope> {
        let slice = self
            .rope
            .get_slice(range.start.0..range.end.0)
            .ok_or_else(|| anyhow!("Buffer::slice: range {:?} is out of bounds", range))?;
        Ok(slice.into())
    }

    /// Length of `line` excluding its terminator.
    fn line_len_without_newline(&self, line: usize) -> usize {
        let Some(line) = self.get_line(line) else {
            return 0;
        };
        let len = line.len_chars();
        match line.get_char(len.saturating_sub(1)) {
            Some('\n') => len - 1,
            _ => len,
        }
    }
}

impl EditorContext for Buffer {
    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn char_to_position(&self, char_index: CharIndex) -> Position {
        let char_index = char_index.0.min(self.rope.len_chars());
        let line = self.char_to_line(CharIndex(char_index));
        Position {
            line,
            column: self
                .rope
                .try_line_to_char(line)
                .map(|line_start| char_index.saturating_sub(line_start))
                .unwrap_or(0),
        }
    }

    fn position_to_char(&self, position: Position) -> CharIndex {
        let line = position.line.min(self.rope.len_lines().saturating_sub(1));
        let column = position.column.min(self.line_len_without_newline(line));
        self.line_to_char(line) + column
    }

    fn line_end(&self, line: usize, allow_end: bool) -> CharIndex {
        let line = line.min(self.rope.len_lines().saturating_sub(1));
        let line_start = self.line_to_char(line);
        let end = line_start + self.line_len_without_newline(line);
        if allow_end {
            end
        } else {
            (end - 1).max(line_start)
        }
    }

    fn char_at(&self, char_index: CharIndex) -> Option<char> {
        self.rope.get_char(char_index.0)
    }

    fn native_selection(
        &self,
        vim_start: CharIndex,
        vim_end: CharIndex,
        selection_type: SelectionType,
    ) -> (CharIndex, CharIndex) {
        let max = CharIndex(self.rope.len_chars());
        match selection_type {
            // The cursor is inclusive in visual mode, so the later bound is
            // pushed one past the character under it.
            SelectionType::Character | SelectionType::Block => {
                if vim_start <= vim_end {
                    (vim_start.min(max), (vim_end + 1).min(max))
                } else {
                    ((vim_start + 1).min(max), vim_end.min(max))
                }
            }
            // Line-wise bounds snap to whole lines: the earlier side to its
            // line start, the later side to just past its line terminator.
            SelectionType::Line => {
                let forward = vim_start <= vim_end;
                let (earlier, later) = if forward {
                    (vim_start, vim_end)
                } else {
                    (vim_end, vim_start)
                };
                let start = self.line_to_char(self.char_to_line(earlier));
                let end = self.line_to_char(self.char_to_line(later) + 1);
                if forward {
                    (start, end)
                } else {
                    (end, start)
                }
            }
        }
    }
}

#[cfg(test)]
mod test_buffer {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn position_mapping_clamps() {
        let buffer = Buffer::new("abc\nde\n");
        assert_eq!(
            buffer.char_to_position(CharIndex(5)),
            Position::new(1, 1)
        );
        // Column past the line terminator clamps to the terminator.
        assert_eq!(buffer.position_to_char(Position::new(0, 99)), CharIndex(3));
        // Line past the buffer clamps to the last line.
        assert_eq!(buffer.position_to_char(Position::new(99, 0)), CharIndex(7));
        assert_eq!(buffer.char_to_position(CharIndex(99)), Position::new(2, 0));
    }

    #[test]
    fn get_line_by_index() {
        let buffer = Buffer::new("abc\nde\n");
        assert_eq!(
            buffer.get_line(1).map(|line| line.to_string()),
            Some("de\n".to_string())
        );
        assert_eq!(buffer.get_line(99).map(|line| line.to_string()), None);
    }

    #[test]
    fn line_end_offsets() {
        let buffer = Buffer::new("abc\nde\nfghij");
        assert_eq!(buffer.line_end(0, true), CharIndex(3));
        assert_eq!(buffer.line_end(0, false), CharIndex(2));
        // Last line has no terminator; its end is the buffer end.
        assert_eq!(buffer.line_end(2, true), CharIndex(12));
        assert_eq!(buffer.line_end(99, true), CharIndex(12));
    }

    #[test]
    fn line_end_of_empty_line_stays_at_line_start() {
        let buffer = Buffer::new("abc\n\nde");
        assert_eq!(buffer.line_end(1, true), CharIndex(4));
        assert_eq!(buffer.line_end(1, false), CharIndex(4));
    }

    #[test]
    fn native_selection_character_extends_later_bound() {
        let buffer = Buffer::new("abcdefghij");
        assert_eq!(
            buffer.native_selection(CharIndex(2), CharIndex(5), SelectionType::Character),
            (CharIndex(2), CharIndex(6))
        );
        assert_eq!(
            buffer.native_selection(CharIndex(5), CharIndex(2), SelectionType::Character),
            (CharIndex(6), CharIndex(2))
        );
    }

    #[test]
    fn native_selection_line_snaps_to_whole_lines() {
        let buffer = Buffer::new("abc\nde\nfghij\n");
        // Forward gesture from inside line 0 to inside line 1.
        assert_eq!(
            buffer.native_selection(CharIndex(1), CharIndex(5), SelectionType::Line),
            (CharIndex(0), CharIndex(7))
        );
        // Backward gesture keeps the direction.
        assert_eq!(
            buffer.native_selection(CharIndex(5), CharIndex(1), SelectionType::Line),
            (CharIndex(7), CharIndex(0))
        );
        // Last line: the end clamps to the buffer end.
        assert_eq!(
            buffer.native_selection(CharIndex(8), CharIndex(11), SelectionType::Line),
            (CharIndex(7), CharIndex(13))
        );
    }

    #[test]
    fn slice_rejects_out_of_bounds_range() {
        let buffer = Buffer::new("abc");
        assert_eq!(
            buffer
                .slice(&(CharIndex(0)..CharIndex(2)).into())
                .unwrap()
                .to_string(),
            "ab"
        );
        assert!(buffer.slice(&(CharIndex(0)..CharIndex(4)).into()).is_err());
    }
}
