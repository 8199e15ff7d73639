use std::ops::{Add, Sub};

use crate::{
    char_index_range::CharIndexRange, editor_context::EditorContext, position::Position,
    text_range::TextRange,
};

/// A character index into the buffer's linear offset space.
#[derive(PartialEq, Clone, Debug, Copy, PartialOrd, Eq, Ord, Hash, Default)]
pub struct CharIndex(pub usize);

impl CharIndex {
    pub fn to_position(self, editor: &dyn EditorContext) -> Position {
        editor.char_to_position(self)
    }
}

impl Add<usize> for CharIndex {
    type Output = CharIndex;

    fn add(self, rhs: usize) -> Self::Output {
        Self(self.0.saturating_add(rhs))
    }
}

impl Sub<usize> for CharIndex {
    type Output = CharIndex;

    fn sub(self, rhs: usize) -> Self::Output {
        Self(self.0.saturating_sub(rhs))
    }
}

/// The three visual submodes; the set is closed.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum SelectionType {
    Character,
    Line,
    Block,
}

impl SelectionType {
    pub fn display(&self) -> &'static str {
        match self {
            SelectionType::Character => "CHARACTER-WISE",
            SelectionType::Line => "LINE-WISE",
            SelectionType::Block => "BLOCK-WISE",
        }
    }
}

/// A visual selection, constructed once per selection-defining event and
/// immutable afterwards.
///
/// `vim_start`/`vim_end` keep the gesture direction (`vim_start > vim_end`
/// after a backward gesture) because the pair later becomes the `'<`/`'>`
/// marks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VimSelection {
    Character(CharacterSelection),
    Line(LineSelection),
    Block(BlockSelection),
}

impl VimSelection {
    /// Block selections created through here do not extend to line ends; use
    /// [`BlockSelection::new`] for `$`-style blocks.
    pub fn create(
        vim_start: CharIndex,
        vim_end: CharIndex,
        selection_type: SelectionType,
        editor: &dyn EditorContext,
    ) -> Self {
        log::trace!(
            "create {} selection {}..{}",
            selection_type.display(),
            vim_start.0,
            vim_end.0
        );
        match selection_type {
            SelectionType::Character => {
                VimSelection::Character(CharacterSelection::new(vim_start, vim_end, editor))
            }
            SelectionType::Line => VimSelection::Line(LineSelection::new(vim_start, vim_end, editor)),
            SelectionType::Block => {
                VimSelection::Block(BlockSelection::new(vim_start, vim_end, false, editor))
            }
        }
    }

    pub fn selection_type(&self) -> SelectionType {
        match self {
            VimSelection::Character(_) => SelectionType::Character,
            VimSelection::Line(_) => SelectionType::Line,
            VimSelection::Block(_) => SelectionType::Block,
        }
    }

    pub fn vim_start(&self) -> CharIndex {
        match self {
            VimSelection::Character(selection) => selection.vim_start,
            VimSelection::Line(selection) => selection.vim_start,
            VimSelection::Block(selection) => selection.vim_start,
        }
    }

    pub fn vim_end(&self) -> CharIndex {
        match self {
            VimSelection::Character(selection) => selection.vim_end,
            VimSelection::Line(selection) => selection.vim_end,
            VimSelection::Block(selection) => selection.vim_end,
        }
    }

    pub fn norm_native_start(&self) -> CharIndex {
        match self {
            VimSelection::Character(selection) => selection.norm_native_start(),
            VimSelection::Line(selection) => selection.norm_native_start(),
            VimSelection::Block(selection) => selection.norm_native_start(),
        }
    }

    pub fn norm_native_end(&self) -> CharIndex {
        match self {
            VimSelection::Character(selection) => selection.norm_native_end(),
            VimSelection::Line(selection) => selection.norm_native_end(),
            VimSelection::Block(selection) => selection.norm_native_end(),
        }
    }

    /// Every span of the result is ordered `start <= end`, regardless of
    /// gesture direction. `skip_newline_for_line_mode` only affects line-wise
    /// selections.
    pub fn to_vim_text_range(
        &self,
        editor: &dyn EditorContext,
        skip_newline_for_line_mode: bool,
    ) -> TextRange {
        match self {
            VimSelection::Character(selection) => selection.to_vim_text_range(),
            VimSelection::Line(selection) => {
                selection.to_vim_text_range(editor, skip_newline_for_line_mode)
            }
            VimSelection::Block(selection) => selection.to_vim_text_range(editor),
        }
    }
}

/// A free-form span between two offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharacterSelection {
    vim_start: CharIndex,
    vim_end: CharIndex,
    native_start: CharIndex,
    native_end: CharIndex,
}

impl CharacterSelection {
    pub fn new(vim_start: CharIndex, vim_end: CharIndex, editor: &dyn EditorContext) -> Self {
        let (native_start, native_end) =
            editor.native_selection(vim_start, vim_end, SelectionType::Character);
        Self {
            vim_start,
            vim_end,
            native_start,
            native_end,
        }
    }

    pub fn norm_native_start(&self) -> CharIndex {
        self.native_start.min(self.native_end)
    }

    pub fn norm_native_end(&self) -> CharIndex {
        self.native_start.max(self.native_end)
    }

    /// No end-of-line handling: just the normalized span.
    pub fn to_vim_text_range(&self) -> TextRange {
        TextRange::new(self.norm_native_start(), self.norm_native_end())
    }
}

/// A whole-line selection anchored at arbitrary offsets within its first and
/// last lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineSelection {
    vim_start: CharIndex,
    vim_end: CharIndex,
    native_start: CharIndex,
    native_end: CharIndex,
}

impl LineSelection {
    pub fn new(vim_start: CharIndex, vim_end: CharIndex, editor: &dyn EditorContext) -> Self {
        let (native_start, native_end) =
            editor.native_selection(vim_start, vim_end, SelectionType::Line);
        Self {
            vim_start,
            vim_end,
            native_start,
            native_end,
        }
    }

    pub fn norm_native_start(&self) -> CharIndex {
        self.native_start.min(self.native_end)
    }

    pub fn norm_native_end(&self) -> CharIndex {
        self.native_start.max(self.native_end)
    }

    /// With `skip_newline_for_line_mode`, an end sitting just past a line
    /// terminator shrinks by one.
    pub fn to_vim_text_range(
        &self,
        editor: &dyn EditorContext,
        skip_newline_for_line_mode: bool,
    ) -> TextRange {
        let start = self.norm_native_start();
        let end = self.norm_native_end();
        let end = if skip_newline_for_line_mode
            && end.0 > 0
            && editor.char_at(end - 1) == Some('\n')
        {
            end - 1
        } else {
            end
        };
        TextRange::new(start, end)
    }

    /// Per-line spans, holding the original start/end columns fixed on every
    /// line. Visited in gesture order; spans are not normalized.
    pub fn lines<'a>(
        &'a self,
        editor: &'a dyn EditorContext,
    ) -> Box<dyn Iterator<Item = CharIndexRange> + 'a> {
        let (start_position, end_position) =
            to_logical_pair(self.native_start, self.native_end, editor);
        Box::new(
            line_range(start_position.line, end_position.line).map(move |line| {
                let start = Position::new(line, start_position.column).to_char_index(editor);
                let end = Position::new(line, end_position.column).to_char_index(editor);
                (start..end).into()
            }),
        )
    }

    pub fn for_each_line(
        &self,
        editor: &dyn EditorContext,
        mut action: impl FnMut(CharIndex, CharIndex),
    ) {
        for span in self.lines(editor) {
            action(span.start, span.end)
        }
    }
}

/// A rectangular selection spanning multiple lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockSelection {
    vim_start: CharIndex,
    vim_end: CharIndex,
    native_start: CharIndex,
    native_end: CharIndex,
    /// Extend to each line's true end (`$` in block-visual mode).
    to_line_end: bool,
}

impl BlockSelection {
    pub fn new(
        vim_start: CharIndex,
        vim_end: CharIndex,
        to_line_end: bool,
        editor: &dyn EditorContext,
    ) -> Self {
        let (native_start, native_end) =
            editor.native_selection(vim_start, vim_end, SelectionType::Block);
        Self {
            vim_start,
            vim_end,
            native_start,
            native_end,
            to_line_end,
        }
    }

    pub fn to_line_end(&self) -> bool {
        self.to_line_end
    }

    pub fn norm_native_start(&self) -> CharIndex {
        self.native_start.min(self.native_end)
    }

    pub fn norm_native_end(&self) -> CharIndex {
        self.native_start.max(self.native_end)
    }

    /// Per-line spans of the rectangle: the fixed start column to the fixed
    /// end column, or to the line's true end when `to_line_end` is set.
    /// Visited in gesture order; spans are not normalized.
    pub fn lines<'a>(
        &'a self,
        editor: &'a dyn EditorContext,
    ) -> Box<dyn Iterator<Item = CharIndexRange> + 'a> {
        let (start_position, end_position) =
            to_logical_pair(self.native_start, self.native_end, editor);
        let to_line_end = self.to_line_end;
        Box::new(
            line_range(start_position.line, end_position.line).map(move |line| {
                let start = Position::new(line, start_position.column).to_char_index(editor);
                let end = if to_line_end {
                    editor.line_end(line, true)
                } else {
                    Position::new(line, end_position.column).to_char_index(editor)
                };
                (start..end).into()
            }),
        )
    }

    pub fn for_each_line(
        &self,
        editor: &dyn EditorContext,
        mut action: impl FnMut(CharIndex, CharIndex),
    ) {
        for span in self.lines(editor) {
            action(span.start, span.end)
        }
    }

    /// Collects the per-line spans into a multi-span [`TextRange`], normalized
    /// against the buffer length.
    pub fn to_vim_text_range(&self, editor: &dyn EditorContext) -> TextRange {
        let (starts, ends): (Vec<_>, Vec<_>) = self
            .lines(editor)
            .map(|span| (span.start, span.end))
            .unzip();
        TextRange::from_spans(starts, ends).normalize(editor.len_chars())
    }
}

/// Inclusive line range between two logical lines, descending when the
/// gesture ran upward.
fn line_range(start: usize, end: usize) -> Box<dyn Iterator<Item = usize>> {
    if start > end {
        Box::new((end..=start).rev())
    } else {
        Box::new(start..=end)
    }
}

fn to_logical_pair(
    native_start: CharIndex,
    native_end: CharIndex,
    editor: &dyn EditorContext,
) -> (Position, Position) {
    (
        to_logical(native_start, native_end, editor),
        to_logical(native_end, native_start, editor),
    )
}

/// The geometrically later bound is exclusive; map it through its last
/// covered character so a bound just past a line terminator stays on its own
/// line.
fn to_logical(bound: CharIndex, other: CharIndex, editor: &dyn EditorContext) -> Position {
    if bound > other && bound.0 > 0 {
        let last = (bound - 1).to_position(editor);
        Position::new(last.line, last.column + 1)
    } else {
        bound.to_position(editor)
    }
}
