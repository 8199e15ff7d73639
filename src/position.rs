use crate::{editor_context::EditorContext, selection::CharIndex};

#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Default, Ord)]
pub struct Position {
    /// 0-based
    pub line: usize,
    /// 0-based
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub fn to_char_index(self, editor: &dyn EditorContext) -> CharIndex {
        editor.position_to_char(self)
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        if self.line < other.line {
            Some(std::cmp::Ordering::Less)
        } else if self.line > other.line {
            Some(std::cmp::Ordering::Greater)
        } else {
            self.column.partial_cmp(&other.column)
        }
    }
}
