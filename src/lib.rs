pub mod buffer;
pub mod char_index_range;
pub mod editor_context;
pub mod position;
pub mod selection;
pub mod text_range;

#[cfg(test)]
mod fixture;

pub use buffer::Buffer;
pub use char_index_range::CharIndexRange;
pub use editor_context::EditorContext;
pub use position::Position;
pub use selection::{
    BlockSelection, CharIndex, CharacterSelection, LineSelection, SelectionType, VimSelection,
};
pub use text_range::TextRange;
