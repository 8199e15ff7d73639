use crate::{
    position::Position,
    selection::{CharIndex, SelectionType},
};

/// Read-only view of the host editor for a single buffer snapshot.
///
/// Selections never store a handle to their editor; every operation that
/// needs geometry takes an `&dyn EditorContext` instead. The crate ships a
/// [`crate::buffer::Buffer`] implementation backed by `ropey`, and a host can
/// substitute its own.
///
/// All position queries clamp out-of-range inputs rather than failing;
/// callers are expected to pass offsets that were valid for the snapshot.
pub trait EditorContext {
    fn len_chars(&self) -> usize;

    /// Logical position of `char_index`, clamped into the buffer.
    fn char_to_position(&self, char_index: CharIndex) -> Position;

    /// Offset of `position`, with the column clamped to the line terminator
    /// and the line clamped to the last line.
    fn position_to_char(&self, position: Position) -> CharIndex;

    /// Offset of the terminator of `line` (or the buffer end on the last
    /// line). With `allow_end = false`, one position before that, never below
    /// the line start.
    fn line_end(&self, line: usize, allow_end: bool) -> CharIndex;

    fn char_at(&self, char_index: CharIndex) -> Option<char>;

    /// Mode-specific conversion from the directional anchor pair to native
    /// selection bounds.
    ///
    /// Contract: deterministic and direction-preserving. The returned pair
    /// keeps the gesture order of the inputs; the inclusive-cursor adjustment
    /// (if the mode has one) extends whichever bound is geometrically later.
    /// Normalization into ordered bounds is the selection's job, not the
    /// host's.
    fn native_selection(
        &self,
        vim_start: CharIndex,
        vim_end: CharIndex,
        selection_type: SelectionType,
    ) -> (CharIndex, CharIndex);
}
