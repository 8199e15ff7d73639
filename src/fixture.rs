//! Marker-text test harness: builds a [`Buffer`] from a string with embedded
//! `<caret>` and `<selection>`/`</selection>` markers, in the style of
//! IntelliJ fixture files.

use itertools::Itertools;

use crate::{
    buffer::Buffer, char_index_range::CharIndexRange, selection::CharIndex, text_range::TextRange,
};

pub(crate) struct TestFixture {
    pub(crate) buffer: Buffer,
    pub(crate) carets: Vec<CharIndex>,
    pub(crate) selection: Option<CharIndexRange>,
}

const CARET: &str = "<caret>";
const SELECTION_START: &str = "<selection>";
const SELECTION_END: &str = "</selection>";

impl TestFixture {
    pub(crate) fn configure_by_text(marked: &str) -> Self {
        let mut clean = String::new();
        let mut carets = Vec::new();
        let mut selection_start = None;
        let mut selection = None;
        let mut rest = marked;
        loop {
            let next_marker = [CARET, SELECTION_START, SELECTION_END]
                .into_iter()
                .filter_map(|marker| rest.find(marker).map(|index| (index, marker)))
                .min();
            let Some((index, marker)) = next_marker else {
                clean.push_str(rest);
                break;
            };
            clean.push_str(&rest[..index]);
            let offset = CharIndex(clean.chars().count());
            match marker {
                CARET => carets.push(offset),
                SELECTION_START => selection_start = Some(offset),
                _ => {
                    let start = selection_start.take().unwrap_or(offset);
                    selection = Some((start..offset).into())
                }
            }
            rest = &rest[index + marker.len()..];
        }
        Self {
            buffer: Buffer::new(&clean),
            carets,
            selection,
        }
    }

    /// The first caret, or the buffer start when the text carries none.
    pub(crate) fn caret(&self) -> CharIndex {
        self.carets.first().copied().unwrap_or_default()
    }

    /// The first two carets as a `(vim_start, vim_end)` gesture pair. A text
    /// with a single caret yields a zero-width gesture.
    pub(crate) fn caret_pair(&self) -> (CharIndex, CharIndex) {
        (
            self.caret(),
            self.carets.get(1).copied().unwrap_or_else(|| self.caret()),
        )
    }

    /// The text covered by `range`, with block spans joined by newlines.
    pub(crate) fn text_of(&self, range: &TextRange) -> String {
        range
            .spans()
            .iter()
            .filter_map(|span| self.buffer.slice(span).ok())
            .map(|rope| rope.to_string())
            .join("\n")
    }
}

#[cfg(test)]
mod test_fixture {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn strips_markers_and_records_offsets() {
        let fixture = TestFixture::configure_by_text("ab<caret>c <selection>def</selection>g");
        assert_eq!(fixture.buffer.rope().to_string(), "abc defg");
        assert_eq!(fixture.caret(), CharIndex(2));
        assert_eq!(
            fixture.selection,
            Some((CharIndex(4)..CharIndex(7)).into())
        );
    }

    #[test]
    fn text_without_markers_is_untouched() {
        let fixture = TestFixture::configure_by_text("plain text\n");
        assert_eq!(fixture.buffer.rope().to_string(), "plain text\n");
        assert_eq!(fixture.caret(), CharIndex(0));
        assert_eq!(fixture.carets, vec![]);
        assert_eq!(fixture.selection, None);
    }

    #[test]
    fn caret_pair_spans_two_carets() {
        let fixture = TestFixture::configure_by_text("a<caret>bc<caret>d");
        assert_eq!(fixture.caret_pair(), (CharIndex(1), CharIndex(3)));
    }
}
