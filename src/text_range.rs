use itertools::Itertools;

use crate::{char_index_range::CharIndexRange, selection::CharIndex};

/// A materialized selection range: a single contiguous span for character-wise
/// and line-wise selections, or one span per line for block selections.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextRange {
    spans: Vec<CharIndexRange>,
}

impl TextRange {
    pub fn new(start: CharIndex, end: CharIndex) -> Self {
        Self {
            spans: vec![(start..end).into()],
        }
    }

    /// Builds a multi-span range from parallel per-line starts and ends.
    ///
    /// Both sequences must have the same length.
    pub fn from_spans(starts: Vec<CharIndex>, ends: Vec<CharIndex>) -> Self {
        debug_assert_eq!(starts.len(), ends.len());
        Self {
            spans: starts
                .into_iter()
                .zip(ends)
                .map(|(start, end)| (start..end).into())
                .collect(),
        }
    }

    /// Clamps every span into `[0, buffer_len]` and reorders reversed spans so
    /// that `start <= end` holds per span.
    ///
    /// Block geometry can produce spans that extend past a short line or past
    /// the end of the buffer, so this is called once after block-range
    /// assembly.
    pub fn normalize(self, buffer_len: usize) -> Self {
        let max = CharIndex(buffer_len);
        Self {
            spans: self
                .spans
                .into_iter()
                .map(|span| span.normalized().clamp(max))
                .collect(),
        }
    }

    pub fn spans(&self) -> &[CharIndexRange] {
        &self.spans
    }

    pub fn is_multiple(&self) -> bool {
        self.spans.len() > 1
    }

    /// The lowest start across all spans.
    pub fn start(&self) -> CharIndex {
        self.spans
            .iter()
            .map(|span| span.start)
            .min()
            .unwrap_or_default()
    }

    /// The highest end across all spans.
    pub fn end(&self) -> CharIndex {
        self.spans
            .iter()
            .map(|span| span.end)
            .max()
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.spans.iter().map(|span| span.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Display for TextRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.spans
                .iter()
                .map(|span| format!("{}..{}", span.start.0, span.end.0))
                .join(", ")
        )
    }
}
