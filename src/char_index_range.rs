use std::ops::Range;

use crate::selection::CharIndex;

/// An end-exclusive span over the buffer's char offset space.
///
/// The bounds are not required to be ordered; block selections produce
/// reversed spans when the gesture ran right-to-left. `normalized` restores
/// `start <= end`.
#[derive(PartialEq, Clone, Debug, Eq, Hash, Default, Copy)]
pub struct CharIndexRange {
    pub start: CharIndex,
    pub end: CharIndex,
}

impl CharIndexRange {
    pub fn len(&self) -> usize {
        self.end.0.saturating_sub(self.start.0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> CharIndexRangeIter {
        CharIndexRangeIter {
            range: *self,
            current: self.start,
        }
    }

    /// Swaps the bounds if they are reversed.
    pub fn normalized(self) -> Self {
        Self {
            start: self.start.min(self.end),
            end: self.end.max(self.start),
        }
    }

    /// Caps both bounds at `max`.
    pub fn clamp(self, max: CharIndex) -> Self {
        Self {
            start: self.start.min(max),
            end: self.end.min(max),
        }
    }
}

pub struct CharIndexRangeIter {
    range: CharIndexRange,
    current: CharIndex,
}

impl Iterator for CharIndexRangeIter {
    type Item = CharIndex;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current < self.range.end {
            let result = self.current;
            self.current = self.current + 1;
            Some(result)
        } else {
            None
        }
    }
}

impl From<Range<CharIndex>> for CharIndexRange {
    fn from(value: Range<CharIndex>) -> Self {
        Self {
            start: value.start,
            end: value.end,
        }
    }
}

impl From<CharIndexRange> for Range<CharIndex> {
    fn from(val: CharIndexRange) -> Self {
        val.start..val.end
    }
}

#[cfg(test)]
mod test_char_index_range {
    use super::*;

    #[test]
    fn iter() {
        let range: CharIndexRange = (CharIndex(2)..CharIndex(5)).into();
        assert_eq!(
            range.iter().collect::<Vec<_>>(),
            vec![CharIndex(2), CharIndex(3), CharIndex(4)]
        );
    }

    #[test]
    fn len_of_reversed_range_is_zero() {
        let range: CharIndexRange = (CharIndex(5)..CharIndex(2)).into();
        assert_eq!(range.len(), 0);
        assert_eq!(range.normalized().len(), 3);
    }

    #[test]
    fn clamp_caps_both_bounds() {
        let range: CharIndexRange = (CharIndex(3)..CharIndex(10)).into();
        assert_eq!(
            range.clamp(CharIndex(7)),
            (CharIndex(3)..CharIndex(7)).into()
        );
    }
}
