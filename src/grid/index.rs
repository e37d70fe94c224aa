use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

use crate::error::{Error, Result};

/// Index component for one grid axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisIndex {
    /// A single position; must be in range
    At(usize),
    /// Half-open `[start, stop)`, clipped to the axis like a slice
    Range {
        start: Option<usize>,
        stop: Option<usize>,
    },
    /// The whole axis
    All,
}

impl AxisIndex {
    pub fn range(start: usize, stop: usize) -> Self {
        AxisIndex::Range {
            start: Some(start),
            stop: Some(stop),
        }
    }

    /// Concrete `[start, stop)` bounds on an axis of length `len`
    pub(crate) fn bounds(&self, len: usize) -> Result<(usize, usize)> {
        match *self {
            AxisIndex::At(i) if i < len => Ok((i, i + 1)),
            AxisIndex::At(i) => Err(Error::IndexOutOfBounds { index: i, size: len }),
            AxisIndex::Range { start, stop } => {
                let stop = stop.unwrap_or(len).min(len);
                Ok((start.unwrap_or(0).min(stop), stop))
            }
            AxisIndex::All => Ok((0, len)),
        }
    }
}

impl From<usize> for AxisIndex {
    fn from(i: usize) -> Self {
        AxisIndex::At(i)
    }
}

impl From<Range<usize>> for AxisIndex {
    fn from(r: Range<usize>) -> Self {
        AxisIndex::range(r.start, r.end)
    }
}

impl From<RangeTo<usize>> for AxisIndex {
    fn from(r: RangeTo<usize>) -> Self {
        AxisIndex::Range {
            start: None,
            stop: Some(r.end),
        }
    }
}

impl From<RangeFrom<usize>> for AxisIndex {
    fn from(r: RangeFrom<usize>) -> Self {
        AxisIndex::Range {
            start: Some(r.start),
            stop: None,
        }
    }
}

impl From<RangeFull> for AxisIndex {
    fn from(_: RangeFull) -> Self {
        AxisIndex::All
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_clip_like_slices() -> Result<()> {
        assert_eq!(AxisIndex::range(0, 3).bounds(4)?, (0, 3));
        assert_eq!(AxisIndex::range(2, 10).bounds(4)?, (2, 4));
        assert_eq!(AxisIndex::range(5, 9).bounds(4)?, (4, 4));
        assert_eq!(AxisIndex::from(..2).bounds(4)?, (0, 2));
        assert!(AxisIndex::At(4).bounds(4).is_err());
        Ok(())
    }
}
