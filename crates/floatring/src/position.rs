//! Cursor arithmetic shared by every ring variant.
//!
//! Cursors live in `[0, capacity)` and only ever move forward by addition
//! modulo capacity. Where a cursor is stored (atomic, mutex-owned) is up to
//! the variant; how it moves is decided here.

/// Advances `pos` by `n` slots, wrapping at `capacity`.
#[inline]
pub(crate) const fn advance(pos: usize, n: usize, capacity: usize) -> usize {
    (pos + n) % capacity
}

/// How a bulk read of `count` samples maps onto the canonical region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReadSpan {
    /// `count >= capacity`: copy the whole canonical region from offset 0.
    /// The read cursor restarts at 0.
    Whole,
    /// The read stays inside `[read_pos, capacity)`.
    Contiguous { new_pos: usize },
    /// The read crosses the end of the canonical region.
    ///
    /// `till_end` samples are copied from `read_pos`, then `new_pos` more,
    /// sourced from `read_pos` again rather than from offset 0.
    Split { till_end: usize, new_pos: usize },
}

impl ReadSpan {
    /// Plans a bulk read of `count` samples starting at `read_pos`.
    #[inline]
    pub(crate) fn plan(read_pos: usize, count: usize, capacity: usize) -> Self {
        if count >= capacity {
            return Self::Whole;
        }

        let new_pos = advance(read_pos, count, capacity);
        if new_pos < read_pos {
            Self::Split {
                till_end: capacity - read_pos,
                new_pos,
            }
        } else {
            Self::Contiguous { new_pos }
        }
    }

    /// Read cursor value once the span has been copied out.
    #[inline]
    pub(crate) const fn next_pos(self) -> usize {
        match self {
            Self::Whole => 0,
            Self::Contiguous { new_pos } | Self::Split { new_pos, .. } => new_pos,
        }
    }
}
