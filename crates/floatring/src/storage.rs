use crate::invariants::{
    debug_assert_cursor_in_range, debug_assert_nonzero_capacity, debug_assert_write_fits,
};
use crate::position::{advance, ReadSpan};
use std::sync::atomic::{AtomicU32, Ordering};

// =============================================================================
// MIRRORED LAYOUT
// =============================================================================
//
// The backing allocation is three ring-widths long:
//
//   storage: [ left mirror | canonical ring | right spill ]
//              0..C          C..2C            2C..3C
//
// Cursors index the canonical ring. A bulk write of L samples at cursor p is
// copied twice, in this order:
//
// 1. canonical copy at storage[C + p .. C + p + L]. When p + L > C the tail
//    spills into the right third.
// 2. mirror copy at storage[p .. p + L]. When p + L > C the tail of this copy
//    lands on storage[C .. p + L], i.e. the start of the canonical ring, which
//    is exactly where a wrapped write belongs.
//
// Neither copy has to be split at the wrap boundary. Scalar writes only touch
// the canonical slot; the mirror is not kept in sync for them.
//
// Bulk reads do not use the mirror. A read that crosses the end of the ring is
// split in two, and both halves are sourced from the read cursor (see
// `ReadSpan::Split`). The second half can extend past the canonical ring into
// the right third, which is why reads address the whole allocation.
//
// ## Slot Access
//
// Every slot is an `AtomicU32` holding the bit pattern of an `f32`, accessed
// with Relaxed ordering. Concurrent access to the same slot is therefore never
// a data race, but nothing orders slot contents against the cursors: a reader
// racing a writer can see any mix of old and new samples. That is the same
// contract the rings advertise.
//
// =============================================================================

/// Number of ring-widths in the backing allocation.
pub const MIRROR_FACTOR: usize = 3;

/// A single sample slot.
#[repr(transparent)]
#[derive(Debug, Default)]
pub(crate) struct SampleCell(AtomicU32);

impl SampleCell {
    #[inline]
    fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    #[inline]
    fn store(&self, sample: f32) {
        self.0.store(sample.to_bits(), Ordering::Relaxed);
    }
}

/// Triple-width sample storage with a canonical middle third.
///
/// `MirroredStorage` owns the samples and knows the layout; it does not own
/// any cursor. Each operation takes the cursor it works from and returns the
/// cursor's next value, leaving the variants free to keep their cursors in
/// atomics or behind a lock.
#[derive(Debug)]
pub(crate) struct MirroredStorage {
    capacity: usize,
    /// Uses `Box<[_]>` because the allocation is fixed at construction.
    cells: Box<[SampleCell]>,
}

impl MirroredStorage {
    /// Allocates zeroed storage for a ring of `capacity` samples.
    pub(crate) fn new(capacity: usize) -> Self {
        debug_assert_nonzero_capacity!(capacity);

        let mut cells = Vec::with_capacity(capacity * MIRROR_FACTOR);
        cells.resize_with(capacity * MIRROR_FACTOR, SampleCell::default);

        Self {
            capacity,
            cells: cells.into_boxed_slice(),
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Length of the backing allocation, in samples.
    #[inline]
    pub(crate) fn backing_len(&self) -> usize {
        self.cells.len()
    }

    /// The addressable ring, `storage[C .. 2C]`.
    #[inline]
    fn canonical(&self) -> &[SampleCell] {
        &self.cells[self.capacity..2 * self.capacity]
    }

    // ---------------------------------------------------------------------
    // WRITE PATH
    // ---------------------------------------------------------------------

    /// Stores one sample at canonical slot `pos`. Returns the next write cursor.
    #[inline]
    pub(crate) fn store(&self, pos: usize, sample: f32) -> usize {
        debug_assert_cursor_in_range!("write_pos", pos, self.capacity);

        self.canonical()[pos].store(sample);
        advance(pos, 1, self.capacity)
    }

    /// Stores `samples` at canonical slot `pos` and at its mirror one
    /// ring-width to the left. Returns the next write cursor.
    ///
    /// # Panics
    ///
    /// Panics if `pos + samples.len()` exceeds twice the capacity: the
    /// canonical copy would run past the backing allocation.
    #[inline]
    pub(crate) fn store_slice(&self, pos: usize, samples: &[f32]) -> usize {
        debug_assert_cursor_in_range!("write_pos", pos, self.capacity);
        debug_assert_write_fits!(pos, samples.len(), self.capacity);

        let len = samples.len();
        let canonical = self.capacity + pos;
        let mirror = pos;

        copy_in(&self.cells[canonical..canonical + len], samples);
        copy_in(&self.cells[mirror..mirror + len], samples);

        advance(pos, len, self.capacity)
    }

    // ---------------------------------------------------------------------
    // READ PATH
    // ---------------------------------------------------------------------

    /// Loads the sample at canonical slot `pos`, with the next read cursor.
    #[inline]
    pub(crate) fn load(&self, pos: usize) -> (f32, usize) {
        debug_assert_cursor_in_range!("read_pos", pos, self.capacity);

        (self.canonical()[pos].load(), advance(pos, 1, self.capacity))
    }

    /// Copies `out.len()` samples starting at canonical slot `pos` into `out`.
    /// Returns the next read cursor.
    ///
    /// When `out` is at least one ring long, the whole canonical region is
    /// copied from offset 0 into `out[..capacity]` and the cursor restarts at
    /// 0; the rest of `out` is left as it was.
    #[inline]
    pub(crate) fn load_into(&self, pos: usize, out: &mut [f32]) -> usize {
        debug_assert_cursor_in_range!("read_pos", pos, self.capacity);

        let span = ReadSpan::plan(pos, out.len(), self.capacity);
        let start = self.capacity + pos;

        match span {
            ReadSpan::Whole => {
                copy_out(&mut out[..self.capacity], self.canonical());
            }
            ReadSpan::Contiguous { .. } => {
                let count = out.len();
                copy_out(out, &self.cells[start..start + count]);
            }
            ReadSpan::Split { till_end, new_pos } => {
                let (head, tail) = out.split_at_mut(till_end);
                copy_out(head, &self.cells[start..start + till_end]);
                // Second segment restarts at `pos`, not at the ring origin, and
                // may run on into the spill third.
                copy_out(&mut tail[..new_pos], &self.cells[start..start + new_pos]);
            }
        }

        span.next_pos()
    }

    // ---------------------------------------------------------------------
    // LIFECYCLE
    // ---------------------------------------------------------------------

    /// Zero-fills the canonical region. Mirror and spill thirds are untouched.
    pub(crate) fn clear(&self) {
        for cell in self.canonical() {
            cell.store(0.0);
        }
    }
}

#[inline]
fn copy_in(dst: &[SampleCell], src: &[f32]) {
    for (cell, &sample) in dst.iter().zip(src) {
        cell.store(sample);
    }
}

#[inline]
fn copy_out(dst: &mut [f32], src: &[SampleCell]) {
    for (sample, cell) in dst.iter_mut().zip(src) {
        *sample = cell.load();
    }
}
