//! Debug assertion macros for ring buffer invariants.
//!
//! Only active in debug builds (`debug_assert!`), so release builds keep the
//! unchecked arithmetic the rings are specified with.
//!
//! Used by `MirroredStorage` and every ring variant.

// =============================================================================
// Capacity
// =============================================================================

/// Assert that a ring is built with at least one slot.
///
/// **Invariant**: `capacity > 0` (every cursor update is taken modulo capacity)
///
/// Used in: `MirroredStorage::new()`
macro_rules! debug_assert_nonzero_capacity {
    ($capacity:expr) => {
        debug_assert!(
            $capacity > 0,
            "ring capacity must be non-zero (modulo by zero on first cursor update)"
        )
    };
}

// =============================================================================
// Cursor range
// =============================================================================

/// Assert that a cursor indexes into the canonical region.
///
/// **Invariant**: `0 ≤ pos < capacity`
///
/// Used in: `MirroredStorage::store()`, `load()`, `store_slice()`, `load_into()`
macro_rules! debug_assert_cursor_in_range {
    ($name:literal, $pos:expr, $capacity:expr) => {
        debug_assert!(
            $pos < $capacity,
            "{} {} outside canonical region of capacity {}",
            $name,
            $pos,
            $capacity
        )
    };
}

// =============================================================================
// Bulk write extent
// =============================================================================

/// Assert that a bulk write ends inside the backing allocation.
///
/// **Invariant**: `pos + len ≤ 2 * capacity`
///
/// The canonical copy starts one ring-width into the 3×capacity allocation,
/// so anything past this bound has nowhere to land.
///
/// Used in: `MirroredStorage::store_slice()`
macro_rules! debug_assert_write_fits {
    ($pos:expr, $len:expr, $capacity:expr) => {
        debug_assert!(
            $pos + $len <= 2 * $capacity,
            "bulk write of {} samples at {} runs past the backing allocation (capacity {})",
            $len,
            $pos,
            $capacity
        )
    };
}

pub(crate) use debug_assert_cursor_in_range;
pub(crate) use debug_assert_nonzero_capacity;
pub(crate) use debug_assert_write_fits;
