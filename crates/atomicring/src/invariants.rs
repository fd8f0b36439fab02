//! Debug assertion macros for ring buffer invariants.
//!
//! Only active in debug builds (`debug_assert!`), so release builds pay
//! nothing. The single-producer/single-consumer rule itself is not checked
//! here; `split` hands out exactly one `Producer` and one `Consumer`.

// =============================================================================
// Index bounds: 0 <= start, end < capacity + 1
// =============================================================================

/// Assert that a slot index stays inside the storage.
///
/// Used in: `publish_end()` and `publish_start()` before the release store
macro_rules! debug_assert_index_in_bounds {
    ($name:literal, $index:expr, $slots:expr) => {
        debug_assert!(
            $index < $slots,
            "index bound violated: {} = {} outside [0, {})",
            $name,
            $index,
            $slots
        )
    };
}

// =============================================================================
// Bounded size: (end - start) mod slots <= capacity
// =============================================================================

/// Assert that the number of live elements never exceeds capacity.
///
/// Used in: `push_back_unchecked()` after a successful publish
macro_rules! debug_assert_bounded_size {
    ($size:expr, $capacity:expr) => {
        debug_assert!(
            $size <= $capacity,
            "bounded size violated: size {} exceeds capacity {}",
            $size,
            $capacity
        )
    };
}

// =============================================================================
// Live range: only slots in [start, end) are initialized
// =============================================================================

/// Assert that a read targets a live (initialized) slot.
///
/// Used in: `pop_front_unchecked()` and `peek_front_unchecked()`
macro_rules! debug_assert_live_slot {
    ($start:expr, $end:expr) => {
        debug_assert!(
            $start != $end,
            "live range violated: reading slot {} of an empty buffer",
            $start
        )
    };
}

pub(crate) use debug_assert_bounded_size;
pub(crate) use debug_assert_index_in_bounds;
pub(crate) use debug_assert_live_slot;
