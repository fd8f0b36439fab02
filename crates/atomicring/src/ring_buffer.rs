use crate::invariants::{
    debug_assert_bounded_size, debug_assert_index_in_bounds, debug_assert_live_slot,
};
use crate::{Config, Metrics, MetricsSnapshot, RingError};
use crossbeam_utils::CachePadded;
use std::cell::UnsafeCell;
use std::fmt;
use std::mem::MaybeUninit;
use std::ptr;
use std::sync::atomic::{AtomicUsize, Ordering};

// =============================================================================
// INDEX PROTOCOL & MEMORY ORDERING
// =============================================================================
//
// Storage has `capacity + 1` slots and two wrapped indices in [0, capacity]:
//
// - `start`: oldest unread slot. Written only by the consumer.
// - `end`:   next free slot.     Written only by the producer.
//
// empty  <=> start == end
// full   <=> advance(end) == start
// size    =  (end - start) mod (capacity + 1)
//
// One slot is always left unused so these two conditions never coincide;
// no shared counter is needed.
//
// **Producer (push_back):**
// 1. Load `end` with Relaxed (only the producer writes it)
// 2. Load `start` with Acquire (pairs with the consumer's Release store,
//    so the slot being reused has been fully moved out)
// 3. Write the value into `slots[end]`
// 4. Store `advance(end)` into `end` with Release (publishes the write)
//
// **Consumer (pop_front / peek_front):**
// 1. Load `start` with Relaxed (only the consumer writes it)
// 2. Load `end` with Acquire (pairs with the producer's Release store,
//    so `slots[start]` is fully written)
// 3. Move (pop) or clone (peek) the value out of `slots[start]`
// 4. pop only: store `advance(start)` into `start` with Release
//
// A slot in [start, end) is initialized and belongs to the consumer; every
// other slot is uninitialized and belongs to the producer.
//
// =============================================================================

/// Fixed-capacity lock-free SPSC ring buffer.
///
/// Holds at most [`capacity`](Self::capacity) values. `push_back` returns
/// [`RingError::Full`] and `pop_front`/`peek_front` return
/// [`RingError::Empty`] instead of blocking.
///
/// The mutating operations take `&mut self` here, so a buffer owned by one
/// thread needs no further ceremony. To hand the two ends to different
/// threads, [`split`](Self::split) it into a [`Producer`](crate::Producer)
/// and a [`Consumer`](crate::Consumer).
///
/// A capacity of 0 is allowed. Such a buffer is always empty and rejects
/// every push with `Full`.
pub struct RingBuffer<T> {
    /// Next free slot (written by producer, read by consumer)
    end: CachePadded<AtomicUsize>,
    /// Oldest unread slot (written by consumer, read by producer)
    start: CachePadded<AtomicUsize>,
    /// `capacity + 1` slots, allocated once
    slots: Box<[UnsafeCell<MaybeUninit<T>>]>,
    metrics: Metrics,
    config: Config,
}

// Safety: values of T move from the producer thread to the consumer thread,
// so T: Send is required. Slot access is partitioned by the index protocol
// above, and no `&T` is ever handed to more than one thread.
unsafe impl<T: Send> Send for RingBuffer<T> {}
unsafe impl<T: Send> Sync for RingBuffer<T> {}

impl<T> RingBuffer<T> {
    /// Creates a buffer that holds up to `capacity` values.
    pub fn new(capacity: usize) -> Self {
        Self::with_config(Config::default().with_capacity(capacity))
    }

    /// Creates a buffer from a [`Config`].
    pub fn with_config(config: Config) -> Self {
        let slots = (0..config.slots())
            .map(|_| UnsafeCell::new(MaybeUninit::uninit()))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Self {
            end: CachePadded::new(AtomicUsize::new(0)),
            start: CachePadded::new(AtomicUsize::new(0)),
            slots,
            metrics: Metrics::new(),
            config,
        }
    }

    // ---------------------------------------------------------------------
    // QUERIES
    // ---------------------------------------------------------------------

    /// Returns the usable capacity, as passed to the constructor.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len() - 1
    }

    /// Returns the number of live values.
    ///
    /// Under concurrent push/pop this is a snapshot; it always lies in
    /// `[0, capacity]`.
    #[inline]
    pub fn size(&self) -> usize {
        let start = self.start.load(Ordering::Acquire);
        let end = self.end.load(Ordering::Acquire);
        self.distance(start, end)
    }

    /// Returns true if the buffer holds no value.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start.load(Ordering::Acquire) == self.end.load(Ordering::Acquire)
    }

    /// Returns true if the next `push_back` would be rejected.
    #[inline]
    pub fn is_full(&self) -> bool {
        let end = self.end.load(Ordering::Acquire);
        self.advance(end) == self.start.load(Ordering::Acquire)
    }

    /// Raw `start` index, for tests and diagnostics.
    ///
    /// Meaningless as soon as the consumer moves on.
    #[inline]
    pub fn start_index(&self) -> usize {
        self.start.load(Ordering::Relaxed)
    }

    /// Get a snapshot of metrics if enabled.
    pub fn metrics(&self) -> MetricsSnapshot {
        if self.config.enable_metrics {
            self.metrics.snapshot()
        } else {
            MetricsSnapshot::default()
        }
    }

    /// Next index, wrapping from `capacity` back to 0.
    #[inline]
    fn advance(&self, index: usize) -> usize {
        let next = index + 1;
        if next == self.slots.len() {
            0
        } else {
            next
        }
    }

    /// `(end - start) mod slots` without a division.
    #[inline]
    fn distance(&self, start: usize, end: usize) -> usize {
        if end >= start {
            end - start
        } else {
            end + self.slots.len() - start
        }
    }

    // ---------------------------------------------------------------------
    // EXCLUSIVE API
    // ---------------------------------------------------------------------

    /// Appends a value at the back.
    ///
    /// Returns `Err(RingError::Full)` and drops `value` when no slot is free.
    #[inline]
    pub fn push_back(&mut self, value: T) -> Result<(), RingError> {
        // SAFETY: `&mut self` rules out any other producer or consumer.
        unsafe { self.push_back_unchecked(value) }
    }

    /// Removes and returns the oldest value.
    #[inline]
    pub fn pop_front(&mut self) -> Result<T, RingError> {
        // SAFETY: `&mut self` rules out any other producer or consumer.
        unsafe { self.pop_front_unchecked() }
    }

    /// Returns a clone of the oldest value without removing it.
    #[inline]
    pub fn peek_front(&mut self) -> Result<T, RingError>
    where
        T: Clone,
    {
        // SAFETY: `&mut self` rules out any other producer or consumer.
        unsafe { self.peek_front_unchecked() }
    }

    // ---------------------------------------------------------------------
    // SHARED PROTOCOL (used by the exclusive API and by Producer/Consumer)
    // ---------------------------------------------------------------------

    /// Producer side of the protocol.
    ///
    /// # Safety
    ///
    /// No other thread may run `push_back_unchecked` at the same time.
    pub(crate) unsafe fn push_back_unchecked(&self, value: T) -> Result<(), RingError> {
        let end = self.end.load(Ordering::Relaxed);
        let new_end = self.advance(end);

        if new_end == self.start.load(Ordering::Acquire) {
            if self.config.enable_metrics {
                self.metrics.record_full();
            }
            return Err(RingError::Full);
        }

        // SAFETY: `end` is outside [start, end), so the slot is uninitialized
        // and the consumer will not touch it until `end` is published below.
        // Only the producer writes here.
        unsafe {
            (*self.slots[end].get()).write(value);
        }

        debug_assert_index_in_bounds!("end", new_end, self.slots.len());
        self.end.store(new_end, Ordering::Release);

        debug_assert_bounded_size!(
            self.distance(self.start.load(Ordering::Relaxed), new_end),
            self.capacity()
        );

        if self.config.enable_metrics {
            self.metrics.record_push();
        }
        Ok(())
    }

    /// Consumer side of the protocol.
    ///
    /// # Safety
    ///
    /// No other thread may run `pop_front_unchecked` or
    /// `peek_front_unchecked` at the same time.
    pub(crate) unsafe fn pop_front_unchecked(&self) -> Result<T, RingError> {
        let start = self.start.load(Ordering::Relaxed);
        let end = self.end.load(Ordering::Acquire);

        if start == end {
            if self.config.enable_metrics {
                self.metrics.record_empty();
            }
            return Err(RingError::Empty);
        }
        debug_assert_live_slot!(start, end);

        // SAFETY: `start` is in [start, end), written by the producer before
        // its Release store of `end`, which the Acquire load above observed.
        // The value is moved out exactly once; the slot becomes uninitialized
        // once `start` is published.
        let value = unsafe { (*self.slots[start].get()).assume_init_read() };

        let new_start = self.advance(start);
        debug_assert_index_in_bounds!("start", new_start, self.slots.len());
        self.start.store(new_start, Ordering::Release);

        if self.config.enable_metrics {
            self.metrics.record_pop();
        }
        Ok(value)
    }

    /// Consumer-side read without consuming.
    ///
    /// # Safety
    ///
    /// Same contract as [`pop_front_unchecked`](Self::pop_front_unchecked).
    pub(crate) unsafe fn peek_front_unchecked(&self) -> Result<T, RingError>
    where
        T: Clone,
    {
        let start = self.start.load(Ordering::Relaxed);
        let end = self.end.load(Ordering::Acquire);

        if start == end {
            if self.config.enable_metrics {
                self.metrics.record_empty();
            }
            return Err(RingError::Empty);
        }
        debug_assert_live_slot!(start, end);

        // SAFETY: the slot is live (see pop_front_unchecked) and stays live
        // because only the consumer advances `start`.
        let value = unsafe { (*self.slots[start].get()).assume_init_ref() };
        Ok(value.clone())
    }
}

impl<T> Drop for RingBuffer<T> {
    fn drop(&mut self) {
        // Drop every value still in [start, end)
        let mut pos = *self.start.get_mut();
        let end = *self.end.get_mut();

        while pos != end {
            // SAFETY: slots in [start, end) are initialized and owned by us.
            unsafe {
                ptr::drop_in_place(self.slots[pos].get_mut().as_mut_ptr());
            }
            pos = self.advance(pos);
        }
    }
}

impl<T> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity())
            .field("size", &self.size())
            .field("start", &self.start.load(Ordering::Relaxed))
            .field("end", &self.end.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer() {
        let rb = RingBuffer::<i64>::new(5);

        assert_eq!(rb.capacity(), 5);
        assert_eq!(rb.size(), 0);
        assert_eq!(rb.start_index(), 0);
        assert!(rb.is_empty());
        assert!(!rb.is_full());
    }

    #[test]
    fn test_push_until_full() {
        let mut rb = RingBuffer::<i64>::new(3);

        assert_eq!(rb.push_back(1), Ok(()));
        assert_eq!(rb.push_back(2), Ok(()));
        assert_eq!(rb.push_back(3), Ok(()));

        assert!(rb.is_full());
        assert_eq!(rb.size(), 3);

        assert_eq!(rb.push_back(4), Err(RingError::Full));
        assert_eq!(rb.size(), 3);
    }

    #[test]
    fn test_pop_in_order() {
        let mut rb = RingBuffer::<String>::new(3);

        assert_eq!(rb.pop_front(), Err(RingError::Empty));

        rb.push_back("10".to_string()).unwrap();
        rb.push_back("20".to_string()).unwrap();

        assert_eq!(rb.pop_front().unwrap(), "10");
        assert_eq!(rb.pop_front().unwrap(), "20");
        assert!(rb.is_empty());
    }

    #[test]
    fn test_push_pop_cycle() {
        let mut rb = RingBuffer::<i64>::new(2);

        rb.push_back(5).unwrap();
        rb.push_back(10).unwrap();
        assert!(rb.is_full());

        assert_eq!(rb.pop_front(), Ok(5));
        rb.push_back(15).unwrap();

        assert_eq!(rb.pop_front(), Ok(10));
        assert_eq!(rb.peek_front(), Ok(15));
        assert_eq!(rb.pop_front(), Ok(15));
        assert!(rb.is_empty());
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut rb = RingBuffer::<i64>::new(3);

        assert_eq!(rb.peek_front(), Err(RingError::Empty));

        rb.push_back(1).unwrap();
        rb.push_back(2).unwrap();

        for _ in 0..5 {
            assert_eq!(rb.peek_front(), Ok(1));
        }
        assert_eq!(rb.size(), 2);
        assert_eq!(rb.start_index(), 0);
    }

    #[test]
    fn test_size_after_wrap() {
        let mut rb = RingBuffer::<u32>::new(3);

        // Move start/end to the last slot so `end` wraps before `start`
        for i in 0..3 {
            rb.push_back(i).unwrap();
            rb.pop_front().unwrap();
        }
        assert_eq!(rb.start_index(), 3);

        rb.push_back(7).unwrap();
        rb.push_back(8).unwrap();
        assert_eq!(rb.size(), 2);
        assert_eq!(rb.pop_front(), Ok(7));
        assert_eq!(rb.size(), 1);
    }

    #[test]
    fn test_zero_capacity() {
        let mut rb = RingBuffer::<u8>::new(0);

        assert_eq!(rb.capacity(), 0);
        assert!(rb.is_empty());
        assert!(rb.is_full());
        assert_eq!(rb.push_back(1), Err(RingError::Full));
        assert_eq!(rb.pop_front(), Err(RingError::Empty));
        assert_eq!(rb.size(), 0);
    }

    #[test]
    fn test_drop_remaining_values() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        static DROP_COUNT: AtomicUsize = AtomicUsize::new(0);

        struct DropTracker;

        impl Drop for DropTracker {
            fn drop(&mut self) {
                DROP_COUNT.fetch_add(1, Ordering::SeqCst);
            }
        }

        {
            let mut rb = RingBuffer::new(4);
            for _ in 0..4 {
                rb.push_back(DropTracker).unwrap();
            }
            // Rejected value is dropped immediately
            assert!(rb.push_back(DropTracker).is_err());
            assert_eq!(DROP_COUNT.load(Ordering::SeqCst), 1);

            drop(rb.pop_front().unwrap());
            assert_eq!(DROP_COUNT.load(Ordering::SeqCst), 2);
        }

        // Three values were still live when the buffer went out of scope
        assert_eq!(DROP_COUNT.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_metrics_enabled() {
        let mut rb = RingBuffer::<u64>::with_config(Config::new(1, true));

        assert!(rb.pop_front().is_err());
        rb.push_back(1).unwrap();
        assert!(rb.push_back(2).is_err());
        assert_eq!(rb.peek_front(), Ok(1));
        rb.pop_front().unwrap();

        let m = rb.metrics();
        assert_eq!(m.pushed, 1);
        assert_eq!(m.popped, 1);
        assert_eq!(m.full_rejections, 1);
        assert_eq!(m.empty_rejections, 1);
    }

    #[test]
    fn test_metrics_disabled() {
        let mut rb = RingBuffer::<u64>::new(2);
        rb.push_back(1).unwrap();
        rb.pop_front().unwrap();
        assert_eq!(rb.metrics(), MetricsSnapshot::default());
    }
}
