//! Producer/consumer halves of a [`RingBuffer`].
//!
//! `RingBuffer::split` moves the buffer into an `Arc` and returns exactly one
//! [`Producer`] and one [`Consumer`]. Neither half is `Clone`, which is what
//! makes the single-producer/single-consumer precondition hold for every
//! caller of the safe API.
//!
//! Both halves deref to the shared buffer for the read-only queries
//! (`capacity`, `size`, `is_empty`, `is_full`, `start_index`, `metrics`).

use crate::{RingBuffer, RingError};
use std::cell::Cell;
use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::Arc;

impl<T> RingBuffer<T> {
    /// Splits the buffer into its writing and reading halves.
    ///
    /// Values already in the buffer stay readable through the consumer.
    pub fn split(self) -> (Producer<T>, Consumer<T>) {
        let ring = Arc::new(self);
        let producer = Producer {
            ring: Arc::clone(&ring),
        };
        let consumer = Consumer {
            ring,
            _not_sync: PhantomData,
        };
        (producer, consumer)
    }
}

/// The writing half. Owns `end`.
pub struct Producer<T> {
    ring: Arc<RingBuffer<T>>,
}

impl<T> Producer<T> {
    /// Appends a value at the back.
    ///
    /// Returns `Err(RingError::Full)` and drops `value` when no slot is free.
    #[inline]
    pub fn push_back(&mut self, value: T) -> Result<(), RingError> {
        // SAFETY: this is the only Producer for the ring and it is borrowed
        // mutably, so no other push runs concurrently.
        unsafe { self.ring.push_back_unchecked(value) }
    }
}

impl<T> Deref for Producer<T> {
    type Target = RingBuffer<T>;

    fn deref(&self) -> &Self::Target {
        &self.ring
    }
}

/// The reading half. Owns `start`.
///
/// Not `Sync`: `peek_front` takes `&self` and clones a slot in place, so the
/// consumer must stay on one thread at a time. It can still be sent.
pub struct Consumer<T> {
    ring: Arc<RingBuffer<T>>,
    _not_sync: PhantomData<Cell<()>>,
}

impl<T> Consumer<T> {
    /// Removes and returns the oldest value.
    #[inline]
    pub fn pop_front(&mut self) -> Result<T, RingError> {
        // SAFETY: this is the only Consumer for the ring and it is borrowed
        // mutably, so no other pop or peek runs concurrently.
        unsafe { self.ring.pop_front_unchecked() }
    }

    /// Returns a clone of the oldest value without removing it.
    #[inline]
    pub fn peek_front(&self) -> Result<T, RingError>
    where
        T: Clone,
    {
        // SAFETY: this is the only Consumer for the ring, it is !Sync, and a
        // pop needs `&mut self`, so nothing advances `start` meanwhile.
        unsafe { self.ring.peek_front_unchecked() }
    }
}

impl<T> Deref for Consumer<T> {
    type Target = RingBuffer<T>;

    fn deref(&self) -> &Self::Target {
        &self.ring
    }
}
