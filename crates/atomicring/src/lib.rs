//! atomicring-rs - Lock-Free Single-Producer Single-Consumer Ring Buffer
//!
//! A fixed-capacity circular buffer whose producer and consumer coordinate
//! through two atomic indices instead of a lock.
//!
//! # Key Features
//!
//! - `capacity + 1` slots: one reserved slot tells full from empty without a counter
//! - Acquire/release publication of `start` and `end`, no locks, no allocation after `new`
//! - Cache-padded indices (no false sharing between producer and consumer)
//! - Typed `Full` / `Empty` results, never blocking
//! - `split()` into one [`Producer`] and one [`Consumer`] so the SPSC rule is
//!   enforced by ownership
//!
//! # Example
//!
//! ```
//! use atomicring_rs::{RingBuffer, RingError};
//! use std::thread;
//!
//! let mut ring = RingBuffer::<u64>::new(3);
//! ring.push_back(1).unwrap();
//! assert_eq!(ring.peek_front(), Ok(1));
//! assert_eq!(ring.pop_front(), Ok(1));
//! assert_eq!(ring.pop_front(), Err(RingError::Empty));
//!
//! // One producer thread, one consumer thread
//! let (mut tx, mut rx) = ring.split();
//! let producer = thread::spawn(move || {
//!     for i in 0..100u64 {
//!         while tx.push_back(i).is_err() {
//!             std::hint::spin_loop();
//!         }
//!     }
//! });
//!
//! let mut received = 0;
//! while received < 100 {
//!     if let Ok(value) = rx.pop_front() {
//!         assert_eq!(value, received);
//!         received += 1;
//!     }
//! }
//! producer.join().unwrap();
//! ```

mod backoff;
mod config;
mod error;
mod invariants;
mod metrics;
mod ring_buffer;
mod split;

pub use backoff::Backoff;
pub use config::{Config, LARGE_CONFIG, SMALL_CONFIG};
pub use error::RingError;
pub use metrics::{Metrics, MetricsSnapshot};
pub use ring_buffer::RingBuffer;
pub use split::{Consumer, Producer};
