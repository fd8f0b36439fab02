//! Property-based tests for the ring buffer index protocol.
//!
//! Every operation sequence is replayed against a `VecDeque` bounded by the
//! same capacity; the ring must agree with the model after each step.

use atomicring_rs::{RingBuffer, RingError};
use proptest::prelude::*;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
enum Op {
    Push(u16),
    Pop,
    Peek,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<u16>().prop_map(Op::Push),
        2 => Just(Op::Pop),
        1 => Just(Op::Peek),
    ]
}

proptest! {
    /// Matches a bounded FIFO model for any operation sequence.
    #[test]
    fn prop_matches_bounded_fifo_model(
        capacity in 0usize..9,
        ops in prop::collection::vec(op_strategy(), 0..200),
    ) {
        let mut ring = RingBuffer::<u16>::new(capacity);
        let mut model = VecDeque::new();

        for op in ops {
            match op {
                Op::Push(v) => {
                    let expected = if model.len() < capacity {
                        model.push_back(v);
                        Ok(())
                    } else {
                        Err(RingError::Full)
                    };
                    prop_assert_eq!(ring.push_back(v), expected);
                }
                Op::Pop => {
                    let expected = model.pop_front().ok_or(RingError::Empty);
                    prop_assert_eq!(ring.pop_front(), expected);
                }
                Op::Peek => {
                    let expected = model.front().copied().ok_or(RingError::Empty);
                    prop_assert_eq!(ring.peek_front(), expected);
                }
            }

            prop_assert_eq!(ring.size(), model.len());
            prop_assert_eq!(ring.is_empty(), model.is_empty());
            prop_assert_eq!(ring.is_full(), model.len() == capacity);
            prop_assert_eq!(ring.capacity(), capacity);
        }
    }

    /// size() stays in [0, capacity] and start stays inside the storage.
    #[test]
    fn prop_size_and_index_bounded(
        capacity in 1usize..32,
        ops in prop::collection::vec(any::<bool>(), 1..300),
    ) {
        let mut ring = RingBuffer::<u64>::new(capacity);

        for push in ops {
            if push {
                let _ = ring.push_back(7);
            } else {
                let _ = ring.pop_front();
            }
            prop_assert!(ring.size() <= ring.capacity());
            prop_assert!(ring.start_index() <= capacity);
        }
    }

    /// Peeking any number of times is observationally a no-op.
    #[test]
    fn prop_peek_is_idempotent(
        values in prop::collection::vec(any::<i32>(), 1..16),
        peeks in 1usize..10,
    ) {
        let mut ring = RingBuffer::<i32>::new(16);
        for v in &values {
            ring.push_back(*v).unwrap();
        }

        let start = ring.start_index();
        for _ in 0..peeks {
            prop_assert_eq!(ring.peek_front(), Ok(values[0]));
        }
        prop_assert_eq!(ring.size(), values.len());
        prop_assert_eq!(ring.start_index(), start);
    }
}
