use crate::RingError;
use std::hint;
use std::thread;

/// Caller-side retry policy for polling a ring buffer.
///
/// The buffer never waits on its own: `push_back` returns `Full` and
/// `pop_front` returns `Empty` immediately. Callers that want to wait use
/// this instead, escalating from PAUSE spins to `yield_now` and finally
/// giving up.
#[derive(Debug)]
pub struct Backoff {
    step: u32,
}

impl Backoff {
    const SPIN_LIMIT: u32 = 6; // up to 2^6 PAUSE hints per snooze
    const YIELD_LIMIT: u32 = 10;

    /// Creates a new backoff instance.
    #[inline]
    pub fn new() -> Self {
        Self { step: 0 }
    }

    /// Spin with PAUSE hints, doubling each step.
    #[inline]
    pub fn spin(&mut self) {
        for _ in 0..1u32 << self.step.min(Self::SPIN_LIMIT) {
            hint::spin_loop();
        }
        if self.step <= Self::SPIN_LIMIT {
            self.step += 1;
        }
    }

    /// Spin while the step is low, then yield the thread.
    #[inline]
    pub fn snooze(&mut self) {
        if self.step <= Self::SPIN_LIMIT {
            self.spin();
        } else {
            thread::yield_now();
            if self.step <= Self::YIELD_LIMIT {
                self.step += 1;
            }
        }
    }

    /// Returns `true` once the caller should stop retrying.
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.step > Self::YIELD_LIMIT
    }

    /// Reset after a successful operation.
    #[inline]
    pub fn reset(&mut self) {
        self.step = 0;
    }

    /// Runs `op` until it succeeds or the backoff is exhausted.
    ///
    /// Returns the last `RingError` when patience runs out. The backoff is
    /// reset on success so one instance can drive a whole loop.
    pub fn retry<T, F>(&mut self, mut op: F) -> Result<T, RingError>
    where
        F: FnMut() -> Result<T, RingError>,
    {
        loop {
            match op() {
                Ok(value) => {
                    self.reset();
                    return Ok(value);
                }
                Err(err) if self.is_completed() => return Err(err),
                Err(_) => self.snooze(),
            }
        }
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new()
    }
}
