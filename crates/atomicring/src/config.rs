/// Configuration for [`RingBuffer`](crate::RingBuffer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Usable capacity (default: 1024). Storage holds one extra slot.
    pub capacity: usize,
    /// Enable metrics collection (slight overhead)
    pub enable_metrics: bool,
}

impl Config {
    /// Creates a new configuration with custom settings.
    pub const fn new(capacity: usize, enable_metrics: bool) -> Self {
        Self {
            capacity,
            enable_metrics,
        }
    }

    /// Returns the number of storage slots (`capacity + 1`).
    ///
    /// The reserved slot lets two indices tell full from empty.
    #[inline]
    pub const fn slots(&self) -> usize {
        self.capacity + 1
    }

    /// Sets the usable capacity.
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Enables or disables metrics collection.
    pub const fn with_metrics(mut self, enable_metrics: bool) -> Self {
        self.enable_metrics = enable_metrics;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 1024,
            enable_metrics: false,
        }
    }
}

/// Small buffer (64 elements) for latency-sensitive hand-offs
pub const SMALL_CONFIG: Config = Config::new(64, false);

/// Large buffer (64K elements) for bursty producers
pub const LARGE_CONFIG: Config = Config::new(65_536, false);
