use std::sync::atomic::{AtomicU64, Ordering};

/// Counters kept by a ring buffer when `Config::enable_metrics` is set.
///
/// All updates are `Relaxed`; the counters never take part in the
/// push/pop synchronization.
#[derive(Debug, Default)]
pub struct Metrics {
    pushed: AtomicU64,
    popped: AtomicU64,
    full_rejections: AtomicU64,
    empty_rejections: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn record_push(&self) {
        self.pushed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_pop(&self) {
        self.popped.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_full(&self) {
        self.full_rejections.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_empty(&self) {
        self.empty_rejections.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of the counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            pushed: self.pushed.load(Ordering::Relaxed),
            popped: self.popped.load(Ordering::Relaxed),
            full_rejections: self.full_rejections.load(Ordering::Relaxed),
            empty_rejections: self.empty_rejections.load(Ordering::Relaxed),
        }
    }
}

/// Plain copy of [`Metrics`], all zeros when metrics are disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Values accepted by `push_back`.
    pub pushed: u64,
    /// Values removed by `pop_front`.
    pub popped: u64,
    /// `push_back` calls rejected with `Full`.
    pub full_rejections: u64,
    /// `pop_front`/`peek_front` calls rejected with `Empty`.
    pub empty_rejections: u64,
}
