//! Usage counters for a clock facade.
//!
//! Lets tests (and the occasional debugging session) see how a piece of code
//! drove the clock: how often it froze, slept or travelled.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counters for clock operations.
///
/// All counters use relaxed atomics; clones share the same counters.
#[derive(Debug, Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

#[derive(Debug, Default)]
struct MetricsInner {
    /// Freezes, including ones that reset or kept an already frozen clock
    freezes: AtomicU64,
    /// Unfreezes of a frozen clock
    unfreezes: AtomicU64,
    /// Sleeps absorbed by the cached time
    mocked_sleeps: AtomicU64,
    /// Sleeps delegated to the live clock
    real_sleeps: AtomicU64,
    /// Successful travels
    travels: AtomicU64,
}

impl Metrics {
    /// Create a new set of zeroed counters.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner::default()),
        }
    }

    pub(crate) fn record_freeze(&self) {
        self.inner.freezes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_unfreeze(&self) {
        self.inner.unfreezes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_mocked_sleep(&self) {
        self.inner.mocked_sleeps.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_real_sleep(&self) {
        self.inner.real_sleeps.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_travel(&self) {
        self.inner.travels.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of freezes.
    pub fn freezes(&self) -> u64 {
        self.inner.freezes.load(Ordering::Relaxed)
    }

    /// Number of unfreezes that actually left frozen mode.
    pub fn unfreezes(&self) -> u64 {
        self.inner.unfreezes.load(Ordering::Relaxed)
    }

    /// Number of sleeps that only moved the cached time.
    pub fn mocked_sleeps(&self) -> u64 {
        self.inner.mocked_sleeps.load(Ordering::Relaxed)
    }

    /// Number of sleeps that blocked on the live clock.
    pub fn real_sleeps(&self) -> u64 {
        self.inner.real_sleeps.load(Ordering::Relaxed)
    }

    /// Number of successful travels.
    pub fn travels(&self) -> u64 {
        self.inner.travels.load(Ordering::Relaxed)
    }

    /// Get a snapshot of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            freezes: self.freezes(),
            unfreezes: self.unfreezes(),
            mocked_sleeps: self.mocked_sleeps(),
            real_sleeps: self.real_sleeps(),
            travels: self.travels(),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.inner.freezes.store(0, Ordering::Relaxed);
        self.inner.unfreezes.store(0, Ordering::Relaxed);
        self.inner.mocked_sleeps.store(0, Ordering::Relaxed);
        self.inner.real_sleeps.store(0, Ordering::Relaxed);
        self.inner.travels.store(0, Ordering::Relaxed);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    /// Number of freezes
    pub freezes: u64,
    /// Number of unfreezes
    pub unfreezes: u64,
    /// Number of mocked sleeps
    pub mocked_sleeps: u64,
    /// Number of real sleeps
    pub real_sleeps: u64,
    /// Number of travels
    pub travels: u64,
}

impl MetricsSnapshot {
    /// Mocked plus real sleeps.
    pub fn total_sleeps(&self) -> u64 {
        self.mocked_sleeps.saturating_add(self.real_sleeps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_initial_state() {
        let metrics = Metrics::new();
        assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_snapshot() {
        let metrics = Metrics::new();
        metrics.record_freeze();
        metrics.record_freeze();
        metrics.record_mocked_sleep();
        metrics.record_real_sleep();
        metrics.record_real_sleep();
        metrics.record_travel();
        metrics.record_unfreeze();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.freezes, 2);
        assert_eq!(snapshot.unfreezes, 1);
        assert_eq!(snapshot.mocked_sleeps, 1);
        assert_eq!(snapshot.real_sleeps, 2);
        assert_eq!(snapshot.travels, 1);
        assert_eq!(snapshot.total_sleeps(), 3);
    }

    #[test]
    fn test_reset() {
        let metrics = Metrics::new();
        metrics.record_freeze();
        metrics.record_travel();

        metrics.reset();
        assert_eq!(metrics.freezes(), 0);
        assert_eq!(metrics.travels(), 0);
    }

    #[test]
    fn test_metrics_clone_shares_counters() {
        let metrics1 = Metrics::new();
        metrics1.record_travel();

        let metrics2 = metrics1.clone();
        metrics2.record_travel();

        assert_eq!(metrics1.travels(), 2);
        assert_eq!(metrics2.travels(), 2);
    }

    #[test]
    fn test_concurrent_updates() {
        use std::thread;

        let metrics = Metrics::new();
        let mut handles = vec![];

        for _ in 0..8 {
            let m = metrics.clone();
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    m.record_mocked_sleep();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(metrics.mocked_sleeps(), 800);
    }
}
