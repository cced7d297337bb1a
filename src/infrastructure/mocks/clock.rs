//! Mock live clock for testing.

use crate::application::ports::Clock;
use crate::domain::state::{advance_timestamp, Timestamp};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Manually driven live clock.
///
/// Stands in for the real wall clock underneath a
/// [`TimeMachine`](crate::TimeMachine), so tests can pin down exactly what
/// "real" time a freeze captures and check which sleeps reached the live
/// clock. Its `sleep` never blocks: it records the duration and moves its own
/// time forward by it.
///
/// # Examples
///
/// ```
/// use timemachine::infrastructure::mocks::MockClock;
/// use timemachine::Clock;
/// use chrono::{TimeDelta, TimeZone, Utc};
/// use std::time::Duration;
///
/// let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let clock = MockClock::new(start);
/// assert_eq!(clock.now(), start);
///
/// clock.sleep(Duration::from_secs(10));
/// assert_eq!(clock.now(), start + TimeDelta::seconds(10));
/// assert_eq!(clock.sleeps(), vec![Duration::from_secs(10)]);
/// ```
///
/// # Thread Safety
///
/// All clones share the same underlying time, so advancing one clone affects
/// all of them.
#[derive(Debug, Clone)]
pub struct MockClock {
    inner: Arc<Mutex<MockClockInner>>,
}

#[derive(Debug)]
struct MockClockInner {
    current: Timestamp,
    sleeps: Vec<Duration>,
}

impl MockClock {
    /// Create a mock clock starting at `start`.
    pub fn new(start: Timestamp) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockClockInner {
                current: start,
                sleeps: Vec::new(),
            })),
        }
    }

    /// Advance the clock by a duration without recording a sleep.
    pub fn advance(&self, duration: Duration) {
        let mut inner = self
            .inner
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock");
        inner.current = advance_timestamp(inner.current, duration);
    }

    /// Set the clock to a specific instant.
    pub fn set(&self, at: Timestamp) {
        self.inner
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock")
            .current = at;
    }

    /// Durations passed to `sleep`, oldest first.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.inner
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock")
            .sleeps
            .clone()
    }
}

impl Clock for MockClock {
    fn now(&self) -> Timestamp {
        self.inner
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock")
            .current
    }

    fn sleep(&self, duration: Duration) {
        let mut inner = self
            .inner
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock");
        inner.sleeps.push(duration);
        inner.current = advance_timestamp(inner.current, duration);
    }
}
