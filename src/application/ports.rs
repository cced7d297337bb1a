//! Ports (interfaces) for the application layer.
//!
//! In hexagonal architecture, ports define the interfaces that the application
//! layer needs. Infrastructure adapters implement these ports.

use crate::domain::state::Timestamp;
use chrono::TimeDelta;
use std::fmt::Debug;
use std::time::Duration;

/// Port for reading the current time and waiting.
///
/// This is the seam consumers depend on instead of calling `Utc::now()` and
/// `std::thread::sleep` directly. Infrastructure provides the real wall clock
/// (`SystemClock`) and a manual test double (`MockClock`); the
/// [`TimeMachine`](crate::TimeMachine) facade implements it on top of either.
///
/// # Example
/// ```
/// use timemachine::{Clock, TimeMachine, Timestamp};
/// use std::time::Duration;
///
/// fn is_expired(clock: &impl Clock, created: Timestamp, ttl: Duration) -> bool {
///     clock.since(created) >= chrono::TimeDelta::from_std(ttl).unwrap()
/// }
///
/// let machine = TimeMachine::new();
/// let created = machine.freeze_now();
/// assert!(!is_expired(&machine, created, Duration::from_secs(86_400)));
///
/// machine.travel(Duration::from_secs(86_401));
/// assert!(is_expired(&machine, created, Duration::from_secs(86_400)));
/// # machine.unfreeze();
/// ```
pub trait Clock: Send + Sync + Debug {
    /// Get the current wall-clock instant.
    fn now(&self) -> Timestamp;

    /// Wait for `duration`.
    fn sleep(&self, duration: Duration);

    /// Time elapsed since `earlier`. Negative if `earlier` is in the future.
    fn since(&self, earlier: Timestamp) -> TimeDelta {
        self.now() - earlier
    }

    /// Time remaining until `later`. Negative if `later` has passed.
    fn until(&self, later: Timestamp) -> TimeDelta {
        later - self.now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }

    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }

    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}
