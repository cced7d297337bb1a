//! Process-wide clock facade.
//!
//! A single lazily created [`TimeMachine`] over the real wall clock, exposed
//! through free functions with the same names as the machine's methods. Code
//! that calls [`now`] and [`sleep`] instead of `Utc::now()` and
//! `std::thread::sleep` can then be frozen from its tests:
//!
//! ```
//! use std::time::Duration;
//!
//! let t0 = timemachine::freeze_now();
//! timemachine::sleep(Duration::from_secs(3600)); // returns immediately
//! assert_eq!(timemachine::since(t0), chrono::TimeDelta::hours(1));
//! timemachine::unfreeze();
//! ```
//!
//! The state is shared by every thread in the process. Test harnesses that
//! run tests in parallel must serialize the tests that freeze it.

use crate::application::machine::{FreezeGuard, TimeMachine};
use crate::application::metrics::Metrics;
use crate::application::ports::Clock;
use crate::domain::state::Timestamp;
use crate::infrastructure::clock::SystemClock;

use chrono::TimeDelta;
use once_cell::sync::Lazy;
use std::time::Duration;

static GLOBAL: Lazy<TimeMachine<SystemClock>> = Lazy::new(TimeMachine::new);

/// The process-wide machine behind the free functions.
pub fn global() -> &'static TimeMachine<SystemClock> {
    &GLOBAL
}

/// Handle to the process-wide machine, for code written against the
/// [`Clock`] port.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalClock;

impl Clock for GlobalClock {
    fn now(&self) -> Timestamp {
        GLOBAL.now()
    }

    fn sleep(&self, duration: Duration) {
        GLOBAL.sleep(duration)
    }
}

/// Current time: the cached time if frozen, the real wall clock otherwise.
pub fn now() -> Timestamp {
    GLOBAL.now()
}

/// Advance the cached time if frozen, otherwise block for `duration`.
pub fn sleep(duration: Duration) {
    GLOBAL.sleep(duration)
}

/// Time elapsed since `earlier` according to [`now`].
pub fn since(earlier: Timestamp) -> TimeDelta {
    GLOBAL.since(earlier)
}

/// Time remaining until `later` according to [`now`].
pub fn until(later: Timestamp) -> TimeDelta {
    GLOBAL.until(later)
}

/// Freeze at the real current time and return it.
///
/// Calling it again while frozen recaptures the real time, throwing away any
/// sleep or travel advancement.
pub fn freeze_now() -> Timestamp {
    GLOBAL.freeze_now()
}

/// Freeze at `at`.
pub fn freeze_at(at: Timestamp) -> Timestamp {
    GLOBAL.freeze_at(at)
}

/// Freeze until the returned guard is dropped.
///
/// A guard taken while the clock is already frozen leaves it frozen on drop.
pub fn freeze() -> FreezeGuard<'static, SystemClock> {
    GLOBAL.freeze()
}

/// Resume the real wall clock.
pub fn unfreeze() {
    GLOBAL.unfreeze()
}

/// Whether the process-wide clock is frozen.
pub fn is_frozen() -> bool {
    GLOBAL.is_frozen()
}

/// Move the cached time forward by `duration` and return it.
///
/// Only forward: to go back, [`freeze_at`] an earlier instant.
///
/// # Panics
///
/// Panics with a [`ClockError`](crate::ClockError) payload if the clock is
/// not frozen.
#[track_caller]
pub fn travel(duration: Duration) -> Timestamp {
    GLOBAL.travel(duration)
}

/// Restore the initial live state.
pub fn reset() {
    GLOBAL.reset()
}

/// Counters for the process-wide machine.
pub fn metrics() -> &'static Metrics {
    GLOBAL.metrics()
}
