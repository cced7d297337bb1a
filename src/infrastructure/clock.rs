//! Clock adapters for time operations.
//!
//! Provides `SystemClock`, the real wall clock, for production use.
//!
//! # Testing
//!
//! See `MockClock` (in `crate::infrastructure::mocks`) for a controllable
//! live clock. Available with the `test-helpers` feature or in test builds:
//!
//! ```toml
//! [dev-dependencies]
//! timemachine = { version = "*", features = ["test-helpers"] }
//! ```

use crate::application::ports::Clock;
use crate::domain::state::Timestamp;
use chrono::Utc;
use std::time::Duration;

/// System clock implementation using `Utc::now()` and `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a new system clock.
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Timestamp {
        Utc::now()
    }

    #[inline]
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn test_system_clock() {
        let clock = SystemClock::new();
        let t1 = clock.now();
        clock.sleep(Duration::from_millis(10));
        let t2 = clock.now();

        assert!(t2 > t1);
        assert!(clock.since(t1) >= TimeDelta::milliseconds(10));
    }

    #[test]
    fn test_until_past_is_negative() {
        let clock = SystemClock::new();
        let past = clock.now() - TimeDelta::seconds(1);
        assert!(clock.until(past) < TimeDelta::zero());
    }
}
