//! Clock state record and its transitions.
//!
//! The state is a flat record: a frozen flag and the cached timestamp reported
//! while frozen. Everything here is pure; reading the real clock and locking
//! are the application layer's job.

use crate::domain::error::ClockError;
use chrono::{DateTime, TimeDelta, Utc};
use std::time::Duration;

/// Wall-clock instant reported by the facade.
pub type Timestamp = DateTime<Utc>;

/// The two modes of the clock facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockMode {
    /// Time is read from the real wall clock
    Live,
    /// Time is read from the cached timestamp
    Frozen,
}

/// What a freeze does when the clock is already frozen.
///
/// # Example
/// ```
/// use timemachine::{Refreeze, TimeMachine};
/// use std::time::Duration;
///
/// let machine = TimeMachine::builder().with_refreeze(Refreeze::Keep).build();
/// let t0 = machine.freeze_now();
/// machine.travel(Duration::from_secs(60));
///
/// // Keep: the second freeze leaves the travelled time alone
/// assert_eq!(machine.freeze_now(), t0 + chrono::TimeDelta::seconds(60));
/// # machine.unfreeze();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Refreeze {
    /// Recapture the real time, discarding any sleep/travel advancement
    #[default]
    Reset,
    /// Leave the cached time as it is and return it
    Keep,
}

/// Result of a freeze transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreezeOutcome {
    /// The clock was live and is now frozen at the given time
    Frozen(Timestamp),
    /// The clock was already frozen and its cached time was overwritten
    Reset {
        /// The newly cached time
        at: Timestamp,
        /// The cached time that was thrown away
        discarded: Timestamp,
    },
    /// The clock was already frozen and its cached time was kept
    Kept(Timestamp),
}

impl FreezeOutcome {
    /// The cached time after the transition.
    pub fn frozen_at(&self) -> Timestamp {
        match *self {
            FreezeOutcome::Frozen(at) | FreezeOutcome::Kept(at) => at,
            FreezeOutcome::Reset { at, .. } => at,
        }
    }
}

/// Flat state record behind the clock facade.
///
/// `frozen_time` is only meaningful while `frozen` is set. Unfreezing leaves
/// the stale value in place but it is never reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockState {
    frozen: bool,
    frozen_time: Option<Timestamp>,
}

impl ClockState {
    /// Initial, live state.
    pub const fn new() -> Self {
        Self {
            frozen: false,
            frozen_time: None,
        }
    }

    /// Whether the clock is frozen.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Current mode.
    pub fn mode(&self) -> ClockMode {
        if self.frozen {
            ClockMode::Frozen
        } else {
            ClockMode::Live
        }
    }

    /// The cached time, or `None` while live.
    pub fn frozen_time(&self) -> Option<Timestamp> {
        if self.frozen {
            self.frozen_time
        } else {
            None
        }
    }

    /// Freeze the clock at the time produced by `real_now`.
    ///
    /// `real_now` is only consulted when the cached time is actually
    /// (re)captured, so `Refreeze::Keep` on a frozen clock never reads it.
    pub fn freeze(
        &mut self,
        policy: Refreeze,
        real_now: impl FnOnce() -> Timestamp,
    ) -> FreezeOutcome {
        match (self.frozen_time(), policy) {
            (Some(current), Refreeze::Keep) => FreezeOutcome::Kept(current),
            (Some(discarded), Refreeze::Reset) => {
                let at = real_now();
                self.frozen_time = Some(at);
                FreezeOutcome::Reset { at, discarded }
            }
            (None, _) => {
                let at = real_now();
                self.frozen = true;
                self.frozen_time = Some(at);
                FreezeOutcome::Frozen(at)
            }
        }
    }

    /// Freeze the clock at `at`, overwriting any cached time.
    pub fn freeze_at(&mut self, at: Timestamp) -> FreezeOutcome {
        self.freeze(Refreeze::Reset, || at)
    }

    /// Return to live mode. Returns whether the clock was frozen.
    pub fn unfreeze(&mut self) -> bool {
        std::mem::replace(&mut self.frozen, false)
    }

    /// Move the cached time forward by `by`.
    ///
    /// Returns the new cached time, or `None` (leaving the state untouched)
    /// when the clock is live.
    pub fn advance(&mut self, by: Duration) -> Option<Timestamp> {
        let current = self.frozen_time()?;
        let next = advance_timestamp(current, by);
        self.frozen_time = Some(next);
        Some(next)
    }

    /// Like [`advance`](Self::advance), but a live clock is a misuse.
    pub fn travel(&mut self, by: Duration) -> Result<Timestamp, ClockError> {
        self.advance(by)
            .ok_or(ClockError::TravelWhileLive { requested: by })
    }

    /// Back to the initial state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Add a std duration to a timestamp, saturating at the largest representable
/// instant.
pub fn advance_timestamp(from: Timestamp, by: Duration) -> Timestamp {
    TimeDelta::from_std(by)
        .ok()
        .and_then(|delta| from.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> Timestamp {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_initial_state_is_live() {
        let state = ClockState::new();
        assert!(!state.is_frozen());
        assert_eq!(state.mode(), ClockMode::Live);
        assert_eq!(state.frozen_time(), None);
        assert_eq!(state, ClockState::default());
    }

    #[test]
    fn test_freeze_from_live() {
        let mut state = ClockState::new();
        let outcome = state.freeze(Refreeze::Reset, || at(100));

        assert_eq!(outcome, FreezeOutcome::Frozen(at(100)));
        assert_eq!(state.mode(), ClockMode::Frozen);
        assert_eq!(state.frozen_time(), Some(at(100)));
    }

    #[test]
    fn test_refreeze_reset_discards_advancement() {
        let mut state = ClockState::new();
        state.freeze(Refreeze::Reset, || at(100));
        state.advance(Duration::from_secs(50));

        let outcome = state.freeze(Refreeze::Reset, || at(120));
        assert_eq!(
            outcome,
            FreezeOutcome::Reset {
                at: at(120),
                discarded: at(150),
            }
        );
        assert_eq!(state.frozen_time(), Some(at(120)));
    }

    #[test]
    fn test_refreeze_keep_does_not_read_real_clock() {
        let mut state = ClockState::new();
        state.freeze(Refreeze::Keep, || at(100));
        state.advance(Duration::from_secs(5));

        let outcome = state.freeze(Refreeze::Keep, || panic!("real clock read"));
        assert_eq!(outcome, FreezeOutcome::Kept(at(105)));
        assert_eq!(outcome.frozen_at(), at(105));
    }

    #[test]
    fn test_unfreeze_retains_stale_time() {
        let mut state = ClockState::new();
        state.freeze_at(at(10));

        assert!(state.unfreeze());
        assert!(!state.unfreeze());
        assert_eq!(state.frozen_time(), None);
        // Stale value is still in the record, just not reported
        assert_eq!(state.frozen_time, Some(at(10)));
    }

    #[test]
    fn test_advance_is_exact() {
        let mut state = ClockState::new();
        state.freeze_at(at(0));

        let d = Duration::from_secs(24 * 60 * 60) + Duration::from_nanos(1);
        let next = state.advance(d).unwrap();
        assert_eq!(next - at(0), TimeDelta::from_std(d).unwrap());
    }

    #[test]
    fn test_advance_while_live_is_noop() {
        let mut state = ClockState::new();
        assert_eq!(state.advance(Duration::from_secs(1)), None);
        assert_eq!(state, ClockState::new());
    }

    #[test]
    fn test_travel_while_live_errors() {
        let mut state = ClockState::new();
        let err = state.travel(Duration::from_micros(1)).unwrap_err();
        assert_eq!(
            err,
            ClockError::TravelWhileLive {
                requested: Duration::from_micros(1)
            }
        );
    }

    #[test]
    fn test_travel_while_frozen() {
        let mut state = ClockState::new();
        state.freeze_at(at(0));
        assert_eq!(state.travel(Duration::from_secs(3)), Ok(at(3)));
        assert_eq!(state.travel(Duration::from_secs(3)), Ok(at(6)));
    }

    #[test]
    fn test_advance_saturates() {
        assert_eq!(
            advance_timestamp(at(0), Duration::MAX),
            DateTime::<Utc>::MAX_UTC
        );
        assert_eq!(
            advance_timestamp(DateTime::<Utc>::MAX_UTC, Duration::from_secs(1)),
            DateTime::<Utc>::MAX_UTC
        );
    }

    #[test]
    fn test_reset() {
        let mut state = ClockState::new();
        state.freeze_at(at(10));
        state.reset();
        assert_eq!(state, ClockState::new());
    }
}
