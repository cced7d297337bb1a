//! The clock facade.
//!
//! `TimeMachine` wraps a live [`Clock`] and can freeze it: while frozen, `now`
//! reports a cached timestamp that only moves through `sleep` and `travel`,
//! and sleeping costs no real time.

use crate::application::{metrics::Metrics, ports::Clock};
use crate::domain::state::{ClockMode, ClockState, FreezeOutcome, Refreeze, Timestamp};
use crate::infrastructure::clock::SystemClock;

use chrono::TimeDelta;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Builder for constructing a `TimeMachine`.
#[derive(Debug)]
pub struct TimeMachineBuilder<C> {
    clock: C,
    refreeze: Refreeze,
    metrics: Option<Metrics>,
}

impl TimeMachineBuilder<SystemClock> {
    /// Start from the real wall clock with default settings.
    pub fn new() -> Self {
        Self {
            clock: SystemClock::new(),
            refreeze: Refreeze::default(),
            metrics: None,
        }
    }
}

impl Default for TimeMachineBuilder<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TimeMachineBuilder<C> {
    /// Use `clock` as the live time source.
    pub fn with_clock<D: Clock>(self, clock: D) -> TimeMachineBuilder<D> {
        TimeMachineBuilder {
            clock,
            refreeze: self.refreeze,
            metrics: self.metrics,
        }
    }

    /// Set what freezing an already frozen clock does.
    ///
    /// Defaults to [`Refreeze::Reset`].
    pub fn with_refreeze(mut self, refreeze: Refreeze) -> Self {
        self.refreeze = refreeze;
        self
    }

    /// Record into an existing set of counters, e.g. to share them between
    /// several machines.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Build the machine. It starts live.
    pub fn build(self) -> TimeMachine<C> {
        TimeMachine {
            clock: self.clock,
            refreeze: self.refreeze,
            state: Mutex::new(ClockState::new()),
            metrics: self.metrics.unwrap_or_default(),
        }
    }
}

/// A clock that can be frozen, advanced and resumed.
///
/// Every operation takes the state lock for the duration of a read or a
/// single transition. The lock is never held across a real sleep.
///
/// # Examples
///
/// ```
/// use timemachine::TimeMachine;
/// use chrono::TimeDelta;
/// use std::time::Duration;
///
/// let machine = TimeMachine::new();
/// assert!(!machine.is_frozen());
///
/// let t0 = machine.freeze_now();
/// assert_eq!(machine.now(), t0);
///
/// // No real delay, the cached time moves by exactly one day
/// machine.sleep(Duration::from_secs(86_400));
/// assert_eq!(machine.since(t0), TimeDelta::days(1));
///
/// machine.unfreeze();
/// assert!(!machine.is_frozen());
/// ```
///
/// Freezing for the length of a scope:
///
/// ```
/// use timemachine::TimeMachine;
///
/// let machine = TimeMachine::new();
/// {
///     let guard = machine.freeze();
///     assert_eq!(machine.now(), guard.frozen_at());
/// }
/// assert!(!machine.is_frozen());
/// ```
#[derive(Debug)]
pub struct TimeMachine<C = SystemClock> {
    clock: C,
    refreeze: Refreeze,
    state: Mutex<ClockState>,
    metrics: Metrics,
}

impl TimeMachine<SystemClock> {
    /// A live machine over the real wall clock.
    pub fn new() -> Self {
        TimeMachineBuilder::new().build()
    }

    /// Create a builder for configuring a machine.
    pub fn builder() -> TimeMachineBuilder<SystemClock> {
        TimeMachineBuilder::new()
    }
}

impl Default for TimeMachine<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TimeMachine<C> {
    /// A live machine over `clock` with default settings.
    pub fn with_clock(clock: C) -> Self {
        TimeMachineBuilder::new().with_clock(clock).build()
    }

    // The state is a flat record that every transition leaves consistent, so
    // a panic elsewhere while holding the lock cannot corrupt it.
    fn lock(&self) -> MutexGuard<'_, ClockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The cached time while frozen, the live clock's time otherwise.
    pub fn now(&self) -> Timestamp {
        let frozen = self.lock().frozen_time();
        match frozen {
            Some(at) => at,
            None => self.clock.now(),
        }
    }

    /// While frozen, move the cached time forward by `duration` without
    /// waiting. While live, block the calling thread for `duration`.
    pub fn sleep(&self, duration: Duration) {
        let advanced = self.lock().advance(duration);
        match advanced {
            Some(now) => {
                self.metrics.record_mocked_sleep();
                tracing::trace!(?duration, now = %now, "mocked sleep");
            }
            None => {
                self.metrics.record_real_sleep();
                self.clock.sleep(duration);
            }
        }
    }

    /// `now() - earlier`.
    pub fn since(&self, earlier: Timestamp) -> TimeDelta {
        self.now() - earlier
    }

    /// `later - now()`.
    pub fn until(&self, later: Timestamp) -> TimeDelta {
        later - self.now()
    }

    /// Freeze the clock at the live clock's current time and return it.
    ///
    /// If the clock is already frozen the configured [`Refreeze`] applies:
    /// with the default `Reset` the cached time is recaptured from the live
    /// clock and any sleep/travel advancement is lost.
    pub fn freeze_now(&self) -> Timestamp {
        let outcome = self.lock().freeze(self.refreeze, || self.clock.now());
        self.record_freeze(outcome)
    }

    /// Freeze the clock at `at`, overwriting any cached time.
    pub fn freeze_at(&self, at: Timestamp) -> Timestamp {
        let outcome = self.lock().freeze_at(at);
        self.record_freeze(outcome)
    }

    /// Freeze like [`freeze_now`](Self::freeze_now) and return a guard.
    ///
    /// Only the guard that took the clock out of live mode unfreezes it on
    /// drop, so guards nest: an inner guard leaves an enclosing freeze in
    /// place. The inner freeze still applies the configured [`Refreeze`].
    pub fn freeze(&self) -> FreezeGuard<'_, C> {
        let outcome = self.lock().freeze(self.refreeze, || self.clock.now());
        let owns_freeze = matches!(outcome, FreezeOutcome::Frozen(_));
        let frozen_at = self.record_freeze(outcome);
        FreezeGuard {
            machine: self,
            frozen_at,
            owns_freeze,
        }
    }

    /// Go back to the live clock. The cached time is left in place but is
    /// not reported again until the next freeze overwrites it.
    pub fn unfreeze(&self) {
        let was_frozen = self.lock().unfreeze();
        if was_frozen {
            self.metrics.record_unfreeze();
            tracing::debug!("clock unfrozen");
        }
    }

    /// Whether the clock is frozen.
    pub fn is_frozen(&self) -> bool {
        self.lock().is_frozen()
    }

    /// Current mode.
    pub fn mode(&self) -> ClockMode {
        self.lock().mode()
    }

    /// Move the cached time forward by `duration` and return the new time.
    ///
    /// Same effect as [`sleep`](Self::sleep) on a frozen clock, but states
    /// the intent of a deliberate jump.
    ///
    /// Travel only goes forward: `Duration` cannot be negative. To move the
    /// cached time backwards, freeze again at an earlier instant with
    /// [`freeze_at`](Self::freeze_at).
    ///
    /// # Panics
    ///
    /// Panics with a [`ClockError`](crate::ClockError) payload if the clock
    /// is live.
    #[track_caller]
    pub fn travel(&self, duration: Duration) -> Timestamp {
        let travelled = self.lock().travel(duration);
        match travelled {
            Ok(now) => {
                self.metrics.record_travel();
                tracing::debug!(?duration, now = %now, "time travelled");
                now
            }
            Err(err) => {
                tracing::error!(error = %err, "clock misuse");
                std::panic::panic_any(err)
            }
        }
    }

    /// Back to the initial live state, forgetting any cached time.
    pub fn reset(&self) {
        self.lock().reset();
        tracing::debug!("clock reset");
    }

    /// Operation counters for this machine.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// The live time source.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The configured refreeze policy.
    pub fn refreeze(&self) -> Refreeze {
        self.refreeze
    }

    fn record_freeze(&self, outcome: FreezeOutcome) -> Timestamp {
        self.metrics.record_freeze();
        match outcome {
            FreezeOutcome::Frozen(at) => {
                tracing::debug!(frozen_at = %at, "clock frozen");
            }
            FreezeOutcome::Reset { at, discarded } => {
                tracing::debug!(
                    frozen_at = %at,
                    discarded = %discarded,
                    "clock refrozen, cached time reset"
                );
            }
            FreezeOutcome::Kept(at) => {
                tracing::debug!(frozen_at = %at, "clock already frozen, cached time kept");
            }
        }
        outcome.frozen_at()
    }
}

impl<C: Clock> Clock for TimeMachine<C> {
    fn now(&self) -> Timestamp {
        TimeMachine::now(self)
    }

    fn sleep(&self, duration: Duration) {
        TimeMachine::sleep(self, duration)
    }
}

/// Keeps a [`TimeMachine`] frozen until dropped.
///
/// Dropping the guard unfreezes the machine, including while unwinding from
/// a failed assertion, but only if this guard is the one that froze it. A
/// guard taken while the machine was already frozen leaves it frozen.
#[must_use = "dropping the guard unfreezes the clock immediately"]
#[derive(Debug)]
pub struct FreezeGuard<'a, C: Clock = SystemClock> {
    machine: &'a TimeMachine<C>,
    frozen_at: Timestamp,
    owns_freeze: bool,
}

impl<'a, C: Clock> FreezeGuard<'a, C> {
    /// The cached time captured when the guard was created.
    pub fn frozen_at(&self) -> Timestamp {
        self.frozen_at
    }

    /// The machine this guard keeps frozen.
    pub fn machine(&self) -> &'a TimeMachine<C> {
        self.machine
    }
}

impl<C: Clock> Drop for FreezeGuard<'_, C> {
    fn drop(&mut self) {
        if self.owns_freeze {
            self.machine.unfreeze();
        }
    }
}
