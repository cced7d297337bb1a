//! # timemachine
//!
//! Freeze, advance and resume wall-clock time in tests without paying for real
//! delays.
//!
//! In production code, call [`now`], [`sleep`], [`since`] and [`until`]
//! instead of `Utc::now()` and `std::thread::sleep`. They behave exactly like
//! the real clock until a test freezes time.
//!
//! In test code, [`freeze_now`] caches the current time. From then on [`now`]
//! keeps returning it, [`sleep`] moves it forward without blocking and
//! [`travel`] jumps ahead explicitly. [`unfreeze`] goes back to the real clock.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::TimeDelta;
//! use std::time::Duration;
//!
//! struct Session {
//!     created: timemachine::Timestamp,
//! }
//!
//! impl Session {
//!     fn new() -> Self {
//!         Self { created: timemachine::now() }
//!     }
//!
//!     fn is_expired(&self) -> bool {
//!         timemachine::since(self.created) > TimeDelta::hours(24)
//!     }
//! }
//!
//! let _frozen = timemachine::freeze();
//! let session = Session::new();
//! assert!(!session.is_expired());
//!
//! timemachine::travel(Duration::from_secs(24 * 60 * 60 + 1));
//! assert!(session.is_expired());
//! // `_frozen` unfreezes the clock when it goes out of scope
//! ```
//!
//! ## Injecting a clock
//!
//! The free functions drive one process-wide [`TimeMachine`]. Code that
//! takes its time source as a parameter can use its own machine instead,
//! through the [`Clock`] port:
//!
//! ```rust
//! use timemachine::{Clock, TimeMachine};
//! use std::time::Duration;
//!
//! fn poll_until_ready(clock: &impl Clock, ready: impl Fn() -> bool) -> u32 {
//!     let mut attempts = 1;
//!     while !ready() {
//!         clock.sleep(Duration::from_secs(5));
//!         attempts += 1;
//!     }
//!     attempts
//! }
//!
//! let machine = TimeMachine::new();
//! let deadline = machine.freeze_now() + chrono::TimeDelta::seconds(20);
//!
//! // Four simulated five second waits, no real ones
//! assert_eq!(poll_until_ready(&machine, || machine.until(deadline) <= chrono::TimeDelta::zero()), 5);
//! # machine.unfreeze();
//! ```
//!
//! Independent machines do not share state, so tests using them can run in
//! parallel. Tests using the free functions share the process-wide state and
//! need to be serialized.
//!
//! ## Misuse
//!
//! [`travel`] on a live clock is a bug in the test, not a condition to handle:
//! it panics with a [`ClockError`] payload.
//!
//! ```rust
//! use std::panic;
//! use std::time::Duration;
//!
//! let err = panic::catch_unwind(|| timemachine::TimeMachine::new().travel(Duration::from_micros(1)))
//!     .unwrap_err();
//! assert!(err.downcast_ref::<timemachine::ClockError>().is_some());
//! ```
//!
//! ## Refreezing
//!
//! Freezing an already frozen clock recaptures the real time by default,
//! discarding earlier sleeps and travels. Build a machine with
//! [`Refreeze::Keep`] to make a second freeze keep the cached time instead.
//!
//! ## Logging
//!
//! Mode changes and travels are logged at `debug` level through `tracing`,
//! mocked sleeps at `trace`. The crate never installs a subscriber.

// Domain layer - state record and misuse errors
pub mod domain;

// Application layer - the facade
pub mod application;

// Infrastructure layer - real clock, global facade, test doubles
pub mod infrastructure;

pub use domain::{
    error::ClockError,
    state::{ClockMode, ClockState, FreezeOutcome, Refreeze, Timestamp},
};

pub use application::{
    machine::{FreezeGuard, TimeMachine, TimeMachineBuilder},
    metrics::{Metrics, MetricsSnapshot},
    ports::Clock,
};

pub use infrastructure::{
    clock::SystemClock,
    global::{
        freeze, freeze_at, freeze_now, global, is_frozen, metrics, now, reset, since, sleep,
        travel, unfreeze, until, GlobalClock,
    },
};
