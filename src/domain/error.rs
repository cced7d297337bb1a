//! Misuse errors raised by the clock facade.

use std::time::Duration;

/// Fatal misuse of the clock facade.
///
/// These are programmer errors in test code, never runtime conditions. The
/// facade does not hand them back as `Err` values: it panics with the error
/// as the panic payload, so a harness that wants to assert on the failure can
/// `catch_unwind` and downcast the payload to `ClockError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ClockError {
    /// `travel` was called while the clock was live.
    TravelWhileLive {
        /// The duration the caller tried to travel by
        requested: Duration,
    },
}

impl std::fmt::Display for ClockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClockError::TravelWhileLive { requested } => {
                write!(
                    f,
                    "cannot travel {:?}: time can only travel after freezing the clock",
                    requested
                )
            }
        }
    }
}

impl std::error::Error for ClockError {}
