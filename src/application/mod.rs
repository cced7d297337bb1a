//! Application layer - the clock facade built on the domain state.
//!
//! - Time machine (freeze, sleep, travel, unfreeze)
//! - Operation counters
//!
//! ## Ports
//!
//! The application layer defines the [`Clock`](ports::Clock) port that the
//! live time sources in the infrastructure layer implement. The facade
//! implements the same port, so consumers cannot tell a frozen clock from a
//! real one.

pub mod machine;
pub mod metrics;
pub mod ports;
