//! Infrastructure layer - adapters around the facade.
//!
//! This layer provides:
//! - The real wall clock (`SystemClock`)
//! - The process-wide facade and its free functions
//! - Test doubles (`mocks`)

pub mod clock;
pub mod global;

/// Mock implementations for testing.
///
/// This module is only available when the `test-helpers` feature is enabled,
/// or during test builds.
///
/// To use these mocks in integration tests, add to your `Cargo.toml`:
/// ```toml
/// [dev-dependencies]
/// timemachine = { version = "*", features = ["test-helpers"] }
/// ```
#[cfg(any(test, feature = "test-helpers"))]
pub mod mocks;
