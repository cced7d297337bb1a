//! Mock implementations for testing.
//!
//! This module provides test doubles for infrastructure adapters: a manually
//! driven live clock and a tracing layer that captures emitted events.

pub mod clock;
pub mod layer;

pub use clock::MockClock;
pub use layer::{CapturedEvent, MockCaptureLayer};
