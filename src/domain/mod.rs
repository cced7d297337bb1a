//! Domain layer - the clock state record, free of I/O and locking.
//!
//! - Clock state and its transitions (freeze, unfreeze, advance, travel)
//! - The fatal misuse error kind

pub mod error;
pub mod state;
