//! Mock platform implementation for testing
//!
//! This module provides mock implementations of the platform traits that
//! can be used for unit testing without requiring actual hardware.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled (on by default, for host
//!   integration tests and downstream simulators)

#![cfg(any(test, feature = "mock"))]

mod channel;
mod clock;

pub use channel::{Edge, MockCompareChannel, MockPin};
pub use clock::MockClock;
