//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod channel;
pub mod clock;

// Re-export trait interfaces
pub use channel::{CompareChannel, OutputPin, PinLevel};
pub use clock::TickClock;
