//! Platform abstraction layer
//!
//! This module provides hardware abstraction for the timer/counter and the
//! pulse-output channels. All platform-specific code must stay behind the
//! traits defined here; the core algorithms are generic over them.

pub mod error;
pub mod traits;

// Mock implementations (host testing / simulators)
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, ReceiverError, Result};
pub use traits::{CompareChannel, OutputPin, PinLevel, TickClock};
