//! Platform error types
//!
//! The stabilization core has almost no recoverable errors by design:
//! transient data races are resolved by retrying, out-of-range numeric
//! inputs are clamped, and frozen sensor input is an external watchdog
//! concern. What remains is listed here.

use core::fmt;

/// Result type for platform operations
pub type Result<T> = core::result::Result<T, PlatformError>;

/// Platform-level errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformError {
    /// Receiver decoding failed
    Receiver(ReceiverError),
    /// Platform initialization failed
    InitializationFailed,
    /// Invalid configuration provided
    InvalidConfig,
}

/// Receiver-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiverError {
    /// Not every stick channel has published a pulse width yet; the
    /// reading would be undefined. Callers wait through a startup delay
    /// before the first read.
    NotReady,
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::Receiver(e) => write!(f, "receiver error: {:?}", e),
            PlatformError::InitializationFailed => write!(f, "platform initialization failed"),
            PlatformError::InvalidConfig => write!(f, "invalid configuration"),
        }
    }
}

impl fmt::Display for ReceiverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceiverError::NotReady => write!(f, "no pulse captured yet on every channel"),
        }
    }
}

impl From<ReceiverError> for PlatformError {
    fn from(e: ReceiverError) -> Self {
        PlatformError::Receiver(e)
    }
}
