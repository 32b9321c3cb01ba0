//! Pulse-width receiver decoding
//!
//! This module turns the edge timestamps of four pulse-width-modulated
//! stick lines into normalized, centered axis values:
//!
//! - [`capture`]: the interrupt-side edge handlers and the lock-free
//!   capture bank they publish into
//! - [`reader`]: the main-loop side, which takes a torn-free joint
//!   snapshot of all four channels and normalizes it
//!
//! Absence of edges is not an error here; a lost signal simply freezes
//! the last published width. Staleness detection is an external watchdog
//! concern.

pub mod capture;
pub mod reader;

pub use capture::{CaptureBank, ChannelCapture, ChannelMask, StickChannel};
pub use reader::{ChannelReader, StickAxes};
