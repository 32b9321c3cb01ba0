//! Flight control state machines and primitives
//!
//! - [`arming`]: the stick-gesture arm/disarm state machine gating
//!   whether mixing output is live.
//! - [`pid`]: a generic time-stepped PID controller with an integral
//!   deadband, reusable per control axis.

pub mod arming;
pub mod pid;

pub use arming::{ArmingController, ArmingState, ArmingTransition};
pub use pid::{Pid, PidConfig};
