//! Pulse output channel traits
//!
//! This module defines the two kinds of output an actuator slot can be
//! wired to. The pulse synthesis algorithm is written against these traits
//! only, so it runs unchanged on real compare-match hardware and on the
//! mock channels used in host tests.

/// Logic level of an output pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinLevel {
    Low,
    High,
}

/// Hardware compare-match output channel
///
/// A channel the timer peripheral toggles by itself: program a target tick
/// and the desired level once, and the hardware drives the pin at exactly
/// that counter value with no interrupt or instruction-timing jitter
/// (fire-and-forget).
///
/// # Safety Invariants
///
/// - The channel is exclusively owned by the pulse synthesizer once
///   configured; nothing else may reprogram it
/// - Implementations backed by a narrow (8-bit) comparator must latch the
///   full 16-bit target themselves; callers always program full ticks
pub trait CompareChannel {
    /// Program the comparator to drive the pin to `level` when the pulse
    /// counter reaches `tick`.
    fn program(&mut self, tick: u16, level: PinLevel);
}

/// Software-timed output pin
///
/// A plain GPIO the synthesizer toggles by busy-polling the counter.
/// Jitter on these outputs is bounded by the polling loop's own
/// instruction count.
pub trait OutputPin {
    /// Drive the pin low.
    fn set_low(&mut self);

    /// Drive the pin high.
    fn set_high(&mut self);
}
