//! Tick clock trait
//!
//! This module defines the free-running counter interface the core times
//! everything against: pulse capture, frame pacing, and gesture debounce.

/// Free-running tick clock
///
/// Platform implementations expose two views of their timer hardware:
///
/// - a fast 16-bit pulse counter, 8 ticks per microsecond, wrapping at
///   65536 (the unit every pulse width and frame period is expressed in)
/// - a slow 8-bit byte counter at 7812.5 Hz (128 us per tick), used only
///   for arming-gesture debounce accumulation
///
/// # Safety Invariants
///
/// - Both counters must run freely and wrap; they are never reset
/// - `ticks()` must be cheap enough to busy-poll (the pulse synthesizer
///   reads it in a tight loop with sub-microsecond jitter expectations)
pub trait TickClock {
    /// Current pulse-timer count in microseconds x 8, wrapping at u16.
    fn ticks(&self) -> u16;

    /// Current slow debounce counter (7812.5 Hz), wrapping at u8.
    fn slow_ticks(&self) -> u8;
}

// Allow passing a borrowed clock where an owned one is expected, so a
// single clock can be shared between the synthesizer and mock pins.
impl<T: TickClock> TickClock for &T {
    fn ticks(&self) -> u16 {
        (*self).ticks()
    }

    fn slow_ticks(&self) -> u8 {
        (*self).slow_ticks()
    }
}
