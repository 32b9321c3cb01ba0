//! Mock tick clock for testing with controllable time advancement
//!
//! The pulse synthesizer busy-polls `ticks()`; to make those loops
//! terminate deterministically in tests, the mock can auto-advance by a
//! fixed step on every read, simulating the instruction cost of one poll
//! iteration.

use core::cell::Cell;

use crate::platform::traits::TickClock;

/// Slow-counter divider: the 8 MHz pulse timer is prescaled by 1024 to
/// produce the 7812.5 Hz debounce counter.
const SLOW_DIVIDER: u64 = 1024;

/// Mock tick clock with controllable time
///
/// Tracks absolute time in fast (us x 8) ticks; the wrapping u16/u8 views
/// required by [`TickClock`] are derived from it.
///
/// # Example
///
/// ```
/// use rotorstab::platform::mock::MockClock;
/// use rotorstab::platform::traits::TickClock;
///
/// let clock = MockClock::new();
/// clock.advance(8_000); // 1 ms
/// assert_eq!(clock.ticks(), 8_000);
/// ```
#[derive(Default)]
pub struct MockClock {
    now: Cell<u64>,
    step_per_read: Cell<u64>,
}

impl MockClock {
    /// Create a new mock clock starting at tick 0, not auto-advancing.
    pub fn new() -> Self {
        Self {
            now: Cell::new(0),
            step_per_read: Cell::new(0),
        }
    }

    /// Create a clock that advances by `step` fast ticks on every
    /// `ticks()` read, so busy-poll loops make progress.
    pub fn with_auto_advance(step: u64) -> Self {
        let clock = Self::new();
        clock.step_per_read.set(step);
        clock
    }

    /// Advance the clock by the specified number of fast ticks.
    pub fn advance(&self, ticks: u64) {
        self.now.set(self.now.get() + ticks);
    }

    /// Advance the clock by the specified number of slow (128 us) ticks.
    pub fn advance_slow(&self, slow_ticks: u64) {
        self.advance(slow_ticks * SLOW_DIVIDER);
    }

    /// Absolute fast-tick time since creation (not wrapped).
    pub fn absolute(&self) -> u64 {
        self.now.get()
    }
}

impl TickClock for MockClock {
    fn ticks(&self) -> u16 {
        let now = self.now.get();
        self.now.set(now + self.step_per_read.get());
        now as u16
    }

    fn slow_ticks(&self) -> u8 {
        (self.now.get() / SLOW_DIVIDER) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let clock = MockClock::new();
        assert_eq!(clock.ticks(), 0);
        assert_eq!(clock.slow_ticks(), 0);
    }

    #[test]
    fn fast_ticks_wrap_at_u16() {
        let clock = MockClock::new();
        clock.advance(0x1_0005);
        assert_eq!(clock.ticks(), 5);
    }

    #[test]
    fn slow_ticks_derive_from_fast() {
        let clock = MockClock::new();
        clock.advance(SLOW_DIVIDER * 3);
        assert_eq!(clock.slow_ticks(), 3);

        // u8 wrap
        clock.advance(SLOW_DIVIDER * 256);
        assert_eq!(clock.slow_ticks(), 3);
    }

    #[test]
    fn auto_advance_steps_on_each_read() {
        let clock = MockClock::with_auto_advance(64);
        assert_eq!(clock.ticks(), 0);
        assert_eq!(clock.ticks(), 64);
        assert_eq!(clock.ticks(), 128);
    }

    #[test]
    fn manual_advance_without_auto() {
        let clock = MockClock::new();
        assert_eq!(clock.ticks(), 0);
        assert_eq!(clock.ticks(), 0);
        clock.advance(100);
        assert_eq!(clock.ticks(), 100);
    }
}
