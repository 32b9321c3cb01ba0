//! Mock pulse output channels for testing
//!
//! `MockCompareChannel` records every comparator programming call;
//! `MockPin` records level changes stamped with the shared mock clock, so
//! tests can reconstruct the exact pulse train a frame produced.

use heapless::Vec;

use crate::platform::mock::MockClock;
use crate::platform::traits::{CompareChannel, OutputPin, PinLevel};

/// Maximum recorded events per channel in one test
const EVENT_CAPACITY: usize = 64;

/// A recorded output event: the tick it was scheduled for (compare
/// channels) or observed at (software pins), and the driven level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub tick: u16,
    pub level: PinLevel,
}

/// Mock hardware compare-match channel
///
/// Records each `program()` call for test verification. Old events are
/// dropped once the buffer is full; tests never need more than a few
/// frames of history.
#[derive(Default)]
pub struct MockCompareChannel {
    events: Vec<Edge, EVENT_CAPACITY>,
}

impl MockCompareChannel {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// All programming calls in order.
    pub fn events(&self) -> &[Edge] {
        &self.events
    }

    /// The most recent programming call, if any.
    pub fn last(&self) -> Option<Edge> {
        self.events.last().copied()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl CompareChannel for MockCompareChannel {
    fn program(&mut self, tick: u16, level: PinLevel) {
        let _ = self.events.push(Edge { tick, level });
    }
}

/// Mock software-timed pin
///
/// Stamps each level change with the shared clock's current tick value.
pub struct MockPin<'a> {
    clock: &'a MockClock,
    level: PinLevel,
    events: Vec<Edge, EVENT_CAPACITY>,
}

impl<'a> MockPin<'a> {
    pub fn new(clock: &'a MockClock) -> Self {
        Self {
            clock,
            level: PinLevel::Low,
            events: Vec::new(),
        }
    }

    pub fn level(&self) -> PinLevel {
        self.level
    }

    /// All level changes in order. Redundant writes (already at the
    /// requested level) are not recorded.
    pub fn events(&self) -> &[Edge] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    fn record(&mut self, level: PinLevel) {
        if self.level != level {
            self.level = level;
            let _ = self.events.push(Edge {
                tick: self.clock.absolute() as u16,
                level,
            });
        }
    }
}

impl OutputPin for MockPin<'_> {
    fn set_low(&mut self) {
        self.record(PinLevel::Low);
    }

    fn set_high(&mut self) {
        self.record(PinLevel::High);
    }
}
