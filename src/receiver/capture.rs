//! Edge-interrupt pulse capture
//!
//! Four independent stick lines are timestamped against the free-running
//! pulse counter. On a rising edge the counter value is latched; on the
//! falling edge the width (`now - start`, wrapping) is published into the
//! shared [`CaptureBank`] together with a bump of the write fence.
//!
//! ## Concurrency
//!
//! The capture side runs in interrupt context and may preempt the main
//! loop at any instruction. The bank is therefore lock-free:
//!
//! - widths are independent atomic cells (single writer each)
//! - the fence is a monotonically increasing generation counter; a reader
//!   that observes the same fence value before and after its reads knows
//!   no publication happened in between (see [`super::reader`])
//!
//! Edge-start timestamps never cross the interrupt boundary; they live in
//! [`ChannelCapture`], which the interrupt layer owns exclusively.

use core::sync::atomic::{AtomicU16, AtomicU8, Ordering};

use bitflags::bitflags;

/// Logical stick channel, in bank slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StickChannel {
    Roll = 0,
    Pitch = 1,
    Collective = 2,
    Yaw = 3,
}

bitflags! {
    /// Which channels have published at least one pulse width.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ChannelMask: u8 {
        const ROLL = 1 << 0;
        const PITCH = 1 << 1;
        const COLLECTIVE = 1 << 2;
        const YAW = 1 << 3;
    }
}

impl StickChannel {
    fn mask(self) -> ChannelMask {
        match self {
            StickChannel::Roll => ChannelMask::ROLL,
            StickChannel::Pitch => ChannelMask::PITCH,
            StickChannel::Collective => ChannelMask::COLLECTIVE,
            StickChannel::Yaw => ChannelMask::YAW,
        }
    }
}

/// Shared pulse-width store, written by the interrupt layer and read by
/// [`super::reader::ChannelReader`].
#[derive(Debug, Default)]
pub struct CaptureBank {
    widths: [AtomicU16; 4],
    fence: AtomicU16,
    seen: AtomicU8,
}

impl CaptureBank {
    pub const fn new() -> Self {
        Self {
            widths: [
                AtomicU16::new(0),
                AtomicU16::new(0),
                AtomicU16::new(0),
                AtomicU16::new(0),
            ],
            fence: AtomicU16::new(0),
            seen: AtomicU8::new(0),
        }
    }

    /// Last published width for a channel, in ticks (us x 8).
    pub fn width(&self, channel: StickChannel) -> u16 {
        self.widths[channel as usize].load(Ordering::Relaxed)
    }

    /// Current write-fence generation.
    pub fn fence(&self) -> u16 {
        self.fence.load(Ordering::Acquire)
    }

    /// Channels that have published at least once.
    pub fn seen(&self) -> ChannelMask {
        ChannelMask::from_bits_truncate(self.seen.load(Ordering::Relaxed))
    }

    /// Publish a completed pulse. Called from interrupt context only.
    fn publish(&self, channel: StickChannel, width: u16) {
        self.widths[channel as usize].store(width, Ordering::Relaxed);
        self.seen
            .fetch_or(channel.mask().bits(), Ordering::Relaxed);
        // Release-order the fence bump after the width store so a reader
        // that sees the new fence also sees the new width.
        self.fence.fetch_add(1, Ordering::Release);
    }
}

/// Interrupt-side edge capture state
///
/// Owns the per-channel edge-start timestamps exclusively; only the edge
/// handlers below ever touch them. Wire the platform's pin-change
/// interrupts to [`rising_edge`](Self::rising_edge) and
/// [`falling_edge`](Self::falling_edge) with the pulse counter value
/// latched as early as possible in the handler.
pub struct ChannelCapture<'a> {
    bank: &'a CaptureBank,
    starts: [u16; 4],
}

impl<'a> ChannelCapture<'a> {
    pub fn new(bank: &'a CaptureBank) -> Self {
        Self { bank, starts: [0; 4] }
    }

    /// A stick line went high: latch the counter as the pulse start.
    pub fn rising_edge(&mut self, channel: StickChannel, tick: u16) {
        self.starts[channel as usize] = tick;
    }

    /// A stick line went low: publish `now - start` (wrapping over the
    /// counter modulus).
    pub fn falling_edge(&mut self, channel: StickChannel, tick: u16) {
        let width = tick.wrapping_sub(self.starts[channel as usize]);
        self.bank.publish(channel, width);
    }
}
