//! Race-safe stick decoding
//!
//! The reader converts the four raw pulse widths into one frame's
//! normalized pilot input. Because the interrupt layer may publish at any
//! point mid-read, the whole four-channel read is wrapped in a
//! fence-compare retry: snapshot the fence, read everything, snapshot the
//! fence again, and retry if they differ. Interrupts are never blocked,
//! and the caller never observes a torn cross-channel snapshot.

use crate::platform::error::ReceiverError;
use crate::receiver::capture::{CaptureBank, ChannelMask, StickChannel};

/// Channel center for roll/pitch/yaw: 1520 us in ticks (us x 8).
pub const AXIS_CENTER_TICKS: u16 = 1520 * 8;

/// Channel center for collective: 1120 us in ticks (us x 8).
pub const COLLECTIVE_CENTER_TICKS: u16 = 1120 * 8;

/// One frame's normalized pilot input, centered around zero.
///
/// Fully recomputed every cycle; nothing here carries over between
/// frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StickAxes {
    pub roll: i16,
    pub pitch: i16,
    pub collective: i16,
    pub yaw: i16,
}

/// Signed divide-by-eight that rounds toward zero.
///
/// Adding 7 before the arithmetic shift makes -7..=7 all map to 0, so the
/// deadband around the channel center is symmetric (a plain shift would
/// round negative values away from zero).
pub fn div8_toward_zero(x: i16) -> i16 {
    let x = if x < 0 { x + 7 } else { x };
    x >> 3
}

fn normalize(width: u16, center: u16) -> i16 {
    div8_toward_zero(width.wrapping_sub(center) as i16)
}

/// Main-loop side of the receiver
///
/// Reentrant-safe against concurrent interrupt writes; see the module
/// docs for the retry protocol.
pub struct ChannelReader<'a> {
    bank: &'a CaptureBank,
}

impl<'a> ChannelReader<'a> {
    pub fn new(bank: &'a CaptureBank) -> Self {
        Self { bank }
    }

    /// Take a torn-free joint snapshot of all four channels and
    /// normalize it.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiverError::NotReady`] until every channel has
    /// published at least one pulse; before that the reading would be
    /// undefined. Callers wait through a startup delay before the first
    /// read.
    pub fn read(&self) -> Result<StickAxes, ReceiverError> {
        if self.bank.seen() != ChannelMask::all() {
            return Err(ReceiverError::NotReady);
        }

        let (roll, pitch, collective, yaw) = loop {
            let before = self.bank.fence();
            let widths = (
                self.bank.width(StickChannel::Roll),
                self.bank.width(StickChannel::Pitch),
                self.bank.width(StickChannel::Collective),
                self.bank.width(StickChannel::Yaw),
            );
            // Interrupt published mid-read; retry the whole snapshot.
            if self.bank.fence() == before {
                break widths;
            }
        };

        Ok(StickAxes {
            roll: normalize(roll, AXIS_CENTER_TICKS),
            pitch: normalize(pitch, AXIS_CENTER_TICKS),
            collective: normalize(collective, COLLECTIVE_CENTER_TICKS),
            yaw: normalize(yaw, AXIS_CENTER_TICKS),
        })
    }
}
