//! Pulse-train synthesis
//!
//! Turns one cycle's [`ActuatorCommand`] into a six-channel pulse frame
//! and paces the control loop: [`PulseSynthesizer::emit`] does not
//! return until this frame's pulses are scheduled and the next frame's
//! rising edge has passed, so the loop period equals the frame period.
//!
//! # Design
//!
//! Four slots ride hardware compare-match channels (the hardware flips
//! the pin at a programmed tick with zero software jitter); the middle
//! two slots are software-timed by busy-polling the counter. On
//! topologies with four or fewer distinct outputs the software slots
//! are mirrored onto the spare hardware channels, so the jitter-free
//! outputs can be used instead.
//!
//! A frame proceeds: program the turn-off edges, poll the counter
//! lowering software pins at their widths, roll the frame origin
//! forward, program the turn-on edges, then poll to the origin and
//! raise the software pins. Analog servo slots are only re-raised every
//! N-th frame per the configured servo rate.

use crate::mixer::{ActuatorCommand, Topology};
use crate::platform::traits::{CompareChannel, OutputPin, PinLevel, TickClock};

/// Slot indices carried by hardware compare channels, in channel order.
const HW_SLOTS: [usize; 4] = [0, 1, 4, 5];
/// Slot indices driven by software-polled pins, in pin order.
const SOFT_SLOTS: [usize; 2] = [2, 3];

/// Pulse frame timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthConfig {
    /// Frame repetition rate for ESC outputs.
    pub esc_rate_hz: u32,
    /// Refresh ceiling for analog servo slots.
    pub servo_rate_hz: u32,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            esc_rate_hz: 450,
            servo_rate_hz: 50,
        }
    }
}

impl SynthConfig {
    /// Idle time appended after the 2 ms pulse window to hit the
    /// configured frame rate.
    pub fn low_pulse_us(&self) -> u32 {
        1_000_000 / self.esc_rate_hz - 2000
    }

    /// Whole frame period in fast ticks. Must fit the 16-bit counter,
    /// which bounds the frame rate from below at 123 Hz.
    pub fn frame_ticks(&self) -> u16 {
        ((2000 + self.low_pulse_us()) << 3) as u16
    }

    /// How many frames pass between servo-slot refreshes:
    /// the smallest divider with `divider * servo_rate >= esc_rate`.
    pub fn servo_divider(&self) -> u16 {
        let mut divider = 1;
        while divider * self.servo_rate_hz < self.esc_rate_hz {
            divider += 1;
        }
        divider as u16
    }
}

/// Hybrid hardware/software pulse generator.
///
/// `C` is the tick source, `H` the four hardware compare channels
/// (slots 0, 1, 4, 5), `P` the two software pins (slots 2, 3).
pub struct PulseSynthesizer<C, H, P> {
    clock: C,
    hw: [H; 4],
    soft: [P; 2],
    topology: Topology,
    frame_ticks: u16,
    frame_start: u16,
    servo_divider: u16,
    servo_skip: u16,
}

impl<C, H, P> PulseSynthesizer<C, H, P>
where
    C: TickClock,
    H: CompareChannel,
    P: OutputPin,
{
    pub fn new(clock: C, hw: [H; 4], soft: [P; 2], topology: Topology, config: SynthConfig) -> Self {
        let frame_start = clock.ticks();
        Self {
            clock,
            hw,
            soft,
            topology,
            frame_ticks: config.frame_ticks(),
            frame_start,
            servo_divider: config.servo_divider(),
            servo_skip: 0,
        }
    }

    pub fn channels(&self) -> &[H; 4] {
        &self.hw
    }

    pub fn pins(&self) -> &[P; 2] {
        &self.soft
    }

    /// Clamp, bias, and scale one command set into per-slot pulse
    /// widths in fast ticks, then mirror the software slots onto the
    /// spare hardware channels where the topology allows it.
    fn pulse_widths(&self, cmd: &ActuatorCommand) -> [u16; 6] {
        let mut widths = [0u16; 6];
        for (slot, width) in widths.iter_mut().enumerate() {
            let bounded = cmd.slots[slot].clamp(0, self.topology.slot_command_max(slot));
            *width = ((bounded + 1000) as u16) << 3;
        }
        if self.topology.mirrors_rear_pair() {
            widths[4] = widths[2];
            widths[5] = widths[3];
        }
        widths
    }

    /// Emit one frame and block until its rising edge.
    ///
    /// Called once per control cycle; the busy-polling waits are
    /// bounded by the frame period. State on return: all output pins
    /// high (except rate-divided slots on a skipped frame), ready to
    /// be turned off by the next call.
    pub fn emit(&mut self, cmd: &ActuatorCommand) {
        let widths = self.pulse_widths(cmd);

        // Turn-off edges for the hardware channels, relative to this
        // frame's origin.
        for (ch, &slot) in self.hw.iter_mut().zip(HW_SLOTS.iter()) {
            ch.program(self.frame_start.wrapping_add(widths[slot]), PinLevel::Low);
        }

        // Poll out the pulse window, dropping each software pin at its
        // width, until within one tick-byte of the next frame.
        let cutoff = self.frame_ticks - 0xff;
        loop {
            let t = self.clock.ticks().wrapping_sub(self.frame_start);
            for (pin, &slot) in self.soft.iter_mut().zip(SOFT_SLOTS.iter()) {
                if t >= widths[slot] {
                    pin.set_low();
                }
            }
            if (t.wrapping_sub(cutoff) as i16) >= 0 {
                break;
            }
        }

        self.frame_start = self.frame_start.wrapping_add(self.frame_ticks);
        let refresh_servos = self.servo_skip == 0;
        let gated = self.topology.rate_divided_slots();

        // Turn-on edges; rate-divided slots keep their level on
        // skipped frames.
        let frame_start = self.frame_start;
        for (ch, &slot) in self.hw.iter_mut().zip(HW_SLOTS.iter()) {
            if refresh_servos || !gated.contains(&slot) {
                ch.program(frame_start, PinLevel::High);
            }
        }

        while (self.clock.ticks().wrapping_sub(self.frame_start) as i16) < 0 {}

        for (pin, &slot) in self.soft.iter_mut().zip(SOFT_SLOTS.iter()) {
            if refresh_servos || !gated.contains(&slot) {
                pin.set_high();
            }
        }

        if !gated.is_empty() {
            if refresh_servos {
                self.servo_skip = self.servo_divider;
            }
            self.servo_skip -= 1;
        }
    }
}
