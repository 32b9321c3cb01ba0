//! Stick/gyro mixing into per-actuator commands
//!
//! The mixer runs once per control cycle: rescale collective, seed
//! every actuator slot with its share of collective, fold the gain-
//! scaled stick and gyro-feedback terms onto the slots per the
//! topology's mixing weights, then apply saturation policy (tri-frame
//! throttle pulldown, idle floor) and the disarm/zero-collective
//! safety override.
//!
//! # Design
//!
//! All arithmetic is integer fixed-point. Diagonal mixing weights use
//! `7/8` as a cheap sin(60°) approximation (0.875 versus 0.866) and
//! `1/2` as the exact cos(60°); slot sums are carried in i32 so a
//! saturated frame cannot wrap before the output stage clamps it.
//!
//! Roll and pitch ship with pure rate feedback; a full clamped-error
//! PID path exists behind [`MixerConfig::full_rate_pid`] and is off by
//! default. Yaw always runs the full correction path, with smaller
//! integral/derivative weighting than the roll/pitch path would use.
//! The asymmetry is intentional.

pub mod topology;

pub use topology::Topology;

use crate::gyro::{GainSet, GyroReading};
use crate::receiver::StickAxes;

/// Stick terms use 8-bit fixed-point gain: `(stick * gain) >> 8`.
pub const STICK_GAIN_SHIFT: u32 = 8;

/// Clamp on the per-axis correction error.
const ERROR_MAX: i32 = 1023;

const ROLL: usize = 0;
const PITCH: usize = 1;
const YAW: usize = 2;

/// Mixing policy knobs; defaults match the shipped control law.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixerConfig {
    /// Collective ceiling after rescale, preserving stabilization
    /// headroom. Not applied to Single.
    pub max_collective: i16,
    /// Minimum rotor command while mixing, so an under-saturated
    /// motor never stops.
    pub idle_floor: i16,
    /// Flip the sign of tail/swash servo deflections.
    pub tail_servo_reverse: bool,
    /// Run the full clamped-error PID path on roll and pitch instead
    /// of pure rate feedback.
    pub full_rate_pid: bool,
}

impl Default for MixerConfig {
    fn default() -> Self {
        Self {
            max_collective: 1000,
            idle_floor: 114,
            tail_servo_reverse: false,
            full_rate_pid: false,
        }
    }
}

/// One cycle's per-actuator targets, slot-indexed, in servo-style
/// command units (0..=1000 nominal range before bias).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActuatorCommand {
    pub slots: [i16; 6],
}

/// Per-topology stick/gyro mixer.
///
/// Holds the per-axis integral and last-error state for the correction
/// paths; everything else is recomputed from scratch each cycle.
#[derive(Debug)]
pub struct FlightMixer {
    topology: Topology,
    config: MixerConfig,
    integral: [i16; 3],
    last_error: [i16; 3],
}

impl FlightMixer {
    pub fn new(topology: Topology, config: MixerConfig) -> Self {
        Self {
            topology,
            config,
            integral: [0; 3],
            last_error: [0; 3],
        }
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Clamped-error correction shared by the yaw path and the
    /// optional roll/pitch PID path: accumulates a bounded integral
    /// and first-difference derivative, and returns the augmented
    /// axis demand.
    fn axis_correction(
        &mut self,
        axis: usize,
        stick: i32,
        gyro: i32,
        integral_max: i32,
        shift: u32,
    ) -> i32 {
        let error = (stick - gyro).clamp(-ERROR_MAX, ERROR_MAX);
        let integral = (self.integral[axis] as i32 + error).clamp(-integral_max, integral_max);
        self.integral[axis] = integral as i16;
        let derivative = error - self.last_error[axis] as i32;
        self.last_error[axis] = error as i16;
        stick + error + (integral >> shift) + (derivative >> shift)
    }

    fn servo_sign(&self, value: i32) -> i32 {
        if self.config.tail_servo_reverse {
            -value
        } else {
            value
        }
    }

    /// Mix one cycle of input into actuator commands.
    ///
    /// `gyro` must already be gain-scaled and direction-corrected (see
    /// [`crate::gyro::GyroCorrector`]); sticks are raw normalized axes
    /// and are gain-scaled here. Gyro feedback only folds in while
    /// `armed`; disarmed output still tracks the sticks so linkage can
    /// be checked safely.
    pub fn mix(
        &mut self,
        sticks: StickAxes,
        gyro: GyroReading,
        gains: GainSet,
        armed: bool,
    ) -> ActuatorCommand {
        use Topology::*;

        // Collective 0..800 rescales to 0..1000.
        let mut collective = ((sticks.collective as i32 * 10) >> 3) as i16;
        if self.topology != Single && collective > self.config.max_collective {
            collective = self.config.max_collective;
        }
        let c = collective as i32;

        let mut s: [i32; 6] = match self.topology {
            Single => [c, 840, 840, 945, 945, 0],
            Dual => [c, c, 500, 500, 0, 0],
            Twin => [c, c, 500, 500, 500, 500],
            Tri => [c, c, c, 500, 0, 0],
            Quad | QuadX => [c, c, c, c, 0, 0],
            Y4 => [c, c, c * 3 / 4, c * 3 / 4, 0, 0],
            Hex | Y6 => [c, c, c, c, c, c],
        };

        // Integral headroom scales with collective: 1000 -> 125.
        let integral_max = c.max(0) >> 3;

        // Roll
        let stick = (sticks.roll as i32 * gains.roll as i32) >> STICK_GAIN_SHIFT;
        let mut r = stick;
        if armed {
            r = if self.config.full_rate_pid {
                self.axis_correction(ROLL, stick, gyro.roll as i32, integral_max, 2)
            } else {
                stick - gyro.roll as i32
            };
        }
        match self.topology {
            Single => {
                s[1] += r;
                s[3] -= r;
            }
            Dual => s[3] += r,
            Twin | Tri | Y4 => {
                r = (r * 7) >> 3;
                s[0] += r;
                s[1] -= r;
            }
            Quad => {
                s[1] += r;
                s[2] -= r;
            }
            QuadX => {
                r >>= 1;
                s[0] += r;
                s[1] -= r;
                s[2] -= r;
                s[3] += r;
            }
            Hex => {
                r = (r * 7) >> 3;
                s[1] -= r;
                s[2] -= r;
                s[4] += r;
                s[5] += r;
            }
            Y6 => {
                r = (r * 7) >> 3;
                s[0] += r;
                s[1] += r;
                s[2] -= r;
                s[3] -= r;
            }
        }

        // Pitch
        let stick = (sticks.pitch as i32 * gains.pitch as i32) >> STICK_GAIN_SHIFT;
        let mut p = stick;
        if armed {
            p = if self.config.full_rate_pid {
                self.axis_correction(PITCH, stick, gyro.pitch as i32, integral_max, 2)
            } else {
                stick - gyro.pitch as i32
            };
        }
        match self.topology {
            Single => {
                s[2] += p;
                s[4] -= p;
            }
            Dual => s[2] += p,
            Twin => {
                s[2] -= self.servo_sign(p);
                s[3] += self.servo_sign(p);
                // Tilt trim servos follow raw stick only, down only.
                let trim = (sticks.pitch as i32).abs();
                s[4] += trim;
                s[5] -= trim;
            }
            Tri => {
                s[2] -= p;
                p >>= 1;
                s[0] += p;
                s[1] += p;
            }
            Quad => {
                s[0] += p;
                s[3] -= p;
            }
            QuadX => {
                p >>= 1;
                s[0] += p;
                s[1] += p;
                s[2] -= p;
                s[3] -= p;
            }
            Y4 => {
                s[0] += p;
                s[1] += p;
                s[2] -= p;
                s[3] -= p;
            }
            Hex => {
                s[0] += p;
                s[3] -= p;
                p >>= 2;
                s[1] += p;
                s[2] -= p;
                s[4] -= p;
                s[5] += p;
            }
            Y6 => {
                s[4] -= p;
                s[5] -= p;
                p >>= 1;
                s[0] += p;
                s[1] += p;
                s[2] += p;
                s[3] += p;
            }
        }

        // Yaw always runs the full correction path while armed, with
        // gentler integral/derivative weighting.
        let stick = (sticks.yaw as i32 * gains.yaw as i32) >> STICK_GAIN_SHIFT;
        let mut y = stick;
        if armed {
            y = self.axis_correction(YAW, stick, gyro.yaw as i32, integral_max, 4);
        }
        match self.topology {
            Single => {
                s[1] += y;
                s[2] += y;
                s[3] += y;
                s[4] += y;
            }
            Dual => {
                s[0] -= y;
                s[1] += y;
            }
            Twin => {
                s[2] += self.servo_sign(y >> 1);
                s[3] += self.servo_sign(y >> 1);
            }
            Tri => s[3] += self.servo_sign(y),
            Quad => {
                s[0] -= y;
                s[1] += y;
                s[2] += y;
                s[3] -= y;
            }
            QuadX => {
                s[0] -= y;
                s[1] += y;
                s[2] -= y;
                s[3] += y;
            }
            Y4 => {
                // Keep both tail rotors inside their working range
                // rather than letting yaw starve either one.
                if s[2] - y < 100 {
                    y = s[2] - 100;
                }
                if s[2] - y > 1000 {
                    y = s[2] - 1000;
                }
                if s[3] + y < 100 {
                    y = 100 - s[3];
                }
                if s[3] + y > 1000 {
                    y = 1000 - s[3];
                }
                s[2] -= y;
                s[3] += y;
            }
            Hex => {
                s[0] -= y;
                s[1] += y;
                s[2] -= y;
                s[3] += y;
                s[4] -= y;
                s[5] += y;
            }
            Y6 => {
                s[0] -= y;
                s[3] -= y;
                s[4] -= y;
                s[1] += y;
                s[2] += y;
                s[5] += y;
            }
        }

        // Tri-frame saturation: pull the whole frame's throttle down
        // instead of clipping one rotor, so stabilization keeps
        // authority at full stick.
        if self.topology == Tri {
            let over = s[0].max(s[1]).max(s[2]) - 1000;
            if over > 0 {
                s[0] -= over;
                s[1] -= over;
                s[2] -= over;
            }
        }

        let floor = self.config.idle_floor as i32;
        for &slot in self.topology.idle_floor_slots() {
            if s[slot] < floor {
                s[slot] = floor;
            }
        }

        // Safety override: rotors off unless armed with collective up;
        // servos recenter only once disarmed, so a mid-flight
        // zero-collective moment does not slam the swash around.
        if collective < 1 || !armed {
            match self.topology {
                Single => {
                    s = [0, 840, 840, 840, 840, s[5]];
                }
                Dual => {
                    s[0] = 0;
                    s[1] = 0;
                    if !armed {
                        s[2] = 500;
                        s[3] = 500;
                    }
                }
                Twin => {
                    s[0] = 0;
                    s[1] = 0;
                    if !armed {
                        s[2] = 500;
                        s[3] = 500;
                        s[4] = 500;
                        s[5] = 500;
                    }
                }
                Tri => {
                    s[0] = 0;
                    s[1] = 0;
                    s[2] = 0;
                    if !armed {
                        s[3] = 500;
                    }
                }
                Quad | QuadX | Y4 => {
                    s[0] = 0;
                    s[1] = 0;
                    s[2] = 0;
                    s[3] = 0;
                }
                Hex | Y6 => {
                    s = [0; 6];
                }
            }
        }

        let mut out = ActuatorCommand::default();
        for (slot, value) in s.iter().enumerate() {
            out.slots[slot] = (*value).clamp(i16::MIN as i32, i16::MAX as i32) as i16;
        }
        out
    }
}
