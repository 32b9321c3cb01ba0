//! Rate gyro scaling and feedback orientation
//!
//! Raw angular-rate samples arrive as signed counts already centered by
//! the acquisition layer (sample minus stored calibration offset). This
//! module applies the per-axis feedback gain and mounting direction,
//! producing the damping term the mixer subtracts from the stick demand.
//!
//! # Design
//!
//! The corrector is pure integer math with no retained state; gyro drift
//! compensation lives in the calibration offsets, not here. Gains are
//! 10-bit pot readings scaled by a fixed right shift, so a gain of 128
//! gives a feedback factor of 4 counts of demand per raw count.

/// Fixed-point shift applied to `raw * gain` on every axis.
pub const GYRO_GAIN_SHIFT: u32 = 5;

/// One centered angular-rate sample per axis, in raw counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GyroReading {
    pub roll: i16,
    pub pitch: i16,
    pub yaw: i16,
}

/// Per-axis feedback gains from the 10-bit gain pots, 0..=1023.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GainSet {
    pub roll: u16,
    pub pitch: u16,
    pub yaw: u16,
}

impl Default for GainSet {
    fn default() -> Self {
        // Roughly mid-pot.
        Self {
            roll: 512,
            pitch: 512,
            yaw: 512,
        }
    }
}

/// Sense of an axis's rate feedback relative to its rotation.
///
/// A gyro mounted in its reference orientation reports a positive rate
/// for a rotation that positive stick commands, so its feedback must be
/// negated to oppose the motion. `Reversed` covers mounts (or axes)
/// where the sensor already reports the opposing sign.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GyroDirection {
    #[default]
    Normal,
    Reversed,
}

/// Mounting direction per axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GyroDirections {
    pub roll: GyroDirection,
    pub pitch: GyroDirection,
    pub yaw: GyroDirection,
}

/// Applies gain and direction to centered rate samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct GyroCorrector {
    pub directions: GyroDirections,
}

impl GyroCorrector {
    pub fn new(directions: GyroDirections) -> Self {
        Self { directions }
    }

    /// Scale one axis: `(raw * gain) >> 5`, negated for `Normal`
    /// mounting so the result directly opposes the measured rotation.
    ///
    /// The product is widened to i32 before the shift. Centered samples
    /// stay within ±512 counts of zero, so the scaled result fits i16
    /// with room to spare for any pot setting.
    fn scale(raw: i16, gain: u16, direction: GyroDirection) -> i16 {
        let scaled = ((raw as i32 * gain as i32) >> GYRO_GAIN_SHIFT) as i16;
        match direction {
            GyroDirection::Normal => -scaled,
            GyroDirection::Reversed => scaled,
        }
    }

    /// Produce the per-axis feedback terms for one control cycle.
    pub fn correct(&self, reading: GyroReading, gains: GainSet) -> GyroReading {
        GyroReading {
            roll: Self::scale(reading.roll, gains.roll, self.directions.roll),
            pitch: Self::scale(reading.pitch, gains.pitch, self.directions.pitch),
            yaw: Self::scale(reading.yaw, gains.yaw, self.directions.yaw),
        }
    }
}
