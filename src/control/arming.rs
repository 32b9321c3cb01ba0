//! Stick-gesture arming state machine
//!
//! Arming and disarming are deliberate gestures: with collective at or
//! below zero, yaw held hard over (right to arm, left to disarm) and
//! pitch near center for roughly half a second of continuous hold. The
//! hold time is measured against a free-running 8-bit slow timer using
//! wrap-safe delta accumulation, so the gesture survives counter
//! wraparound.
//!
//! # Safety Invariants
//!
//! - No gesture progress accumulates while collective is above zero;
//!   in-flight stick motion can never toggle the state.
//! - A transition into [`ArmingState::Armed`] is reported to the caller
//!   so it can recalibrate the gyro zero points before producing live
//!   output.

use crate::log_info;
use crate::receiver::StickAxes;

/// Full stick deflection threshold for arm/disarm gestures, in
/// normalized stick units.
pub const STICK_THROW: i16 = 300;

/// Hold duration before a gesture takes effect: ~0.5 s of slow-timer
/// ticks at 7812.5 Hz.
pub const ARM_HOLD_TICKS: u16 = 0x0F42;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArmingState {
    #[default]
    Disarmed,
    Armed,
}

/// Outcome of one [`ArmingController::update`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmingTransition {
    None,
    /// Just armed; the caller must recalibrate gyro zero points before
    /// resuming control output.
    Armed,
    Disarmed,
}

/// Debounced arm/disarm gesture tracker, stepped once per control
/// cycle.
#[derive(Debug, Default)]
pub struct ArmingController {
    state: ArmingState,
    hold_ticks: u16,
    last_sample: u8,
}

impl ArmingController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ArmingState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        self.state == ArmingState::Armed
    }

    fn gesture_held(&self, sticks: &StickAxes) -> bool {
        if sticks.pitch.abs() > STICK_THROW {
            return false;
        }
        match self.state {
            ArmingState::Disarmed => sticks.yaw > STICK_THROW,
            ArmingState::Armed => sticks.yaw < -STICK_THROW,
        }
    }

    /// Step the state machine with this cycle's sticks and the current
    /// slow-timer sample.
    ///
    /// With collective above zero only the timer baseline advances:
    /// accumulated hold progress is retained but grows no further, so
    /// a brief throttle blip mid-gesture pauses rather than restarts
    /// the hold.
    pub fn update(&mut self, sticks: &StickAxes, slow_tick: u8) -> ArmingTransition {
        let delta = slow_tick.wrapping_sub(self.last_sample);
        self.last_sample = slow_tick;

        if sticks.collective > 0 {
            return ArmingTransition::None;
        }

        self.hold_ticks = self.hold_ticks.wrapping_add(delta as u16);
        if !self.gesture_held(sticks) {
            self.hold_ticks = 0;
        }

        // No reset on toggle: the gesture window flips with the state,
        // so the still-held stick fails the new window next cycle and
        // clears the accumulator then.
        if self.hold_ticks > ARM_HOLD_TICKS {
            match self.state {
                ArmingState::Disarmed => {
                    self.state = ArmingState::Armed;
                    log_info!("armed");
                    ArmingTransition::Armed
                }
                ArmingState::Armed => {
                    self.state = ArmingState::Disarmed;
                    log_info!("disarmed");
                    ArmingTransition::Disarmed
                }
            }
        } else {
            ArmingTransition::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gesture(yaw: i16, pitch: i16) -> StickAxes {
        StickAxes {
            roll: 0,
            pitch,
            collective: 0,
            yaw,
        }
    }

    /// Feed `ctrl` the same sticks over enough timer steps to cover
    /// `ticks` of hold time, 200 slow ticks per cycle.
    fn hold(ctrl: &mut ArmingController, sticks: StickAxes, ticks: u32) -> u32 {
        let mut transitions = 0;
        let mut tick = ctrl.last_sample;
        let mut elapsed = 0;
        while elapsed < ticks {
            tick = tick.wrapping_add(200);
            elapsed += 200;
            if ctrl.update(&sticks, tick) != ArmingTransition::None {
                transitions += 1;
            }
        }
        transitions
    }

    // ========== Arming gesture ==========

    #[test]
    fn arms_exactly_once_after_half_second_hold() {
        let mut ctrl = ArmingController::new();
        let transitions = hold(&mut ctrl, gesture(STICK_THROW + 50, 0), 0x2000);
        assert_eq!(transitions, 1, "one transition for one held gesture");
        assert!(ctrl.is_armed());
    }

    #[test]
    fn short_hold_does_not_arm() {
        let mut ctrl = ArmingController::new();
        hold(&mut ctrl, gesture(STICK_THROW + 50, 0), 0x0800);
        assert!(!ctrl.is_armed(), "hold under threshold must not arm");
    }

    #[test]
    fn pitch_deflection_cancels_gesture() {
        let mut ctrl = ArmingController::new();
        hold(
            &mut ctrl,
            gesture(STICK_THROW + 50, STICK_THROW + 1),
            0x2000,
        );
        assert!(!ctrl.is_armed());
    }

    #[test]
    fn yaw_at_threshold_is_not_enough() {
        let mut ctrl = ArmingController::new();
        hold(&mut ctrl, gesture(STICK_THROW, 0), 0x2000);
        assert!(!ctrl.is_armed(), "gesture requires yaw beyond the throw");
    }

    #[test]
    fn interrupted_gesture_restarts_the_hold() {
        let mut ctrl = ArmingController::new();
        hold(&mut ctrl, gesture(STICK_THROW + 50, 0), 0x0E00);
        // Stick slips back to center for one cycle.
        hold(&mut ctrl, gesture(0, 0), 200);
        let transitions = hold(&mut ctrl, gesture(STICK_THROW + 50, 0), 0x0E00);
        assert_eq!(transitions, 0, "accumulator must restart from zero");
        assert!(!ctrl.is_armed());
    }

    // ========== Disarming ==========

    #[test]
    fn disarm_uses_opposite_yaw_direction() {
        let mut ctrl = ArmingController::new();
        hold(&mut ctrl, gesture(STICK_THROW + 50, 0), 0x2000);
        assert!(ctrl.is_armed());

        // Arming yaw direction no longer counts while armed.
        hold(&mut ctrl, gesture(STICK_THROW + 50, 0), 0x2000);
        assert!(ctrl.is_armed());

        let transitions = hold(&mut ctrl, gesture(-STICK_THROW - 50, 0), 0x2000);
        assert_eq!(transitions, 1);
        assert!(!ctrl.is_armed());
    }

    // ========== Collective gating ==========

    #[test]
    fn no_progress_while_collective_raised() {
        let mut ctrl = ArmingController::new();
        let mut sticks = gesture(STICK_THROW + 50, 0);
        sticks.collective = 100;

        let mut tick = 0u8;
        for _ in 0..0x2000 / 200 {
            tick = tick.wrapping_add(200);
            assert_eq!(ctrl.update(&sticks, tick), ArmingTransition::None);
        }
        assert!(!ctrl.is_armed());

        // Baseline kept advancing, so lowering collective does not
        // credit the elapsed time retroactively.
        sticks.collective = 0;
        tick = tick.wrapping_add(200);
        assert_eq!(ctrl.update(&sticks, tick), ArmingTransition::None);
        assert!(!ctrl.is_armed());
    }

    #[test]
    fn timer_wraparound_is_harmless() {
        let mut ctrl = ArmingController::new();
        let sticks = gesture(STICK_THROW + 50, 0);
        // Samples that wrap the u8 counter several times.
        let mut armed = false;
        for i in 0..40u16 {
            let tick = (i * 130 % 256) as u8;
            if ctrl.update(&sticks, tick) == ArmingTransition::Armed {
                armed = true;
            }
        }
        assert!(armed, "40 cycles x 130 ticks must cross the threshold");
    }
}
