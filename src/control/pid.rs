//! Generic time-stepped PID controller
//!
//! One instance per controlled axis. The integral only accumulates
//! while the error magnitude exceeds a configurable deadband, which
//! keeps small steady-state noise from winding the integrator up.

use libm::fabsf;

/// Gains and deadband for one [`Pid`] instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PidConfig {
    pub kp: f32,
    pub ki: f32,
    pub kd: f32,
    /// Integral deadband: the integrator only accumulates while
    /// `|error| > epsilon`.
    pub epsilon: f32,
}

impl Default for PidConfig {
    fn default() -> Self {
        Self {
            kp: 1.0,
            ki: 0.0,
            kd: 0.0,
            epsilon: 0.01,
        }
    }
}

/// Time-stepped PID controller with millisecond timestamps.
#[derive(Debug, Clone)]
pub struct Pid {
    config: PidConfig,
    integral: f32,
    last_error: f32,
    last_time_ms: u64,
}

impl Pid {
    /// `now_ms` anchors the first step's time delta.
    pub fn new(config: PidConfig, now_ms: u64) -> Self {
        Self {
            config,
            integral: 0.0,
            last_error: 0.0,
            last_time_ms: now_ms,
        }
    }

    /// Advance one step and return the control output.
    ///
    /// `error = set_point - measured`; output is
    /// `kp * error + ki * integral + kd * (last_error - error) / dt`
    /// with dt in milliseconds. Two calls within the same millisecond
    /// (`dt == 0`) contribute only the proportional term: the integral
    /// does not accumulate and the derivative is taken as zero, so a
    /// degenerate timestamp can never divide by zero or double-count.
    pub fn step(&mut self, measured: f32, set_point: f32, now_ms: u64) -> f32 {
        let error = set_point - measured;
        let dt = now_ms.wrapping_sub(self.last_time_ms) as f32;

        let mut output = self.config.kp * error;
        if dt > 0.0 {
            if fabsf(error) > self.config.epsilon {
                self.integral += error * dt;
            }
            output += self.config.kd * (self.last_error - error) / dt;
        }
        output += self.config.ki * self.integral;

        self.last_error = error;
        self.last_time_ms = now_ms;
        output
    }

    pub fn reset(&mut self, now_ms: u64) {
        self.integral = 0.0;
        self.last_error = 0.0;
        self.last_time_ms = now_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p_only(kp: f32) -> PidConfig {
        PidConfig {
            kp,
            ki: 0.0,
            kd: 0.0,
            epsilon: 0.0,
        }
    }

    // ========== Proportional ==========

    #[test]
    fn proportional_tracks_error() {
        let mut pid = Pid::new(p_only(2.0), 0);
        assert_eq!(pid.step(3.0, 5.0, 10), 4.0, "2 * (5 - 3)");
        assert_eq!(pid.step(6.0, 5.0, 20), -2.0, "sign follows the error");
    }

    // ========== Integral deadband ==========

    #[test]
    fn integral_accumulates_outside_deadband() {
        let config = PidConfig {
            kp: 0.0,
            ki: 1.0,
            kd: 0.0,
            epsilon: 0.5,
        };
        let mut pid = Pid::new(config, 0);
        // error = 1.0 > epsilon, dt = 10: integral = 10
        assert_eq!(pid.step(0.0, 1.0, 10), 10.0);
        // error = 0.2 <= epsilon: integral frozen
        assert_eq!(pid.step(0.8, 1.0, 20), 10.0);
        // back outside: integral = 10 + 1.0 * 10 = 20
        assert_eq!(pid.step(0.0, 1.0, 30), 20.0);
    }

    // ========== Derivative ==========

    #[test]
    fn derivative_opposes_error_growth() {
        let config = PidConfig {
            kp: 0.0,
            ki: 0.0,
            kd: 2.0,
            epsilon: 0.0,
        };
        let mut pid = Pid::new(config, 0);
        pid.step(0.0, 1.0, 10);
        // error grew 1.0 -> 3.0 over 10 ms: kd * (1 - 3) / 10 = -0.4
        let out = pid.step(-2.0, 1.0, 20);
        assert!((out - (-0.4)).abs() < 1e-6, "got {}", out);
    }

    // ========== Degenerate timestep ==========

    #[test]
    fn same_millisecond_step_is_proportional_only() {
        let config = PidConfig {
            kp: 1.0,
            ki: 1.0,
            kd: 1.0,
            epsilon: 0.0,
        };
        let mut pid = Pid::new(config, 0);
        pid.step(0.0, 1.0, 5);
        let before_integral = pid.integral;
        // Same timestamp: no integral growth, no derivative blow-up.
        let out = pid.step(0.0, 2.0, 5);
        assert_eq!(pid.integral, before_integral);
        assert_eq!(out, 2.0 + before_integral, "kp*error + ki*integral only");
    }

    #[test]
    fn reset_clears_history() {
        let mut pid = Pid::new(
            PidConfig {
                kp: 0.0,
                ki: 1.0,
                kd: 0.0,
                epsilon: 0.0,
            },
            0,
        );
        pid.step(0.0, 1.0, 10);
        pid.reset(10);
        assert_eq!(pid.step(0.0, 0.0, 20), 0.0);
    }
}
