//! Airframe topology table
//!
//! Each topology fixes the actuator count, which slots are rotors
//! versus servos, and the handful of per-frame quirks (slot mirroring
//! for hardware channel reuse, servo-rate gating, the Single frame's
//! extended first slot). The mixing weights themselves live in
//! [`crate::mixer::FlightMixer::mix`].

/// Airframe layout, selected at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// One rotor plus four vanes-style servos.
    Single,
    /// Two coaxial rotors plus two swash servos.
    Dual,
    /// Two tilted rotors plus up to four servos.
    Twin,
    /// Three rotors plus a tail servo.
    Tri,
    /// Four rotors, plus-frame.
    Quad,
    /// Four rotors, X-frame.
    QuadX,
    /// Three arms, twin coaxial tail rotors.
    Y4,
    /// Six rotors, plus-frame.
    Hex,
    /// Three arms, coaxial pairs.
    Y6,
}

impl Topology {
    /// Physical actuators this layout drives (slots 0..count).
    pub fn actuator_count(&self) -> usize {
        match self {
            Topology::Single => 5,
            Topology::Dual | Topology::Tri | Topology::Quad | Topology::QuadX | Topology::Y4 => 4,
            Topology::Twin | Topology::Hex | Topology::Y6 => 6,
        }
    }

    /// Slot indices holding rotors (everything else is a servo).
    pub fn rotor_slots(&self) -> &'static [usize] {
        match self {
            Topology::Single => &[0],
            Topology::Dual | Topology::Twin => &[0, 1],
            Topology::Tri => &[0, 1, 2],
            Topology::Quad | Topology::QuadX | Topology::Y4 => &[0, 1, 2, 3],
            Topology::Hex | Topology::Y6 => &[0, 1, 2, 3, 4, 5],
        }
    }

    /// Slots clamped to the idle floor while mixing.
    ///
    /// Note the set is not exactly the rotor set: Single's first servo
    /// shares the floor with the rotor, and the middle pair of a hex
    /// frame is left out, both faithful to the shipped control law.
    pub fn idle_floor_slots(&self) -> &'static [usize] {
        match self {
            Topology::Single | Topology::Dual | Topology::Twin => &[0, 1],
            Topology::Tri => &[0, 1, 2],
            Topology::Quad | Topology::QuadX | Topology::Y4 => &[0, 1, 2, 3],
            Topology::Hex | Topology::Y6 => &[0, 1, 4, 5],
        }
    }

    /// Whether slots 2 and 3 are copied into slots 4 and 5 before
    /// pulse synthesis, letting spare hardware compare channels carry
    /// the software-timed outputs too.
    pub fn mirrors_rear_pair(&self) -> bool {
        matches!(
            self,
            Topology::Dual | Topology::Tri | Topology::Quad | Topology::QuadX | Topology::Y4
        )
    }

    /// Slots refreshed only at the servo rate (every N-th frame);
    /// analog servos overheat at ESC frame rates.
    pub fn rate_divided_slots(&self) -> &'static [usize] {
        match self {
            Topology::Single => &[1, 2, 3, 4],
            // 4 and 5 mirror the gated rear pair.
            Topology::Dual => &[2, 3, 4, 5],
            Topology::Twin => &[2, 3, 4, 5],
            Topology::Tri => &[3, 5],
            _ => &[],
        }
    }

    /// Single's one rotor takes the full 0..=2000 command range; every
    /// other slot (and every other topology) clamps to 0..=1000.
    pub fn slot_command_max(&self, slot: usize) -> i16 {
        if *self == Topology::Single && slot == 0 {
            2000
        } else {
            1000
        }
    }

    /// Centered/stopped value for a servo slot when output is forced
    /// safe.
    pub fn servo_center(&self) -> i16 {
        match self {
            Topology::Single => 840,
            _ => 500,
        }
    }
}
