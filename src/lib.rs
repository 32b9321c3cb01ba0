#![cfg_attr(not(test), no_std)]

//! rotorstab - Flight-stabilization core for multi-rotor airframes
//!
//! This crate converts pilot stick pulses and rate-gyro readings into
//! precisely timed motor/servo pulse trains for nine airframe topologies
//! (1-6 actuators), running in a fixed-period control loop.
//!
//! # Design Principles
//!
//! - **Pure no_std core**: business logic has no platform dependencies
//! - **Trait abstractions**: timer and output hardware injected via
//!   [`platform::traits`], mockable for host testing
//! - **No singletons**: all shared state lives in explicit owned structs
//!   passed by reference between components
//!
//! # Control cycle
//!
//! ```text
//! ChannelReader -> ArmingController -> GyroCorrector -> FlightMixer -> PulseSynthesizer
//! ```
//!
//! [`receiver::ChannelCapture`] runs asynchronously (edge-interrupt driven)
//! and feeds the reader through a lock-free capture bank. The synthesizer's
//! `emit()` call paces the whole loop: it returns once the current pulse
//! frame has been scheduled, so the control period equals the frame period.
//!
//! # Modules
//!
//! - [`platform`]: hardware abstraction traits, error types, mocks
//! - [`receiver`]: pulse-width capture and race-safe stick decoding
//! - [`gyro`]: gain scaling and direction correction of rate-gyro samples
//! - [`control`]: arming state machine and the generic PID primitive
//! - [`mixer`]: topology-aware stick/gyro mixing into actuator commands
//! - [`output`]: hybrid hardware/software multi-channel pulse synthesis

pub mod control;
pub mod gyro;
pub mod logging;
pub mod mixer;
pub mod output;
pub mod platform;
pub mod receiver;

// Re-export the per-cycle pipeline types
pub use control::{ArmingController, ArmingTransition, Pid, PidConfig};
pub use gyro::{GainSet, GyroCorrector, GyroDirection, GyroReading};
pub use mixer::{ActuatorCommand, FlightMixer, MixerConfig, Topology};
pub use output::{PulseSynthesizer, SynthConfig};
pub use receiver::{CaptureBank, ChannelCapture, ChannelReader, StickAxes};
