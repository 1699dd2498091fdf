//! Board-agnostic core logic for the Sensitive EuroPi script
//!
//! Reads sensors on a shared I2C bus and turns every reading into a
//! control voltage plus a gate that says whether the voltage is current:
//!
//! - Collaborator traits (measurement sources, CV/gate outputs, display)
//! - Sensor abstraction with laser, sonic and light variants
//! - Reading pipeline (offset, clamp, scale, validity)
//! - Bus scanner and one-shot activation
//! - Run/pause state machine and the control loop
//! - Settings and their persistence

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

// Must come first so the logging macros are visible to later modules.
mod fmt;

pub mod config;
pub mod control;
pub mod input;
pub mod reading;
pub mod scanner;
pub mod sensor;
pub mod state;
pub mod traits;

#[cfg(test)]
mod mock;

pub use control::{ControlLoop, TickReport};
pub use reading::{Reading, MAX_VOLTAGE};
pub use sensor::{Platform, Sensor, SensorKind};
