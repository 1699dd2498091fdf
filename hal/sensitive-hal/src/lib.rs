//! Sensitive Hardware Abstraction Layer
//!
//! Hardware traits the sensor pipeline is written against. Board support
//! code implements them for the concrete chip (the EuroPi is an RP2040),
//! host tests implement them with mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  sensitive-core (sensors, control loop) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  sensitive-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  embedded-hal 1.0 / board support       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - Shared sensor bus, including address scanning
//! - [`gpio::InputPin`] - Digital input (the toggle button)
//! - [`flash::FlashStorage`] - Persistent key-value storage

#![no_std]
#![deny(unsafe_code)]

pub mod flash;
pub mod gpio;
pub mod i2c;

pub use flash::{FlashError, FlashStorage, StorageKey};
pub use gpio::{ActiveLow, InputPin};
pub use i2c::{EmbeddedHalBus, I2cBus, PresentDevices};
