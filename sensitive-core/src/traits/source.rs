//! Measurement source traits
//!
//! Sensor chips are opaque here: a source owns its bus device and hands
//! back one raw physical quantity per poll. Polls may block for the
//! chip's conversion time.

/// Errors reported by a measurement source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SourceError {
    /// Bus transaction failed (NACK, arbitration loss)
    Bus,
    /// Device answered with data that does not decode
    Malformed,
    /// Device rejected a configuration value
    InvalidParameter,
}

/// Distance measuring device
pub trait DistanceSource {
    /// Take one measurement in millimeters
    fn read_mm(&mut self) -> Result<u16, SourceError>;
}

/// VCSEL pulse period selector of a time-of-flight ranger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VcselPeriod {
    /// Pre-range phase
    PreRange,
    /// Final-range phase
    FinalRange,
}

/// Time-of-flight laser ranger
///
/// Longer pulse periods extend range at the cost of precision.
pub trait LaserSource: DistanceSource {
    /// Set a VCSEL pulse period in PCLKs
    fn set_pulse_period(&mut self, period: VcselPeriod, pclks: u8) -> Result<(), SourceError>;
}

/// Ambient light measuring device
pub trait LightSource {
    /// Take one raw intensity measurement (lux for a BH1750)
    fn read_intensity(&mut self) -> Result<f32, SourceError>;
}
