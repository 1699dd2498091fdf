//! Sonic distance sensor (HC-SR04 / RCWL-1601 in I2C mode)

use crate::reading::{DistanceScale, Reading};
use crate::traits::{DistanceSource, SourceError};

use super::Identity;

/// Fixed bus address
pub const ADDRESS: u8 = 0x57;

/// Transducer face to reference plane (mm)
pub const OFFSET_MM: u16 = 20;

/// Distance mapped to the CV ceiling (mm)
pub const MAX_MM: u16 = 1999;

/// Output ceiling for this sensor (exclusive)
pub const MAX_VOLTAGE: f32 = 9.99;

/// Raw millimeters to CV
pub const SCALE: DistanceScale = DistanceScale::new(OFFSET_MM, MAX_MM, MAX_VOLTAGE);

pub(super) const IDENTITY: Identity = Identity {
    name: "Sonic",
    description: "Sonic distance - HC-SR04",
    address: ADDRESS,
};

/// Sonic variant state
pub struct SonicDistance<S> {
    source: S,
    distance_mm: Option<u16>,
}

impl<S: DistanceSource> SonicDistance<S> {
    /// Wrap a ranger
    pub fn new(source: S) -> Self {
        Self {
            source,
            distance_mm: None,
        }
    }

    /// Take one echo measurement
    pub fn read(&mut self) -> Result<Reading, SourceError> {
        let raw_mm = self.source.read_mm()?;
        trace!("Sonic raw {} mm", raw_mm);
        self.distance_mm = Some(SCALE.clamp_mm(raw_mm));
        Ok(SCALE.reading(raw_mm))
    }

    /// Offset-corrected, clamped distance of the last measurement
    pub fn distance_mm(&self) -> Option<u16> {
        self.distance_mm
    }

    /// Underlying ranger
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Underlying ranger, mutably
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
