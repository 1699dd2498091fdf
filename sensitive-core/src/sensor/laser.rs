//! Laser distance sensor (VL53L0X time-of-flight ranger)

use crate::config::{LaserTiming, Settings};
use crate::reading::{DistanceScale, Reading, MAX_VOLTAGE};
use crate::traits::{LaserSource, SourceError, VcselPeriod};

use super::Identity;

/// Fixed bus address
pub const ADDRESS: u8 = 0x29;

/// Sensor face to reference plane (mm)
pub const OFFSET_MM: u16 = 30;

/// Distance mapped to the CV ceiling (mm)
pub const MAX_MM: u16 = 999;

/// Raw millimeters to CV
pub const SCALE: DistanceScale = DistanceScale::new(OFFSET_MM, MAX_MM, MAX_VOLTAGE);

pub(super) const IDENTITY: Identity = Identity {
    name: "Laser",
    description: "Laser distance - VL53L0X",
    address: ADDRESS,
};

/// Laser variant state
pub struct LaserDistance<S> {
    source: S,
    timing: LaserTiming,
    distance_mm: Option<u16>,
}

impl<S: LaserSource> LaserDistance<S> {
    /// Wrap a ranger; timing stays at defaults until configured
    pub fn new(source: S) -> Self {
        Self {
            source,
            timing: LaserTiming::default(),
            distance_mm: None,
        }
    }

    /// Apply the stored pulse periods to the ranger
    pub fn configure(&mut self, settings: &Settings) -> Result<(), SourceError> {
        let timing = LaserTiming::from_settings(settings);
        self.source
            .set_pulse_period(VcselPeriod::PreRange, timing.pre_period)?;
        self.source
            .set_pulse_period(VcselPeriod::FinalRange, timing.final_period)?;
        debug!(
            "Laser pulse periods: pre {}, final {}",
            timing.pre_period, timing.final_period
        );
        self.timing = timing;
        Ok(())
    }

    /// Take a ranging measurement
    pub fn read(&mut self) -> Result<Reading, SourceError> {
        let raw_mm = self.source.read_mm()?;
        trace!("Laser raw {} mm", raw_mm);
        self.distance_mm = Some(SCALE.clamp_mm(raw_mm));
        Ok(SCALE.reading(raw_mm))
    }

    /// Offset-corrected, clamped distance of the last measurement
    pub fn distance_mm(&self) -> Option<u16> {
        self.distance_mm
    }

    /// Pulse periods in effect
    pub fn timing(&self) -> LaserTiming {
        self.timing
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
