//! Reading pipeline
//!
//! Maps raw measurements onto the CV range. A reading is either valid,
//! with a voltage in `[0, MAX_VOLTAGE)`, or invalid, meaning the output
//! holds its previous voltage and the gate goes low.

/// Ceiling of the CV output range (exclusive)
pub const MAX_VOLTAGE: f32 = 9.99;

/// One sensor reading
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    valid: bool,
    value: f32,
}

impl Reading {
    /// Reading that must not reach the output
    pub const INVALID: Reading = Reading {
        valid: false,
        value: 0.0,
    };

    /// Accept a voltage if it lies in `[0, max_voltage)`
    ///
    /// Anything else, including NaN, is invalid. A voltage at the ceiling
    /// is rejected rather than clamped so a saturated output never looks
    /// like a real maximum.
    pub fn from_voltage(volts: f32, max_voltage: f32) -> Self {
        if volts >= 0.0 && volts < max_voltage {
            Reading {
                valid: true,
                value: volts,
            }
        } else {
            Reading::INVALID
        }
    }

    /// Whether the output should follow this reading
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Voltage carried by the reading (0.0 when invalid)
    pub fn value(&self) -> f32 {
        self.value
    }
}

/// Linear distance to voltage mapping
///
/// `distance = clamp(raw - offset, 0, max)`, `voltage = distance / max * max_voltage`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DistanceScale {
    /// Distance from the sensor face to the reference plane (mm)
    pub offset_mm: u16,
    /// Distance mapped to the voltage ceiling (mm)
    pub max_mm: u16,
    /// Voltage ceiling (exclusive)
    pub max_voltage: f32,
}

impl DistanceScale {
    /// Create a scale
    pub const fn new(offset_mm: u16, max_mm: u16, max_voltage: f32) -> Self {
        Self {
            offset_mm,
            max_mm,
            max_voltage,
        }
    }

    /// Remove the offset and clamp to `[0, max_mm]`
    pub fn clamp_mm(&self, raw_mm: u16) -> u16 {
        raw_mm.saturating_sub(self.offset_mm).min(self.max_mm)
    }

    /// Voltage for an already clamped distance
    pub fn voltage(&self, distance_mm: u16) -> f32 {
        distance_mm as f32 / self.max_mm as f32 * self.max_voltage
    }

    /// Full pipeline from a raw measurement to a reading
    pub fn reading(&self, raw_mm: u16) -> Reading {
        Reading::from_voltage(self.voltage(self.clamp_mm(raw_mm)), self.max_voltage)
    }
}

/// Highest value the light compression may produce
///
/// One hundredth of a volt under the CV ceiling, so a light reading is
/// always valid.
pub const LIGHT_CEILING: f32 = MAX_VOLTAGE - 0.01;

/// Logarithmic compression of a raw light intensity
///
/// `ln(1 + raw)` maps the BH1750's 0..65535 lux onto roughly 0..11,
/// saturated at [`LIGHT_CEILING`]. Negative or NaN input counts as dark.
pub fn compress_light(raw: f32) -> f32 {
    let raw = if raw > 0.0 { raw } else { 0.0 };
    libm::logf(1.0 + raw).min(LIGHT_CEILING)
}
