//! Laser ranging calibration
//!
//! The VL53L0X trades range for precision through its VCSEL pulse
//! periods. Only even PCLK counts inside the chip's window are accepted.

use super::settings::{keys, ConfigValue, Settings, SettingsError};

/// Accepted pre-range pulse periods (PCLKs)
pub const PRE_PERIODS: [u8; 4] = [12, 14, 16, 18];

/// Accepted final-range pulse periods (PCLKs)
pub const FINAL_PERIODS: [u8; 4] = [8, 10, 12, 14];

/// Pre-range period used when none is stored
pub const DEFAULT_PRE_PERIOD: u8 = 14;

/// Final-range period used when none is stored
pub const DEFAULT_FINAL_PERIOD: u8 = 10;

/// VCSEL pulse periods applied to the laser at activation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LaserTiming {
    /// Pre-range pulse period (PCLKs)
    pub pre_period: u8,
    /// Final-range pulse period (PCLKs)
    pub final_period: u8,
}

impl Default for LaserTiming {
    fn default() -> Self {
        Self {
            pre_period: DEFAULT_PRE_PERIOD,
            final_period: DEFAULT_FINAL_PERIOD,
        }
    }
}

impl LaserTiming {
    /// Read both periods, each falling back to its default independently
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            pre_period: Self::period(settings, keys::PRE_PERIOD, &PRE_PERIODS, DEFAULT_PRE_PERIOD),
            final_period: Self::period(
                settings,
                keys::FINAL_PERIOD,
                &FINAL_PERIODS,
                DEFAULT_FINAL_PERIOD,
            ),
        }
    }

    /// Write both periods back into the settings map
    pub fn store(&self, settings: &mut Settings) -> Result<(), SettingsError> {
        settings.set(keys::PRE_PERIOD, ConfigValue::Int(self.pre_period.into()))?;
        settings.set(keys::FINAL_PERIOD, ConfigValue::Int(self.final_period.into()))
    }

    /// Check both periods against the accepted sets
    pub fn is_valid(&self) -> bool {
        PRE_PERIODS.contains(&self.pre_period) && FINAL_PERIODS.contains(&self.final_period)
    }

    fn period(settings: &Settings, key: &str, accepted: &[u8], default: u8) -> u8 {
        let Some(stored) = settings.get_int(key) else {
            return default;
        };

        match u8::try_from(stored) {
            Ok(period) if accepted.contains(&period) => period,
            _ => {
                warn!("Ignoring {} = {}, using {}", key, stored, default);
                default
            }
        }
    }
}
