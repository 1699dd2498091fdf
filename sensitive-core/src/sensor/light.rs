//! Light level sensor (GY-302 breakout, BH1750 chip)
//!
//! The BH1750 integrates for longer than one loop tick. Polling faster
//! than that returns stale device state, so the sensor serves a cached
//! value until the integration interval has passed.

use crate::reading::{compress_light, Reading, MAX_VOLTAGE};
use crate::traits::{LightSource, SourceError};

use super::Identity;

/// Fixed bus address
pub const ADDRESS: u8 = 0x23;

/// Worst-case high resolution integration time (ms)
pub const INTEGRATION_MS: u32 = 180;

pub(super) const IDENTITY: Identity = Identity {
    name: "Light",
    description: "Light - GY302 (BH1750)",
    address: ADDRESS,
};

/// Light variant state
pub struct LightLevel<S> {
    source: S,
    integration_ms: u32,
    last_sample_ms: Option<u32>,
    cached_value: f32,
}

impl<S: LightSource> LightLevel<S> {
    /// Wrap a light meter with the default integration interval
    pub fn new(source: S) -> Self {
        Self::with_interval(source, INTEGRATION_MS)
    }

    /// Wrap a light meter with a custom minimum interval between polls
    pub fn with_interval(source: S, integration_ms: u32) -> Self {
        Self {
            source,
            integration_ms,
            last_sample_ms: None,
            cached_value: 0.0,
        }
    }

    /// Serve the cached value or take a fresh sample
    ///
    /// Always valid. A failed poll leaves cache and timestamp alone so the
    /// next tick retries.
    pub fn read(&mut self, now_ms: u32) -> Result<Reading, SourceError> {
        if let Some(last) = self.last_sample_ms {
            if now_ms.wrapping_sub(last) < self.integration_ms {
                return Ok(Reading::from_voltage(self.cached_value, MAX_VOLTAGE));
            }
        }

        let raw = self.source.read_intensity()?;
        self.cached_value = compress_light(raw);
        self.last_sample_ms = Some(now_ms);
        trace!("Light raw {}, value {}", raw, self.cached_value);

        Ok(Reading::from_voltage(self.cached_value, MAX_VOLTAGE))
    }

    /// Minimum interval between polls (ms)
    pub fn integration_ms(&self) -> u32 {
        self.integration_ms
    }

    /// Time of the last successful poll
    pub fn last_sample_ms(&self) -> Option<u32> {
        self.last_sample_ms
    }

    /// Underlying light meter
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Underlying light meter, mutably
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockLight;

    #[test]
    fn test_first_read_polls() {
        let mut light = LightLevel::new(MockLight::new(0.0));
        let reading = light.read(5_000).unwrap();
        assert!(reading.is_valid());
        assert_eq!(reading.value(), 0.0);
        assert_eq!(light.source().polls, 1);
        assert_eq!(light.last_sample_ms(), Some(5_000));
    }

    #[test]
    fn test_cached_within_interval() {
        let mut light = LightLevel::new(MockLight::new(100.0));
        let first = light.read(0).unwrap();

        light.source_mut().intensity = 5000.0;
        let second = light.read(INTEGRATION_MS - 1).unwrap();

        assert_eq!(first, second);
        assert!(second.is_valid());
        assert_eq!(light.source().polls, 1);
    }

    #[test]
    fn test_resamples_after_interval() {
        let mut light = LightLevel::new(MockLight::new(10.0));
        let dim = light.read(0).unwrap();

        light.source_mut().intensity = 1000.0;
        let bright = light.read(INTEGRATION_MS).unwrap();

        assert!(dim.value() < bright.value());
        assert_eq!(light.source().polls, 2);
    }

    #[test]
    fn test_timer_wrap() {
        let mut light = LightLevel::new(MockLight::new(10.0));
        light.read(u32::MAX - 10).unwrap();

        // 20 ms later across the wrap: still cached
        light.read(9).unwrap();
        assert_eq!(light.source().polls, 1);

        // 200 ms later across the wrap: fresh sample
        light.read(189).unwrap();
        assert_eq!(light.source().polls, 2);
    }

    #[test]
    fn test_failed_poll_retries_next_tick() {
        let mut light = LightLevel::new(MockLight::new(10.0));
        light.source_mut().fail = true;
        assert_eq!(light.read(0), Err(SourceError::Bus));
        assert_eq!(light.last_sample_ms(), None);

        light.source_mut().fail = false;
        assert!(light.read(1).unwrap().is_valid());
        assert_eq!(light.last_sample_ms(), Some(1));
    }
}
