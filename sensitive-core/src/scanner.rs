//! Bus scanner
//!
//! Runs once at startup. A sensor is activated only when its fixed address
//! acknowledged; absent sensors stay inactive for the rest of the session.

use sensitive_hal::i2c::{I2cBus, PresentDevices};

use crate::config::Settings;
use crate::sensor::{Platform, Sensor};

/// Probe the bus and log every address that acknowledged
pub fn scan<B: I2cBus>(bus: &mut B) -> PresentDevices {
    let present = bus.scan();
    for address in present.as_slice() {
        info!("I2C device at 0x{:x}", address);
    }
    if present.is_empty() {
        warn!("No I2C devices found");
    }
    present
}

/// Activate every sensor whose address is in `present`
///
/// Logs one status line per sensor (`"<description> @ 0x29"` or
/// `"<description> not connected"`) and returns the number of sensors
/// activated by this call. A sensor whose configuration fails is logged
/// and left inactive.
pub fn activate_present<P: Platform>(
    sensors: &mut [Sensor<P>],
    present: &PresentDevices,
    settings: &Settings,
) -> usize {
    let mut activated = 0;

    for sensor in sensors.iter_mut() {
        let identity = *sensor.identity();
        if !present.contains(identity.address) {
            info!("{} not connected", identity.description);
            continue;
        }
        if sensor.is_active() {
            continue;
        }

        match sensor.activate(settings) {
            Ok(()) => {
                info!("{} @ 0x{:x}", identity.description, identity.address);
                activated += 1;
            }
            Err(e) => {
                warn!("{} failed to configure: {:?}", identity.description, e);
            }
        }
    }

    activated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{all_sensors, MockBus};
    use crate::sensor::{laser, light, SensorKind};
    use crate::traits::SourceError;

    #[test]
    fn test_scan_reports_present() {
        let mut bus = MockBus::new(&[light::ADDRESS, 0x3c]);
        let present = scan(&mut bus);
        assert_eq!(present.as_slice(), &[light::ADDRESS, 0x3c]);
    }

    #[test]
    fn test_only_present_sensors_activate() {
        let mut sensors = all_sensors();
        let present = scan(&mut MockBus::new(&[laser::ADDRESS]));

        let count = activate_present(&mut sensors, &present, &Settings::new());
        assert_eq!(count, 1);
        assert!(sensors[0].is_active());
        assert!(!sensors[1].is_active());
        assert!(!sensors[2].is_active());
    }

    #[test]
    fn test_all_present() {
        let mut sensors = all_sensors();
        let present = scan(&mut MockBus::populated());
        assert_eq!(activate_present(&mut sensors, &present, &Settings::new()), 3);
        assert!(sensors.iter().all(|s| s.is_active()));
    }

    #[test]
    fn test_second_pass_activates_nothing() {
        let mut sensors = all_sensors();
        let present = scan(&mut MockBus::populated());
        activate_present(&mut sensors, &present, &Settings::new());
        assert_eq!(activate_present(&mut sensors, &present, &Settings::new()), 0);
    }

    #[test]
    fn test_configuration_failure_leaves_inactive() {
        let mut sensors = all_sensors();
        if let SensorKind::LaserDistance(laser) = sensors[0].kind_mut() {
            laser.source_mut().fail = true;
        }

        let present = scan(&mut MockBus::populated());
        assert_eq!(activate_present(&mut sensors, &present, &Settings::new()), 2);
        assert!(!sensors[0].is_active());
        assert_eq!(sensors[0].update(0), Ok(None));
        assert_ne!(sensors[1].update(0), Err(SourceError::Bus));
    }
}
