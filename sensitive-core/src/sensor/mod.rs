//! Sensor abstraction
//!
//! A [`Sensor`] carries what every sensor shares (index, identity,
//! activation state, its CV and gate outputs, the last reading) and a
//! [`SensorKind`] holding the variant's measurement source and strategy.

pub mod laser;
pub mod light;
pub mod sonic;

use core::fmt;

use heapless::String;

use crate::config::Settings;
use crate::reading::{Reading, MAX_VOLTAGE};
use crate::traits::{
    AnalogOutput, DisplayError, DisplayRenderer, DistanceSource, GateOutput, LaserSource,
    LightSource, SourceError,
};

pub use laser::LaserDistance;
pub use light::LightLevel;
pub use sonic::SonicDistance;

/// Board-specific types the sensors are built from
///
/// One implementation per board lets a single sensor list hold all three
/// variants.
pub trait Platform {
    /// Time-of-flight ranger source
    type Laser: LaserSource;
    /// Ultrasonic ranger source
    type Sonic: DistanceSource;
    /// Ambient light source
    type Light: LightSource;
    /// CV output jack
    type Output: AnalogOutput;
    /// Gate output jack
    type Gate: GateOutput;
}

/// Fixed identity of a sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Identity {
    /// Short name shown on the display
    pub name: &'static str,
    /// Human readable description (kind and chip)
    pub description: &'static str,
    /// 7-bit bus address
    pub address: u8,
}

/// Variant state and strategy
pub enum SensorKind<P: Platform> {
    LaserDistance(LaserDistance<P::Laser>),
    SonicDistance(SonicDistance<P::Sonic>),
    LightLevel(LightLevel<P::Light>),
}

impl<P: Platform> SensorKind<P> {
    fn identity(&self) -> Identity {
        match self {
            SensorKind::LaserDistance(_) => laser::IDENTITY,
            SensorKind::SonicDistance(_) => sonic::IDENTITY,
            SensorKind::LightLevel(_) => light::IDENTITY,
        }
    }

    fn configure(&mut self, settings: &Settings) -> Result<(), SourceError> {
        match self {
            SensorKind::LaserDistance(laser) => laser.configure(settings),
            SensorKind::SonicDistance(_) | SensorKind::LightLevel(_) => Ok(()),
        }
    }

    fn read(&mut self, now_ms: u32) -> Result<Reading, SourceError> {
        match self {
            SensorKind::LaserDistance(laser) => laser.read(),
            SensorKind::SonicDistance(sonic) => sonic.read(),
            SensorKind::LightLevel(light) => light.read(now_ms),
        }
    }

    /// Clamped distance of the last measurement (distance variants only)
    pub fn distance_mm(&self) -> Option<u16> {
        match self {
            SensorKind::LaserDistance(laser) => laser.distance_mm(),
            SensorKind::SonicDistance(sonic) => sonic.distance_mm(),
            SensorKind::LightLevel(_) => None,
        }
    }
}

/// A sensor and the output pair it drives
pub struct Sensor<P: Platform> {
    index: u8,
    identity: Identity,
    active: bool,
    output: P::Output,
    gate: P::Gate,
    last_reading: Reading,
    kind: SensorKind<P>,
}

impl<P: Platform> Sensor<P> {
    /// Create a sensor in the inactive state
    ///
    /// The output is driven to 0 V and the gate low.
    pub fn new(index: u8, kind: SensorKind<P>, mut output: P::Output, mut gate: P::Gate) -> Self {
        output.set_voltage(0.0);
        gate.set_digital(false);

        Self {
            index,
            identity: kind.identity(),
            active: false,
            output,
            gate,
            last_reading: Reading::INVALID,
            kind,
        }
    }

    /// Laser distance sensor (VL53L0X)
    pub fn laser(index: u8, source: P::Laser, output: P::Output, gate: P::Gate) -> Self {
        Self::new(index, SensorKind::LaserDistance(LaserDistance::new(source)), output, gate)
    }

    /// Sonic distance sensor (HC-SR04 in I2C mode)
    pub fn sonic(index: u8, source: P::Sonic, output: P::Output, gate: P::Gate) -> Self {
        Self::new(index, SensorKind::SonicDistance(SonicDistance::new(source)), output, gate)
    }

    /// Light level sensor (GY-302 / BH1750)
    pub fn light(index: u8, source: P::Light, output: P::Output, gate: P::Gate) -> Self {
        Self::new(index, SensorKind::LightLevel(LightLevel::new(source)), output, gate)
    }

    /// Confirm presence and configure the device
    ///
    /// Only the first call has an effect. The output is zeroed and the
    /// gate cleared before any variant configuration; if that
    /// configuration fails the sensor stays inactive.
    pub fn activate(&mut self, settings: &Settings) -> Result<(), SourceError> {
        if self.active {
            return Ok(());
        }

        self.output.set_voltage(0.0);
        self.gate.set_digital(false);
        self.kind.configure(settings)?;
        self.active = true;
        Ok(())
    }

    /// Run one measurement and drive the outputs
    ///
    /// Returns `Ok(None)` without touching anything while inactive. A
    /// source error leaves outputs and the last reading untouched.
    pub fn update(&mut self, now_ms: u32) -> Result<Option<Reading>, SourceError> {
        if !self.active {
            return Ok(None);
        }

        let reading = self.kind.read(now_ms)?;
        if reading.is_valid() {
            self.output.set_voltage(reading.value());
        }
        self.gate.set_digital(reading.is_valid());
        self.last_reading = reading;

        Ok(Some(reading))
    }

    /// Draw this sensor's column of the overview screen
    pub fn render_summary<R: DisplayRenderer>(&self, display: &mut R) -> Result<(), DisplayError> {
        summary::render(
            display,
            self.index,
            self.identity.name,
            self.active,
            self.last_reading,
            self.kind.distance_mm(),
        )
    }

    /// Ordinal position (display column, output routing)
    pub fn index(&self) -> u8 {
        self.index
    }

    /// Fixed identity
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Whether the bus scan confirmed this sensor
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Most recent reading
    pub fn last_reading(&self) -> Reading {
        self.last_reading
    }

    /// CV output
    pub fn output(&self) -> &P::Output {
        &self.output
    }

    /// Gate output
    pub fn gate(&self) -> &P::Gate {
        &self.gate
    }

    /// Variant state
    pub fn kind(&self) -> &SensorKind<P> {
        &self.kind
    }

    /// Variant state, mutably (for direct driver access)
    pub fn kind_mut(&mut self) -> &mut SensorKind<P> {
        &mut self.kind
    }
}

/// Overview screen layout
///
/// Sensors share the panel in equal columns by index: name on top, the
/// voltage (or a placeholder) below. The bottom line holds the distance
/// in mm for the rangers and a bar proportional to the voltage for the
/// light meter.
pub mod summary {
    use super::*;

    /// Column width in pixels
    pub const COLUMN_WIDTH: u16 = 42;
    /// Top of the name line
    pub const NAME_Y: u16 = 0;
    /// Top of the value line
    pub const VALUE_Y: u16 = 11;
    /// Top of the distance line
    pub const DETAIL_Y: u16 = 21;
    /// Top of the bar
    pub const BAR_Y: u16 = 24;
    /// Bar height
    pub const BAR_HEIGHT: u16 = 8;
    /// Bar width at the voltage ceiling
    pub const BAR_MAX_WIDTH: u16 = COLUMN_WIDTH - 2;

    /// Shown instead of a value while the sensor is absent
    pub const ABSENT: &str = "n/c";
    /// Shown instead of a value after an invalid reading
    pub const NO_VALUE: &str = "--";

    /// Bar width for a voltage, rounded down
    pub fn bar_width(volts: f32) -> u16 {
        let fraction = (volts / MAX_VOLTAGE).clamp(0.0, 1.0);
        (fraction * BAR_MAX_WIDTH as f32) as u16
    }

    /// Draw one column
    pub fn render<R: DisplayRenderer>(
        display: &mut R,
        index: u8,
        name: &str,
        active: bool,
        reading: Reading,
        distance_mm: Option<u16>,
    ) -> Result<(), DisplayError> {
        let x = u16::from(index) * COLUMN_WIDTH;
        display.draw_text(x, NAME_Y, name)?;

        if !active {
            return display.draw_text(x, VALUE_Y, ABSENT);
        }
        if !reading.is_valid() {
            return display.draw_text(x, VALUE_Y, NO_VALUE);
        }

        let mut value: String<8> = String::new();
        // "9.98" always fits
        let _ = fmt::write(&mut value, format_args!("{:.2}", reading.value()));
        display.draw_text(x, VALUE_Y, &value)?;

        if let Some(mm) = distance_mm {
            let mut detail: String<8> = String::new();
            // "1999mm" always fits
            let _ = fmt::write(&mut detail, format_args!("{}mm", mm));
            return display.draw_text(x, DETAIL_Y, &detail);
        }

        let width = bar_width(reading.value());
        if width > 0 {
            display.draw_filled_rect(x, BAR_Y, width, BAR_HEIGHT)?;
        }
        Ok(())
    }
}
