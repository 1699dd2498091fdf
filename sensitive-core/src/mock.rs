//! Test doubles shared by the unit tests

use std::vec::Vec;

use heapless::String;
use sensitive_hal::flash::{FlashError, FlashStorage, StorageKey};
use sensitive_hal::i2c::I2cBus;

use crate::config::{ConfigStore, Settings, StoreError};
use crate::sensor::{laser, light, sonic, Platform, Sensor};
use crate::traits::{
    AnalogOutput, DisplayError, DisplayRenderer, DistanceSource, GateOutput, LaserSource,
    LightSource, SourceError, VcselPeriod,
};

/// Time-of-flight ranger returning a fixed distance
pub struct MockLaser {
    pub mm: u16,
    pub fail: bool,
    pub polls: u32,
    pub periods: heapless::Vec<(VcselPeriod, u8), 4>,
}

impl MockLaser {
    pub fn new(mm: u16) -> Self {
        Self {
            mm,
            fail: false,
            polls: 0,
            periods: heapless::Vec::new(),
        }
    }
}

impl DistanceSource for MockLaser {
    fn read_mm(&mut self) -> Result<u16, SourceError> {
        self.polls += 1;
        if self.fail {
            return Err(SourceError::Bus);
        }
        Ok(self.mm)
    }
}

impl LaserSource for MockLaser {
    fn set_pulse_period(&mut self, period: VcselPeriod, pclks: u8) -> Result<(), SourceError> {
        if self.fail {
            return Err(SourceError::Bus);
        }
        let _ = self.periods.push((period, pclks));
        Ok(())
    }
}

/// Ultrasonic ranger returning a fixed distance
pub struct MockSonic {
    pub mm: u16,
    pub fail: bool,
    pub polls: u32,
}

impl MockSonic {
    pub fn new(mm: u16) -> Self {
        Self {
            mm,
            fail: false,
            polls: 0,
        }
    }
}

impl DistanceSource for MockSonic {
    fn read_mm(&mut self) -> Result<u16, SourceError> {
        self.polls += 1;
        if self.fail {
            return Err(SourceError::Bus);
        }
        Ok(self.mm)
    }
}

/// Light meter returning a fixed intensity
pub struct MockLight {
    pub intensity: f32,
    pub fail: bool,
    pub polls: u32,
}

impl MockLight {
    pub fn new(intensity: f32) -> Self {
        Self {
            intensity,
            fail: false,
            polls: 0,
        }
    }
}

impl LightSource for MockLight {
    fn read_intensity(&mut self) -> Result<f32, SourceError> {
        self.polls += 1;
        if self.fail {
            return Err(SourceError::Bus);
        }
        Ok(self.intensity)
    }
}

/// CV output recording every write
#[derive(Default)]
pub struct MockOutput {
    pub voltage: f32,
    pub writes: u32,
}

impl AnalogOutput for MockOutput {
    fn set_voltage(&mut self, volts: f32) {
        self.voltage = volts;
        self.writes += 1;
    }

    fn voltage(&self) -> f32 {
        self.voltage
    }
}

/// Gate output recording every write
#[derive(Default)]
pub struct MockGate {
    pub level: bool,
    pub writes: u32,
}

impl GateOutput for MockGate {
    fn set_digital(&mut self, level: bool) {
        self.level = level;
        self.writes += 1;
    }

    fn is_high(&self) -> bool {
        self.level
    }
}

pub struct TestPlatform;

impl Platform for TestPlatform {
    type Laser = MockLaser;
    type Sonic = MockSonic;
    type Light = MockLight;
    type Output = MockOutput;
    type Gate = MockGate;
}

pub fn laser_sensor(index: u8) -> Sensor<TestPlatform> {
    Sensor::laser(index, MockLaser::new(0), MockOutput::default(), MockGate::default())
}

pub fn sonic_sensor(index: u8) -> Sensor<TestPlatform> {
    Sensor::sonic(index, MockSonic::new(0), MockOutput::default(), MockGate::default())
}

pub fn light_sensor(index: u8) -> Sensor<TestPlatform> {
    Sensor::light(index, MockLight::new(0.0), MockOutput::default(), MockGate::default())
}

/// The three sensors of the script, at their usual indices
pub fn all_sensors() -> heapless::Vec<Sensor<TestPlatform>, 4> {
    let mut sensors = heapless::Vec::new();
    let _ = sensors.push(laser_sensor(0));
    let _ = sensors.push(sonic_sensor(1));
    let _ = sensors.push(light_sensor(2));
    sensors
}

/// Recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Text(u16, u16, String<48>),
    Rect(u16, u16, u16, u16),
    Present,
}

/// Renderer recording draw calls
#[derive(Default)]
pub struct MockDisplay {
    ops: Vec<DrawOp>,
    pub fail: bool,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn texts(&self) -> impl Iterator<Item = (u16, u16, &str)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(x, y, text) => Some((*x, *y, text.as_str())),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = (u16, u16, u16, u16)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Rect(x, y, w, h) => Some((*x, *y, *w, *h)),
            _ => None,
        })
    }

    pub fn presents(&self) -> usize {
        self.ops.iter().filter(|op| **op == DrawOp::Present).count()
    }

    pub fn reset(&mut self) {
        self.ops.clear();
    }

    fn record(&mut self, op: DrawOp) -> Result<(), DisplayError> {
        if self.fail {
            return Err(DisplayError::Communication);
        }
        self.ops.push(op);
        Ok(())
    }
}

impl DisplayRenderer for MockDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.record(DrawOp::Clear)
    }

    fn draw_text(&mut self, x: u16, y: u16, text: &str) -> Result<(), DisplayError> {
        let mut owned = String::new();
        owned
            .push_str(text)
            .map_err(|_| DisplayError::InvalidCoordinates)?;
        self.record(DrawOp::Text(x, y, owned))
    }

    fn draw_filled_rect(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    ) -> Result<(), DisplayError> {
        self.record(DrawOp::Rect(x, y, width, height))
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        self.record(DrawOp::Present)
    }
}

/// Flash holding the script state blob in RAM
#[derive(Default)]
pub struct MemoryFlash {
    blob: Option<Vec<u8>>,
    pub fail_writes: bool,
}

impl MemoryFlash {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlashStorage for MemoryFlash {
    fn read(&mut self, _key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
        let data = self.blob.as_ref().ok_or(FlashError::NotFound)?;
        let target = buffer
            .get_mut(..data.len())
            .ok_or(FlashError::BufferTooSmall)?;
        target.copy_from_slice(data);
        Ok(data.len())
    }

    fn write(&mut self, _key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
        if self.fail_writes {
            return Err(FlashError::Flash);
        }
        self.blob = Some(data.to_vec());
        Ok(())
    }
}

/// In-memory settings store recording every save
#[derive(Default)]
pub struct MemoryStore {
    pub stored: Option<Settings>,
    pub saved: Vec<Settings>,
    pub fail_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(settings: Settings) -> Self {
        Self {
            stored: Some(settings),
            ..Self::default()
        }
    }
}

impl ConfigStore for MemoryStore {
    fn load(&mut self) -> Result<Settings, StoreError> {
        self.stored
            .clone()
            .ok_or(StoreError::Flash(FlashError::NotFound))
    }

    fn save(&mut self, settings: &Settings) -> Result<(), StoreError> {
        if self.fail_saves {
            return Err(StoreError::Flash(FlashError::Flash));
        }
        self.stored = Some(settings.clone());
        self.saved.push(settings.clone());
        Ok(())
    }
}

/// Bus where a fixed set of addresses acknowledge
pub struct MockBus {
    pub devices: Vec<u8>,
}

impl MockBus {
    pub fn new(devices: &[u8]) -> Self {
        Self {
            devices: devices.to_vec(),
        }
    }

    /// Bus with every sensor of the script attached
    pub fn populated() -> Self {
        Self::new(&[laser::ADDRESS, sonic::ADDRESS, light::ADDRESS])
    }
}

impl I2cBus for MockBus {
    type Error = ();

    fn write(&mut self, address: u8, _data: &[u8]) -> Result<(), ()> {
        if self.devices.contains(&address) {
            Ok(())
        } else {
            Err(())
        }
    }

    fn read(&mut self, address: u8, _buf: &mut [u8]) -> Result<(), ()> {
        self.write(address, &[])
    }

    fn write_read(&mut self, address: u8, _w: &[u8], _r: &mut [u8]) -> Result<(), ()> {
        self.write(address, &[])
    }
}
