//! Control loop
//!
//! Owns the sensor list, the display and the settings store for the whole
//! session. The board calls [`ControlLoop::boot`] once, then
//! [`ControlLoop::tick`] forever, sleeping for the reported idle time
//! between ticks. Button presses arrive through [`ControlLoop::post`] and
//! take effect at the start of the next tick.

use core::fmt::Write;

use heapless::{Deque, String, Vec};
use sensitive_hal::i2c::{I2cBus, PresentDevices};

use crate::config::{ConfigStore, Settings};
use crate::scanner;
use crate::sensor::{Platform, Sensor};
use crate::state::{Event, State};
use crate::traits::{DisplayError, DisplayExt, DisplayRenderer};

/// Sensor slots on the module
pub const MAX_SENSORS: usize = 4;

/// Pending events between two ticks
pub const EVENT_QUEUE_SIZE: usize = 8;

/// Suggested sleep between ticks while paused (ms)
pub const PAUSED_IDLE_MS: u32 = 50;

/// Name shown on the splash screen
pub const SCRIPT_NAME: &str = "Sensitive EuroPi";

/// Version shown on the splash screen
pub const SCRIPT_VERSION: &str = "0.2";

/// Indicator shown while paused
pub const PAUSED_TEXT: &str = "paused";

/// Sensors in index order
pub type SensorList<P> = Vec<Sensor<P>, MAX_SENSORS>;

/// Outcome of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// State the tick ran in
    pub state: State,
    /// Sensors that produced a reading
    pub updated: usize,
    /// Sensors whose source failed this tick
    pub faults: usize,
    /// Suggested sleep before the next tick (ms)
    pub idle_ms: u32,
}

/// Run/pause control loop
pub struct ControlLoop<P: Platform, R, S> {
    sensors: SensorList<P>,
    display: R,
    store: S,
    settings: Settings,
    state: State,
    events: Deque<Event, EVENT_QUEUE_SIZE>,
    paused_shown: bool,
}

impl<P, R, S> ControlLoop<P, R, S>
where
    P: Platform,
    R: DisplayRenderer,
    S: ConfigStore,
{
    /// Load the settings and pick the initial state
    ///
    /// A store that cannot be read means defaults for every key.
    pub fn new(sensors: SensorList<P>, display: R, mut store: S) -> Self {
        let settings = match store.load() {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Settings unavailable ({:?}), using defaults", e);
                Settings::default()
            }
        };
        let state = State::from_enabled(settings.enabled());
        info!("Starting {:?} with {} sensors", state, sensors.len());

        Self {
            sensors,
            display,
            store,
            settings,
            state,
            events: Deque::new(),
            paused_shown: false,
        }
    }

    /// Startup sequence: splash, bus scan, activation
    ///
    /// The scanner logs one status line per sensor.
    pub fn boot<B: I2cBus>(&mut self, bus: &mut B) -> PresentDevices {
        let mut splash: String<32> = String::new();
        // SCRIPT_NAME and SCRIPT_VERSION fit
        let _ = write!(splash, "{}\n{}", SCRIPT_NAME, SCRIPT_VERSION);
        if let Err(e) = self.display.show_message(&splash) {
            warn!("Splash failed: {:?}", e);
        }

        let present = scanner::scan(bus);
        let activated = scanner::activate_present(&mut self.sensors, &present, &self.settings);
        info!("{} of {} sensors active", activated, self.sensors.len());

        present
    }

    /// Queue an event for the next tick
    ///
    /// Gives the event back when the queue is full.
    pub fn post(&mut self, event: Event) -> Result<(), Event> {
        self.events.push_back(event)
    }

    /// Run one iteration of the loop
    pub fn tick(&mut self, now_ms: u32) -> TickReport {
        while let Some(event) = self.events.pop_front() {
            self.handle_event(event);
        }

        match self.state {
            State::Running => self.run(now_ms),
            State::Paused => self.idle(),
        }
    }

    fn handle_event(&mut self, event: Event) {
        let next = self.state.transition(event);
        if next == self.state {
            return;
        }

        info!("{:?} -> {:?}", self.state, next);
        self.state = next;
        self.paused_shown = false;

        if let Err(e) = self.settings.set_enabled(next.is_enabled()) {
            warn!("Cannot record enabled flag: {:?}", e);
        }
        if let Err(e) = self.store.save(&self.settings) {
            warn!("Failed to save settings: {:?}", e);
        }
    }

    fn run(&mut self, now_ms: u32) -> TickReport {
        let mut updated = 0;
        let mut faults = 0;

        for sensor in self.sensors.iter_mut() {
            match sensor.update(now_ms) {
                Ok(Some(_)) => updated += 1,
                Ok(None) => {}
                Err(e) => {
                    warn!("{} read failed: {:?}", sensor.identity().name, e);
                    faults += 1;
                }
            }
        }

        if let Err(e) = self.render_summaries() {
            warn!("Display refresh failed: {:?}", e);
        }

        TickReport {
            state: State::Running,
            updated,
            faults,
            idle_ms: 0,
        }
    }

    fn render_summaries(&mut self) -> Result<(), DisplayError> {
        self.display.clear()?;
        for sensor in self.sensors.iter() {
            sensor.render_summary(&mut self.display)?;
        }
        self.display.present()
    }

    fn idle(&mut self) -> TickReport {
        if !self.paused_shown {
            match self.display.show_message(PAUSED_TEXT) {
                Ok(()) => self.paused_shown = true,
                Err(e) => warn!("Paused screen failed: {:?}", e),
            }
        }

        TickReport {
            state: State::Paused,
            updated: 0,
            faults: 0,
            idle_ms: PAUSED_IDLE_MS,
        }
    }

    /// Current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Settings in effect (including the `enabled` flag)
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Sensors in index order
    pub fn sensors(&self) -> &[Sensor<P>] {
        &self.sensors
    }

    /// Sensor at `index`, mutably
    pub fn sensor_mut(&mut self, index: usize) -> Option<&mut Sensor<P>> {
        self.sensors.get_mut(index)
    }

    /// Events waiting for the next tick
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Renderer
    pub fn display(&self) -> &R {
        &self.display
    }

    /// Renderer, mutably
    pub fn display_mut(&mut self) -> &mut R {
        &mut self.display
    }

    /// Settings store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Settings store, mutably
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
