//! State machine definition
//!
//! Output behavior is a function of the current state alone; the state
//! only changes at the start of a tick.

use super::events::Event;

/// Control loop states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Outputs held, "paused" shown
    Paused,
    /// Sensors polled and outputs driven every tick
    #[default]
    Running,
}

impl State {
    /// State matching the persisted `enabled` flag
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            State::Running
        } else {
            State::Paused
        }
    }

    /// Value of the persisted `enabled` flag for this state
    pub fn is_enabled(&self) -> bool {
        matches!(self, State::Running)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            (Running, Toggle) => Paused,
            (Paused, Toggle) => Running,
        }
    }
}
