//! Run/pause button
//!
//! The button is sampled once per tick. A lockout debouncer accepts a level
//! change only when the previous accepted change is at least
//! [`TOGGLE_DEBOUNCE_MS`] old, so contact bounce on press and release never
//! produces a second toggle.

use sensitive_hal::gpio::InputPin;

use crate::state::Event;

/// Lockout after an accepted level change (ms)
pub const TOGGLE_DEBOUNCE_MS: u32 = 200;

/// Lockout debouncer producing [`Event::Toggle`] on each press
#[derive(Debug, Clone)]
pub struct Debouncer {
    lockout_ms: u32,
    level: bool,
    last_change_ms: Option<u32>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(TOGGLE_DEBOUNCE_MS)
    }
}

impl Debouncer {
    /// Create a debouncer with the line idle (released)
    pub fn new(lockout_ms: u32) -> Self {
        Self {
            lockout_ms,
            level: false,
            last_change_ms: None,
        }
    }

    /// Feed one raw sample; `pressed` is the logical button level
    pub fn sample(&mut self, pressed: bool, now_ms: u32) -> Option<Event> {
        if pressed == self.level {
            return None;
        }

        if let Some(last) = self.last_change_ms {
            if now_ms.wrapping_sub(last) < self.lockout_ms {
                return None;
            }
        }

        self.level = pressed;
        self.last_change_ms = Some(now_ms);

        if pressed {
            trace!("Toggle pressed at {} ms", now_ms);
            Some(Event::Toggle)
        } else {
            None
        }
    }

    /// Debounced level
    pub fn is_pressed(&self) -> bool {
        self.level
    }
}

/// Debounced button on a digital input
pub struct ToggleButton<P> {
    pin: P,
    debouncer: Debouncer,
}

impl<P: InputPin> ToggleButton<P> {
    /// Wrap a pin that reads high while the button is pressed
    ///
    /// Wrap active-low buttons in [`sensitive_hal::gpio::ActiveLow`].
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            debouncer: Debouncer::default(),
        }
    }

    /// Sample the pin
    pub fn poll(&mut self, now_ms: u32) -> Option<Event> {
        let pressed = self.pin.is_high();
        self.debouncer.sample(pressed, now_ms)
    }

    /// Give back the pin
    pub fn into_pin(self) -> P {
        self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensitive_hal::gpio::ActiveLow;

    struct Line(bool);

    impl InputPin for Line {
        fn is_high(&mut self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_press_emits_toggle() {
        let mut debouncer = Debouncer::default();
        assert_eq!(debouncer.sample(false, 0), None);
        assert_eq!(debouncer.sample(true, 10), Some(Event::Toggle));
        assert!(debouncer.is_pressed());
    }

    #[test]
    fn test_release_is_silent() {
        let mut debouncer = Debouncer::default();
        debouncer.sample(true, 0);
        assert_eq!(debouncer.sample(false, 500), None);
        assert!(!debouncer.is_pressed());
    }

    #[test]
    fn test_bounce_is_suppressed() {
        let mut debouncer = Debouncer::default();
        let mut toggles = 0;

        // Press bounce, long hold, release bounce
        let samples = [
            (true, 1000),
            (false, 1002),
            (true, 1004),
            (false, 1500),
            (true, 1502),
            (false, 1504),
            (false, 1800),
        ];
        for (level, now) in samples {
            if debouncer.sample(level, now).is_some() {
                toggles += 1;
            }
        }

        assert_eq!(toggles, 1);
        assert!(!debouncer.is_pressed());
    }

    #[test]
    fn test_second_press_after_lockout() {
        let mut debouncer = Debouncer::default();
        assert!(debouncer.sample(true, 0).is_some());
        assert!(debouncer.sample(false, TOGGLE_DEBOUNCE_MS).is_none());
        assert!(debouncer.sample(true, TOGGLE_DEBOUNCE_MS + 50).is_none());
        assert!(debouncer.sample(true, 2 * TOGGLE_DEBOUNCE_MS).is_some());
    }

    #[test]
    fn test_button_on_active_low_pin() {
        let mut button = ToggleButton::new(ActiveLow(Line(true)));
        assert_eq!(button.poll(0), None);

        let ActiveLow(line) = button.into_pin();
        let mut button = ToggleButton::new(ActiveLow(Line(!line.0)));
        assert_eq!(button.poll(10), Some(Event::Toggle));
    }
}
