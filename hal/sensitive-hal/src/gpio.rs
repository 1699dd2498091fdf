//! GPIO pin abstractions

/// Digital input pin
///
/// Takes `&mut self` because some ports latch on read.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&mut self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }
}

/// Input pin with inverted logic (active-low buttons)
pub struct ActiveLow<P>(pub P);

impl<P: InputPin> InputPin for ActiveLow<P> {
    fn is_high(&mut self) -> bool {
        self.0.is_low()
    }
}
