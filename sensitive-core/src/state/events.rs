//! Events that trigger state transitions

/// Events delivered to the control loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Debounced press of the run/pause button
    Toggle,
}
