//! CV and gate output traits

/// Analog control-voltage output (a CV jack)
pub trait AnalogOutput {
    /// Drive the output to a voltage
    fn set_voltage(&mut self, volts: f32);

    /// Voltage currently driven
    fn voltage(&self) -> f32;
}

/// Digital gate output
pub trait GateOutput {
    /// Drive the gate high (`true`) or low
    fn set_digital(&mut self, level: bool);

    /// Check if the gate is currently high
    fn is_high(&self) -> bool;
}
