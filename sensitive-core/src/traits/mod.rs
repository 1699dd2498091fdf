//! Hardware abstraction traits
//!
//! These traits define the interface between the sensor pipeline and
//! the board-specific collaborators it drives or consumes.

pub mod display;
pub mod output;
pub mod source;

pub use display::{
    DisplayError, DisplayExt, DisplayRenderer, CHAR_WIDTH, DISPLAY_HEIGHT, DISPLAY_WIDTH, LINE_HEIGHT,
};
pub use output::{AnalogOutput, GateOutput};
pub use source::{DistanceSource, LaserSource, LightSource, SourceError, VcselPeriod};
