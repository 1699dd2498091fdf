//! Run/pause state machine
//!
//! The script is either running (sensors polled and outputs driven every
//! tick) or paused (outputs held). A toggle flips between the two.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::State;
