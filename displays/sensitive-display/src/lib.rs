//! OLED renderer for the Sensitive EuroPi script
//!
//! Implements the core's `DisplayRenderer` on top of any monochrome
//! `embedded-graphics` draw target, such as a buffered SSD1306 driver.
//! Text uses the 6x10 mono font so the core's layout constants line up
//! with what ends up on the panel.

#![no_std]
#![deny(unsafe_code)]

pub mod renderer;

pub use renderer::{Flush, GraphicsRenderer};
