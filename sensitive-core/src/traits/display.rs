//! Display renderer trait for the module OLED
//!
//! The EuroPi OLED is a 128x32 monochrome panel. Coordinates are pixels
//! from the top-left corner; text is positioned by its top edge.

/// Panel width in pixels
pub const DISPLAY_WIDTH: u16 = 128;

/// Panel height in pixels
pub const DISPLAY_HEIGHT: u16 = 32;

/// Glyph advance of the renderer font in pixels
pub const CHAR_WIDTH: u16 = 6;

/// Vertical distance between text lines in pixels
pub const LINE_HEIGHT: u16 = 12;

/// Errors that can occur while drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the panel
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
}

/// Frame-oriented renderer
///
/// Draw calls compose an off-screen frame; [`DisplayRenderer::present`]
/// pushes it to the panel.
pub trait DisplayRenderer {
    /// Clear the frame
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text with its top-left corner at (`x`, `y`)
    fn draw_text(&mut self, x: u16, y: u16, text: &str) -> Result<(), DisplayError>;

    /// Fill a rectangle
    fn draw_filled_rect(&mut self, x: u16, y: u16, width: u16, height: u16)
        -> Result<(), DisplayError>;

    /// Send the frame to the panel
    fn present(&mut self) -> Result<(), DisplayError>;
}

/// Helper trait for drawing common screen elements
pub trait DisplayExt: DisplayRenderer {
    /// Draw a line of text horizontally centered on the panel
    fn draw_centered(&mut self, y: u16, text: &str) -> Result<(), DisplayError> {
        let width = (text.len() as u16).saturating_mul(CHAR_WIDTH);
        let x = DISPLAY_WIDTH.saturating_sub(width) / 2;
        self.draw_text(x, y, text)
    }

    /// Show a full-screen message, one centered line per `\n` separated part
    fn show_message(&mut self, message: &str) -> Result<(), DisplayError> {
        self.clear()?;

        let lines = message.lines().count() as u16;
        let block = lines.saturating_mul(LINE_HEIGHT);
        let mut y = DISPLAY_HEIGHT.saturating_sub(block) / 2;
        for line in message.lines() {
            self.draw_centered(y, line)?;
            y += LINE_HEIGHT;
        }

        self.present()
    }
}

// Blanket implementation for all DisplayRenderer types
impl<T: DisplayRenderer> DisplayExt for T {}
