//! `DisplayRenderer` over an embedded-graphics draw target

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use sensitive_core::traits::{DisplayError, DisplayRenderer};

/// Push a buffered frame to the panel
///
/// Buffered OLED drivers draw into RAM and need an explicit flush; the
/// renderer calls it from [`DisplayRenderer::present`].
pub trait Flush {
    /// Error type of the panel transfer
    type Error;

    /// Send the buffer contents to the panel
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Renderer for a monochrome panel
pub struct GraphicsRenderer<T> {
    target: T,
    text_style: MonoTextStyle<'static, BinaryColor>,
    frames: u32,
}

impl<T> GraphicsRenderer<T>
where
    T: DrawTarget<Color = BinaryColor> + Flush,
{
    /// Wrap a draw target
    pub fn new(target: T) -> Self {
        let text_style = MonoTextStyleBuilder::new()
            .font(&FONT_6X10)
            .text_color(BinaryColor::On)
            .build();

        Self {
            target,
            text_style,
            frames: 0,
        }
    }

    /// Frames presented so far
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Access the draw target
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Access the draw target mutably
    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    /// Give back the draw target
    pub fn into_target(self) -> T {
        self.target
    }

    fn origin(&self, x: u16, y: u16) -> Result<Point, DisplayError> {
        let point = Point::new(i32::from(x), i32::from(y));
        if self.target.bounding_box().contains(point) {
            Ok(point)
        } else {
            Err(DisplayError::InvalidCoordinates)
        }
    }
}

impl<T> DisplayRenderer for GraphicsRenderer<T>
where
    T: DrawTarget<Color = BinaryColor> + Flush,
{
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.target
            .clear(BinaryColor::Off)
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_text(&mut self, x: u16, y: u16, text: &str) -> Result<(), DisplayError> {
        let origin = self.origin(x, y)?;
        Text::with_baseline(text, origin, self.text_style, Baseline::Top)
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)?;
        Ok(())
    }

    fn draw_filled_rect(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    ) -> Result<(), DisplayError> {
        let origin = self.origin(x, y)?;
        Rectangle::new(origin, Size::new(u32::from(width), u32::from(height)))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        self.target
            .flush()
            .map_err(|_| DisplayError::Communication)?;
        self.frames = self.frames.wrapping_add(1);
        Ok(())
    }
}
