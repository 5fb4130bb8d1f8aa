//! Solid colour fill
//!
//! Fills all LEDs with a single colour.

use super::params::clamp_u8;
use super::{ParamError, ParamKey, Pattern, PatternId, RenderContext};
use crate::{buffer::PixelBuffer, color::Rgb};

const DEFAULT_COLOR: Rgb = Rgb {
    r: 128,
    g: 128,
    b: 128,
};

/// Solid colour pattern - fills all LEDs with one colour
#[derive(Debug, Clone)]
pub struct ColourPattern {
    color: Rgb,
}

impl Default for ColourPattern {
    fn default() -> Self {
        Self::new(DEFAULT_COLOR)
    }
}

impl ColourPattern {
    pub const fn new(color: Rgb) -> Self {
        Self { color }
    }

    pub const fn color(&self) -> Rgb {
        self.color
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }
}

impl Pattern for ColourPattern {
    fn render<const N: usize>(&mut self, _ctx: &RenderContext<'_>, leds: &mut PixelBuffer<N>) {
        leds.fill(self.color);
    }

    fn set_param(&mut self, key: ParamKey, value: i32) -> Result<(), ParamError> {
        match key {
            ParamKey::Red => self.color.r = clamp_u8(value),
            ParamKey::Green => self.color.g = clamp_u8(value),
            ParamKey::Blue => self.color.b = clamp_u8(value),
            _ => {
                return Err(ParamError::NotApplicable {
                    pattern: PatternId::Colour,
                    key,
                });
            }
        }
        Ok(())
    }
}
