//! Bell curve
//!
//! Every zone gets a brightness profile that peaks in its middle and tapers
//! towards both ends.

use super::params::clamp_u8;
use super::{ParamError, ParamKey, Pattern, PatternId, RenderContext};
use crate::{
    buffer::PixelBuffer,
    color::{Rgb, scale_color_video},
    math8::cubicwave8,
    topology::Zone,
};

const DEFAULT_COLOR: Rgb = Rgb {
    r: 128,
    g: 128,
    b: 128,
};

#[derive(Debug, Clone)]
pub struct BellCurvePattern {
    color: Rgb,
}

impl Default for BellCurvePattern {
    fn default() -> Self {
        Self::new(DEFAULT_COLOR)
    }
}

impl BellCurvePattern {
    pub const fn new(color: Rgb) -> Self {
        Self { color }
    }

    pub const fn color(&self) -> Rgb {
        self.color
    }

    /// Brightness of pixel `index` in a zone of `len` pixels
    #[allow(clippy::cast_possible_truncation)]
    pub fn level(index: usize, len: usize) -> u8 {
        if len == 0 {
            return 0;
        }
        let position = (index.min(len) * 255) / len;
        cubicwave8(position as u8)
    }
}

impl Pattern for BellCurvePattern {
    fn render<const N: usize>(&mut self, ctx: &RenderContext<'_>, leds: &mut PixelBuffer<N>) {
        for zone in Zone::ALL {
            let indices = ctx.topology.zone(zone);
            for (i, &led) in indices.iter().enumerate() {
                let level = Self::level(i, indices.len());
                leds.set(usize::from(led), scale_color_video(self.color, level));
            }
        }
    }

    fn set_param(&mut self, key: ParamKey, value: i32) -> Result<(), ParamError> {
        match key {
            ParamKey::Red => self.color.r = clamp_u8(value),
            ParamKey::Green => self.color.g = clamp_u8(value),
            ParamKey::Blue => self.color.b = clamp_u8(value),
            _ => {
                return Err(ParamError::NotApplicable {
                    pattern: PatternId::BellCurve,
                    key,
                });
            }
        }
        Ok(())
    }
}
