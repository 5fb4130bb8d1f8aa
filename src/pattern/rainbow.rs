//! Rotating rainbow
//!
//! Spreads the whole hue circle once across the string and rotates it by
//! accumulating a hue offset on a fixed 50 ms grid.

use embassy_time::{Duration, Instant};

use super::params::{clamp_u8, clamp_u16};
use super::{ParamError, ParamKey, Pattern, PatternId, RenderContext};
use crate::{
    buffer::PixelBuffer,
    color::{Hsv, hsv2rgb},
    trigger::PeriodicTrigger,
};

/// Size of the 8-bit hue circle
const HUE_CIRCLE: f32 = 255.0;

const HUE_STEP_MS: u64 = 50;
const HUE_STEP_INTERVAL: Duration = Duration::from_millis(HUE_STEP_MS);

const DEFAULT_START_HUE: u8 = 0;
const DEFAULT_SPEED_SECS: u16 = 10;
const DEFAULT_BRIGHTNESS: u8 = 100;

#[derive(Debug, Clone)]
pub struct RainbowPattern {
    /// Hue of the first pixel before rotation
    start_hue: u8,
    /// Seconds per full rotation, 0 stops the rotation
    speed_secs: u16,
    /// Output brightness
    brightness: u8,
    /// Accumulated hue offset in `[0, 255)`
    offset: f32,
    step: PeriodicTrigger,
    /// Frame time of the last step, one step per frame at most
    stepped_at: Option<Instant>,
}

impl Default for RainbowPattern {
    fn default() -> Self {
        Self {
            start_hue: DEFAULT_START_HUE,
            speed_secs: DEFAULT_SPEED_SECS,
            brightness: DEFAULT_BRIGHTNESS,
            offset: 0.0,
            step: PeriodicTrigger::new(HUE_STEP_INTERVAL),
            stepped_at: None,
        }
    }
}

impl RainbowPattern {
    #[must_use]
    pub fn with_start_hue(mut self, start_hue: u8) -> Self {
        self.start_hue = start_hue;
        self
    }

    #[must_use]
    pub fn with_speed(mut self, speed_secs: u16) -> Self {
        self.speed_secs = speed_secs;
        self
    }

    #[must_use]
    pub fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self
    }

    pub const fn start_hue(&self) -> u8 {
        self.start_hue
    }

    pub const fn offset(&self) -> f32 {
        self.offset
    }

    /// Hue added to the offset on every 50 ms step
    #[allow(clippy::cast_precision_loss)]
    pub fn hue_step(&self) -> f32 {
        if self.speed_secs == 0 {
            return 0.0;
        }
        (HUE_CIRCLE / (f32::from(self.speed_secs) * 1000.0)) * HUE_STEP_MS as f32
    }

    /// Advance the offset by one step, wrapping on the hue circle
    pub fn advance(&mut self) {
        self.offset += self.hue_step();
        if self.offset >= HUE_CIRCLE {
            self.offset -= HUE_CIRCLE;
        }
    }

    /// Hue of pixel `index` on a string of `len` pixels
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn hue_at(&self, index: usize, len: usize) -> u8 {
        if len == 0 {
            return self.start_hue;
        }
        let base = f32::from(self.start_hue) + libm::truncf(self.offset);
        let spread = HUE_CIRCLE / len as f32;
        libm::fmodf(base + spread * index as f32, HUE_CIRCLE) as u8
    }
}

impl Pattern for RainbowPattern {
    fn render<const N: usize>(&mut self, ctx: &RenderContext<'_>, leds: &mut PixelBuffer<N>) {
        if self.speed_secs > 0
            && self.stepped_at != Some(ctx.now)
            && self.step.try_fire(ctx.now)
        {
            self.stepped_at = Some(ctx.now);
            self.advance();
        }

        let len = leds.len();
        for i in 0..len {
            let color = hsv2rgb(Hsv {
                hue: self.hue_at(i, len),
                sat: 255,
                val: 255,
            });
            leds.set(i, color);
        }
    }

    fn on_enter(&mut self, _now: Instant) {
        self.step.disarm();
    }

    fn output_brightness(&self) -> u8 {
        self.brightness
    }

    fn set_param(&mut self, key: ParamKey, value: i32) -> Result<(), ParamError> {
        match key {
            ParamKey::StartHue => self.start_hue = clamp_u8(value),
            ParamKey::Speed => self.speed_secs = clamp_u16(value, u16::MAX),
            ParamKey::Brightness => self.brightness = clamp_u8(value),
            _ => {
                return Err(ParamError::NotApplicable {
                    pattern: PatternId::Rainbow,
                    key,
                });
            }
        }
        Ok(())
    }
}
