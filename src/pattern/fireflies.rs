//! Fireflies
//!
//! Every pixel flashes on its own random schedule: it waits a random delay,
//! eases up to full brightness over the first half of the flash, eases back
//! down over the second half and then schedules its next flash.

use embassy_time::{Duration, Instant};
use heapless::Vec;

use super::params::{clamp_u8, clamp_u16};
use super::{ParamError, ParamKey, Pattern, PatternId, RenderContext};
use crate::{
    buffer::PixelBuffer,
    color::{Hsv, hsv2rgb},
    math8::ease8_in_out_approx,
    rng::Xorshift32,
};

const DEFAULT_MIN_DELAY_MS: u16 = 1000;
const DEFAULT_MAX_DELAY_MS: u16 = 5000;
const DEFAULT_FLASH_LENGTH_MS: u16 = 2500;
const DEFAULT_HUE: u8 = 160;
const DEFAULT_BRIGHTNESS: u8 = 255;

const MAX_FLASH_LENGTH_MS: u16 = 32_767;

/// Brightness of a flash `elapsed_ms` after it started
///
/// Rises over the first half of `length_ms`, peaks at the middle and falls
/// back to zero at the end. Outside the flash the level is zero.
#[allow(clippy::cast_possible_truncation)]
pub fn flash_level(elapsed_ms: u64, length_ms: u64) -> u8 {
    let half = length_ms / 2;
    if half == 0 || elapsed_ms > length_ms {
        return 0;
    }
    let ramp = if elapsed_ms > half {
        (255 * (length_ms - elapsed_ms)) / half
    } else {
        (255 * elapsed_ms) / half
    };
    ease8_in_out_approx(ramp.min(255) as u8)
}

/// Fireflies pattern
///
/// `N` is the maximum number of LEDs; the schedule holds one entry per
/// pixel on the string.
#[derive(Debug, Clone)]
pub struct FirefliesPattern<const N: usize> {
    min_delay_ms: u16,
    max_delay_ms: u16,
    flash_length_ms: u16,
    hue: u8,
    brightness: u8,
    next_flash: Vec<Instant, N>,
    rng: Xorshift32,
    stale: bool,
}

impl<const N: usize> FirefliesPattern<N> {
    pub const fn new(seed: u32) -> Self {
        Self {
            min_delay_ms: DEFAULT_MIN_DELAY_MS,
            max_delay_ms: DEFAULT_MAX_DELAY_MS,
            flash_length_ms: DEFAULT_FLASH_LENGTH_MS,
            hue: DEFAULT_HUE,
            brightness: DEFAULT_BRIGHTNESS,
            next_flash: Vec::new(),
            rng: Xorshift32::new(seed),
            stale: true,
        }
    }

    #[must_use]
    pub fn with_delays(mut self, min_ms: u16, max_ms: u16) -> Self {
        self.min_delay_ms = min_ms;
        self.max_delay_ms = max_ms;
        self.stale = true;
        self
    }

    #[must_use]
    pub fn with_flash_length(mut self, length_ms: u16) -> Self {
        self.flash_length_ms = length_ms.min(MAX_FLASH_LENGTH_MS);
        self.stale = true;
        self
    }

    #[must_use]
    pub fn with_hue(mut self, hue: u8) -> Self {
        self.hue = hue;
        self
    }

    /// Scheduled start of the next flash of a pixel
    pub fn next_flash(&self, index: usize) -> Option<Instant> {
        self.next_flash.get(index).copied()
    }

    /// Number of pixels with a schedule entry
    pub fn scheduled(&self) -> usize {
        self.next_flash.len()
    }

    pub fn flash_length(&self) -> Duration {
        Duration::from_millis(u64::from(self.flash_length_ms))
    }

    /// Reschedule every pixel of a string with `count` pixels
    pub fn reset(&mut self, now: Instant, count: usize) {
        self.next_flash.clear();
        for _ in 0..count.min(N) {
            let at = now + self.flash_delay();
            // Capacity is N and count is capped at N
            let _ = self.next_flash.push(at);
        }
        self.stale = false;
    }

    fn flash_delay(&mut self) -> Duration {
        let delay = self.rng.range_u16(self.min_delay_ms, self.max_delay_ms);
        Duration::from_millis(u64::from(delay))
    }
}

impl<const N: usize> Pattern for FirefliesPattern<N> {
    fn render<const M: usize>(&mut self, ctx: &RenderContext<'_>, leds: &mut PixelBuffer<M>) {
        let now = ctx.now;
        if self.stale || self.next_flash.len() != leds.len().min(N) {
            self.reset(now, leds.len());
        }

        let length_ms = u64::from(self.flash_length_ms);
        for i in 0..self.next_flash.len() {
            let scheduled = self.next_flash[i];
            let value = match now.checked_duration_since(scheduled) {
                None => 0,
                Some(elapsed) if elapsed.as_millis() > length_ms => {
                    let delay = self.flash_delay();
                    self.next_flash[i] = now + delay;
                    0
                }
                Some(elapsed) => flash_level(elapsed.as_millis(), length_ms),
            };
            leds.set(
                i,
                hsv2rgb(Hsv {
                    hue: self.hue,
                    sat: 255,
                    val: value,
                }),
            );
        }
    }

    fn on_enter(&mut self, _now: Instant) {
        self.stale = true;
    }

    fn output_brightness(&self) -> u8 {
        self.brightness
    }

    fn set_param(&mut self, key: ParamKey, value: i32) -> Result<(), ParamError> {
        match key {
            ParamKey::MinDelay => {
                self.min_delay_ms = clamp_u16(value, u16::MAX);
                self.stale = true;
            }
            ParamKey::MaxDelay => {
                self.max_delay_ms = clamp_u16(value, u16::MAX);
                self.stale = true;
            }
            ParamKey::FlashLength => {
                self.flash_length_ms = clamp_u16(value, MAX_FLASH_LENGTH_MS);
                self.stale = true;
            }
            ParamKey::Hue => self.hue = clamp_u8(value),
            ParamKey::Brightness => self.brightness = clamp_u8(value),
            _ => {
                return Err(ParamError::NotApplicable {
                    pattern: PatternId::Fireflies,
                    key,
                });
            }
        }
        Ok(())
    }
}
