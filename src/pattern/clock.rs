//! Clock face
//!
//! The top zone shows the hour hand over a half day, the bottom zone the
//! minute hand over an hour. A hand lights the two LEDs bracketing its
//! position, each weighted by closeness. Until wall-clock time is known both
//! zones pulse in their hand colours.

use embassy_time::{Duration, Instant};

use super::params::clamp_u8;
use super::{ParamError, ParamKey, Pattern, PatternId, RenderContext};
use crate::{
    buffer::PixelBuffer,
    color::{Rgb, scale_color},
    math8::triwave8,
    topology::Zone,
    trigger::PeriodicTrigger,
};

const HALF_DAY_SECS: u64 = 43_200;
const HOUR_SECS: u64 = 3_600;

// One pulse of the waiting animation takes 256 steps (~2 s)
const PAUSE_STEP_INTERVAL: Duration = Duration::from_millis(8);

const DEFAULT_HAND_COLOR: Rgb = Rgb {
    r: 128,
    g: 128,
    b: 128,
};

/// LEDs lit by one clock hand and their brightness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandLevels {
    /// Position in the zone of the LED the hand just passed
    pub current: usize,
    pub current_level: u8,
    /// Position in the zone of the LED the hand moves towards
    pub next: usize,
    pub next_level: u8,
}

/// Compute the bracketing LEDs of a hand
///
/// `position` is the time within `period` (both in seconds), `len` the
/// number of LEDs in the zone. Returns `None` for an empty zone.
#[allow(clippy::cast_possible_truncation)]
pub fn hand_levels(position: u64, period: u64, len: usize) -> Option<HandLevels> {
    if len == 0 {
        return None;
    }
    let len_u64 = len as u64;
    let step = (period / len_u64).max(1);
    let position = position % period.max(1);
    let gap = position % step;

    let current = ((position / step) % len_u64) as usize;
    let next = (current + 1) % len;
    Some(HandLevels {
        current,
        current_level: (((step - gap) * 255) / step) as u8,
        next,
        next_level: ((gap * 255) / step) as u8,
    })
}

#[derive(Debug, Clone)]
pub struct ClockPattern {
    hour_color: Rgb,
    minute_color: Rgb,
    /// Phase of the "waiting for time" pulse
    pause_counter: u8,
    pause_step: PeriodicTrigger,
    paused_at: Option<Instant>,
}

impl Default for ClockPattern {
    fn default() -> Self {
        Self::new(DEFAULT_HAND_COLOR, DEFAULT_HAND_COLOR)
    }
}

impl ClockPattern {
    pub const fn new(hour_color: Rgb, minute_color: Rgb) -> Self {
        Self {
            hour_color,
            minute_color,
            pause_counter: 255,
            pause_step: PeriodicTrigger::new(PAUSE_STEP_INTERVAL),
            paused_at: None,
        }
    }

    pub const fn pause_counter(&self) -> u8 {
        self.pause_counter
    }

    fn draw_hand<const N: usize>(
        leds: &mut PixelBuffer<N>,
        indices: &[u16],
        position: u64,
        period: u64,
        color: Rgb,
    ) {
        let Some(hand) = hand_levels(position, period, indices.len()) else {
            return;
        };
        // With a single LED both positions coincide and the current one wins
        if let Some(&led) = indices.get(hand.next) {
            leds.set(usize::from(led), scale_color(color, hand.next_level));
        }
        if let Some(&led) = indices.get(hand.current) {
            leds.set(usize::from(led), scale_color(color, hand.current_level));
        }
    }

    fn render_synced<const N: usize>(
        &self,
        ctx: &RenderContext<'_>,
        leds: &mut PixelBuffer<N>,
        seconds: u64,
    ) {
        leds.clear();
        Self::draw_hand(
            leds,
            ctx.topology.zone(Zone::Top),
            seconds % HALF_DAY_SECS,
            HALF_DAY_SECS,
            self.hour_color,
        );
        Self::draw_hand(
            leds,
            ctx.topology.zone(Zone::Bottom),
            seconds % HOUR_SECS,
            HOUR_SECS,
            self.minute_color,
        );
    }

    fn render_waiting<const N: usize>(&mut self, ctx: &RenderContext<'_>, leds: &mut PixelBuffer<N>) {
        if self.paused_at != Some(ctx.now) && self.pause_step.try_fire(ctx.now) {
            self.paused_at = Some(ctx.now);
            self.pause_counter = self.pause_counter.wrapping_add(1);
        }
        let level = triwave8(self.pause_counter);

        leds.clear();
        for &led in ctx.topology.zone(Zone::Top) {
            leds.set(usize::from(led), scale_color(self.hour_color, level));
        }
        for &led in ctx.topology.zone(Zone::Bottom) {
            leds.set(usize::from(led), scale_color(self.minute_color, level));
        }
    }
}

impl Pattern for ClockPattern {
    fn render<const N: usize>(&mut self, ctx: &RenderContext<'_>, leds: &mut PixelBuffer<N>) {
        match ctx.wall_clock {
            Some(seconds) => self.render_synced(ctx, leds, seconds),
            None => self.render_waiting(ctx, leds),
        }
    }

    fn on_enter(&mut self, _now: Instant) {
        self.pause_step.disarm();
    }

    fn set_param(&mut self, key: ParamKey, value: i32) -> Result<(), ParamError> {
        match key {
            ParamKey::HourRed => self.hour_color.r = clamp_u8(value),
            ParamKey::HourGreen => self.hour_color.g = clamp_u8(value),
            ParamKey::HourBlue => self.hour_color.b = clamp_u8(value),
            ParamKey::MinuteRed => self.minute_color.r = clamp_u8(value),
            ParamKey::MinuteGreen => self.minute_color.g = clamp_u8(value),
            ParamKey::MinuteBlue => self.minute_color.b = clamp_u8(value),
            ParamKey::PausedBrightness => self.pause_counter = clamp_u8(value),
            _ => {
                return Err(ParamError::NotApplicable {
                    pattern: PatternId::Clock,
                    key,
                });
            }
        }
        Ok(())
    }
}
