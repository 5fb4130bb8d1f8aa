//! Night rider scanner
//!
//! A lit pixel bounces between both ends of the top and bottom zones and
//! leaves a fading trail behind it. Each zone sweeps end to end in 500 ms
//! on its own trigger.

use embassy_time::{Duration, Instant};

use super::{ParamError, ParamKey, Pattern, PatternId, RenderContext};
use crate::{buffer::PixelBuffer, color::Rgb, topology::Zone, trigger::PeriodicTrigger};

const SWEEP_MS: u64 = 500;
const TRAIL_FADE: u8 = 10;
const SCANNER_COLOR: Rgb = Rgb { r: 255, g: 0, b: 0 };

/// Position and direction of one zone scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scanner {
    /// Position within the zone
    pub position: usize,
    /// +1 or -1
    pub direction: i8,
}

impl Default for Scanner {
    fn default() -> Self {
        Self {
            position: 0,
            direction: 1,
        }
    }
}

impl Scanner {
    /// Move one step inside a zone of `len` LEDs
    ///
    /// The direction flips when the scanner lands on either end.
    pub fn advance(&mut self, len: usize) {
        if len <= 1 {
            self.position = 0;
            return;
        }
        let last = len - 1;
        self.bring_inside(last);

        self.position = if self.direction > 0 {
            self.position + 1
        } else {
            self.position - 1
        };
        if self.position == last || self.position == 0 {
            self.direction = -self.direction;
        }
    }

    /// Pull the scanner back into the zone after the zone shrank
    fn bring_inside(&mut self, last: usize) {
        if self.position >= last {
            self.position = last;
            self.direction = -1;
        } else if self.position == 0 {
            self.direction = 1;
        }
    }
}

#[derive(Debug, Clone)]
struct ZoneScanner {
    scanner: Scanner,
    step: PeriodicTrigger,
    stepped_at: Option<Instant>,
}

impl ZoneScanner {
    const fn new() -> Self {
        Self {
            scanner: Scanner {
                position: 0,
                direction: 1,
            },
            step: PeriodicTrigger::new(Duration::from_millis(SWEEP_MS)),
            stepped_at: None,
        }
    }

    fn tick<const N: usize>(&mut self, now: Instant, indices: &[u16], leds: &mut PixelBuffer<N>) {
        if indices.is_empty() {
            return;
        }
        let len = indices.len();
        self.step
            .set_interval(Duration::from_millis(SWEEP_MS / len as u64));
        // A repeated frame time never moves the scanner twice
        if self.stepped_at == Some(now) || !self.step.try_fire(now) {
            return;
        }
        self.stepped_at = Some(now);

        let position = self.scanner.position.min(len - 1);
        if let Some(&led) = indices.get(position) {
            leds.set(usize::from(led), SCANNER_COLOR);
        }
        for &led in indices {
            leds.fade_pixel_by(usize::from(led), TRAIL_FADE);
        }
        self.scanner.advance(len);
    }
}

#[derive(Debug, Clone)]
pub struct NightRiderPattern {
    top: ZoneScanner,
    bottom: ZoneScanner,
}

impl Default for NightRiderPattern {
    fn default() -> Self {
        Self {
            top: ZoneScanner::new(),
            bottom: ZoneScanner::new(),
        }
    }
}

impl NightRiderPattern {
    pub const fn top(&self) -> Scanner {
        self.top.scanner
    }

    pub const fn bottom(&self) -> Scanner {
        self.bottom.scanner
    }
}

impl Pattern for NightRiderPattern {
    fn render<const N: usize>(&mut self, ctx: &RenderContext<'_>, leds: &mut PixelBuffer<N>) {
        self.top.tick(ctx.now, ctx.topology.zone(Zone::Top), leds);
        self.bottom
            .tick(ctx.now, ctx.topology.zone(Zone::Bottom), leds);
    }

    fn on_enter(&mut self, _now: Instant) {
        self.top.step.disarm();
        self.bottom.step.disarm();
    }

    fn set_param(&mut self, key: ParamKey, _value: i32) -> Result<(), ParamError> {
        Err(ParamError::NotApplicable {
            pattern: PatternId::NightRider,
            key,
        })
    }
}
