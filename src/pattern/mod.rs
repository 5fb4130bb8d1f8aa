//! Pattern system with compile-time known pattern variants
//!
//! Every pattern lives for the whole engine lifetime inside a
//! [`PatternSet`], so parameters and counters survive mode switches.
//! Each pattern implements the `Pattern` trait.

mod bell_curve;
mod clock;
mod colour;
mod fireflies;
mod night_rider;
pub mod params;
mod rainbow;

use embassy_time::Instant;
use heapless::String;

pub use bell_curve::BellCurvePattern;
pub use clock::{ClockPattern, HandLevels, hand_levels};
pub use colour::ColourPattern;
pub use fireflies::{FirefliesPattern, flash_level};
pub use night_rider::{NightRiderPattern, Scanner};
pub use params::{ModeDescriptor, ParamError, ParamKey};
pub use rainbow::RainbowPattern;

use crate::buffer::PixelBuffer;
use crate::topology::Topology;

const PATTERN_NAME_COLOUR: &str = "Colour";
const PATTERN_NAME_RAINBOW: &str = "Rainbow";
const PATTERN_NAME_CLOCK: &str = "Clock";
const PATTERN_NAME_BELL_CURVE: &str = "Bell Curve";
const PATTERN_NAME_NIGHT_RIDER: &str = "Night Rider";
const PATTERN_NAME_FIREFLIES: &str = "Fireflies";

const PATTERN_ID_COLOUR: u8 = 0;
const PATTERN_ID_RAINBOW: u8 = 1;
const PATTERN_ID_CLOCK: u8 = 2;
const PATTERN_ID_BELL_CURVE: u8 = 3;
const PATTERN_ID_NIGHT_RIDER: u8 = 4;
const PATTERN_ID_FIREFLIES: u8 = 5;

/// Maximum length of a mode name accepted from the configuration layer
pub const MODE_NAME_LEN: usize = 24;

/// Mode name as received from the configuration layer
pub type ModeName = String<MODE_NAME_LEN>;

/// Everything a pattern may read while rendering
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Monotonic time of the current tick
    pub now: Instant,
    /// Local wall-clock seconds since the epoch, `None` until time is synced
    pub wall_clock: Option<u64>,
    /// Lamp layout
    pub topology: &'a Topology,
}

pub trait Pattern {
    /// Render a single frame into the canvas
    ///
    /// The canvas keeps its content between frames; patterns that draw
    /// trails rely on that.
    fn render<const N: usize>(&mut self, ctx: &RenderContext<'_>, leds: &mut PixelBuffer<N>);

    /// Called when the pattern becomes the rendered mode
    fn on_enter(&mut self, _now: Instant) {}

    /// Brightness handed to the output driver next to the frame
    fn output_brightness(&self) -> u8 {
        255
    }

    /// Update one parameter, clamping its value
    fn set_param(&mut self, key: ParamKey, value: i32) -> Result<(), ParamError>;
}

/// Known pattern ids that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PatternId {
    Colour = PATTERN_ID_COLOUR,
    Rainbow = PATTERN_ID_RAINBOW,
    Clock = PATTERN_ID_CLOCK,
    BellCurve = PATTERN_ID_BELL_CURVE,
    NightRider = PATTERN_ID_NIGHT_RIDER,
    Fireflies = PATTERN_ID_FIREFLIES,
}

impl PatternId {
    pub const ALL: [PatternId; 6] = [
        Self::Colour,
        Self::Rainbow,
        Self::Clock,
        Self::BellCurve,
        Self::NightRider,
        Self::Fireflies,
    ];

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            PATTERN_ID_COLOUR => Self::Colour,
            PATTERN_ID_RAINBOW => Self::Rainbow,
            PATTERN_ID_CLOCK => Self::Clock,
            PATTERN_ID_BELL_CURVE => Self::BellCurve,
            PATTERN_ID_NIGHT_RIDER => Self::NightRider,
            PATTERN_ID_FIREFLIES => Self::Fireflies,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Colour => PATTERN_NAME_COLOUR,
            Self::Rainbow => PATTERN_NAME_RAINBOW,
            Self::Clock => PATTERN_NAME_CLOCK,
            Self::BellCurve => PATTERN_NAME_BELL_CURVE,
            Self::NightRider => PATTERN_NAME_NIGHT_RIDER,
            Self::Fireflies => PATTERN_NAME_FIREFLIES,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            PATTERN_NAME_COLOUR => Some(Self::Colour),
            PATTERN_NAME_RAINBOW => Some(Self::Rainbow),
            PATTERN_NAME_CLOCK => Some(Self::Clock),
            PATTERN_NAME_BELL_CURVE => Some(Self::BellCurve),
            PATTERN_NAME_NIGHT_RIDER => Some(Self::NightRider),
            PATTERN_NAME_FIREFLIES => Some(Self::Fireflies),
            _ => None,
        }
    }
}

/// Persistent counters of the stateful patterns, for status reporting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternCounters {
    /// Accumulated rainbow hue offset (0-255)
    pub rainbow_offset: f32,
    /// Clock "waiting for time" brightness counter
    pub clock_pause_counter: u8,
    /// Night rider top scanner
    pub night_rider_top: Scanner,
    /// Night rider bottom scanner
    pub night_rider_bottom: Scanner,
    /// Number of pixels with a scheduled firefly flash
    pub fireflies_scheduled: usize,
}

/// All patterns of the lamp
///
/// `N` is the maximum number of LEDs.
#[derive(Debug, Clone)]
pub struct PatternSet<const N: usize> {
    pub colour: ColourPattern,
    pub rainbow: RainbowPattern,
    pub clock: ClockPattern,
    pub bell_curve: BellCurvePattern,
    pub night_rider: NightRiderPattern,
    pub fireflies: FirefliesPattern<N>,
}

impl<const N: usize> PatternSet<N> {
    /// Create all patterns with their default parameters
    pub fn new(seed: u32) -> Self {
        Self {
            colour: ColourPattern::default(),
            rainbow: RainbowPattern::default(),
            clock: ClockPattern::default(),
            bell_curve: BellCurvePattern::default(),
            night_rider: NightRiderPattern::default(),
            fireflies: FirefliesPattern::new(seed),
        }
    }

    /// Render the given pattern
    pub fn render(&mut self, id: PatternId, ctx: &RenderContext<'_>, leds: &mut PixelBuffer<N>) {
        match id {
            PatternId::Colour => self.colour.render(ctx, leds),
            PatternId::Rainbow => self.rainbow.render(ctx, leds),
            PatternId::Clock => self.clock.render(ctx, leds),
            PatternId::BellCurve => self.bell_curve.render(ctx, leds),
            PatternId::NightRider => self.night_rider.render(ctx, leds),
            PatternId::Fireflies => self.fireflies.render(ctx, leds),
        }
    }

    /// Notify the pattern that it became the rendered mode
    pub fn enter(&mut self, id: PatternId, now: Instant) {
        match id {
            PatternId::Colour => self.colour.on_enter(now),
            PatternId::Rainbow => self.rainbow.on_enter(now),
            PatternId::Clock => self.clock.on_enter(now),
            PatternId::BellCurve => self.bell_curve.on_enter(now),
            PatternId::NightRider => self.night_rider.on_enter(now),
            PatternId::Fireflies => self.fireflies.on_enter(now),
        }
    }

    /// Output brightness requested by the given pattern
    pub fn output_brightness(&self, id: PatternId) -> u8 {
        match id {
            PatternId::Colour => self.colour.output_brightness(),
            PatternId::Rainbow => self.rainbow.output_brightness(),
            PatternId::Clock => self.clock.output_brightness(),
            PatternId::BellCurve => self.bell_curve.output_brightness(),
            PatternId::NightRider => self.night_rider.output_brightness(),
            PatternId::Fireflies => self.fireflies.output_brightness(),
        }
    }

    /// Update a parameter of the given pattern
    pub fn set_param(&mut self, id: PatternId, key: ParamKey, value: i32) -> Result<(), ParamError> {
        match id {
            PatternId::Colour => self.colour.set_param(key, value),
            PatternId::Rainbow => self.rainbow.set_param(key, value),
            PatternId::Clock => self.clock.set_param(key, value),
            PatternId::BellCurve => self.bell_curve.set_param(key, value),
            PatternId::NightRider => self.night_rider.set_param(key, value),
            PatternId::Fireflies => self.fireflies.set_param(key, value),
        }
    }

    /// Snapshot of the persistent pattern counters
    pub fn counters(&self) -> PatternCounters {
        PatternCounters {
            rainbow_offset: self.rainbow.offset(),
            clock_pause_counter: self.clock.pause_counter(),
            night_rider_top: self.night_rider.top(),
            night_rider_bottom: self.night_rider.bottom(),
            fireflies_scheduled: self.fireflies.scheduled(),
        }
    }
}
