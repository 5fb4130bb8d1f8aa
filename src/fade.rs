//! Global fade level for smooth transitions
//!
//! Handles the brightness multiplier applied to the whole frame.
//! Used for:
//! - Fade-out before a mode swap
//! - Fade-in after a mode swap
//! - Fade-out when turning off
//! - Fade-in when turning on

use embassy_time::{Duration, Instant};

use crate::trigger::PeriodicTrigger;

/// Fully dark
pub const FADE_DARK: f32 = 0.0;

/// Full brightness
pub const FADE_FULL: f32 = 255.0;

/// Default length of a full fade
pub const DEFAULT_FADE_DURATION: Duration = Duration::from_millis(200);

/// Default time between two fade steps
pub const DEFAULT_FADE_QUANTUM: Duration = Duration::from_millis(20);

// Absorbs float rounding so a fade never needs an extra quantum
const STEP_TOLERANCE: f32 = 1e-3;

/// Timing of fades
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeTimings {
    /// Length of a full 0 <-> 255 fade, zero for instant
    pub duration: Duration,
    /// Time between two fade steps
    pub quantum: Duration,
}

impl Default for FadeTimings {
    fn default() -> Self {
        Self {
            duration: DEFAULT_FADE_DURATION,
            quantum: DEFAULT_FADE_QUANTUM,
        }
    }
}

impl FadeTimings {
    /// Level change per quantum
    ///
    /// Computed from the current timings on every step so a new duration
    /// takes effect at once. Returns `None` for an instant fade.
    #[allow(clippy::cast_precision_loss)]
    pub fn step(&self) -> Option<f32> {
        let duration_ms = self.duration.as_millis();
        if duration_ms == 0 {
            return None;
        }
        let quantum_ms = self.quantum.as_millis().max(1);
        let steps = duration_ms as f32 / quantum_ms as f32;
        Some(FADE_FULL / steps)
    }
}

/// Global fade level
///
/// Moves toward its target by one fixed step per quantum and never jumps,
/// except for an instant fade with a zero duration. A fade that starts from
/// rest takes its first step right away.
#[derive(Debug, Clone)]
pub struct FadeLevel {
    level: f32,
    step: PeriodicTrigger,
    /// Frame time of the last step, one step per frame at most
    stepped_at: Option<Instant>,
}

impl FadeLevel {
    pub const fn new(level: f32) -> Self {
        Self {
            level,
            step: PeriodicTrigger::new(DEFAULT_FADE_QUANTUM),
            stepped_at: None,
        }
    }

    /// Current level in 0.0-255.0
    pub const fn level(&self) -> f32 {
        self.level
    }

    /// Current level as a frame scale factor
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn scale(&self) -> u8 {
        self.level.clamp(FADE_DARK, FADE_FULL) as u8
    }

    pub fn is_dark(&self) -> bool {
        self.level <= FADE_DARK
    }

    pub fn is_full(&self) -> bool {
        self.level >= FADE_FULL
    }

    /// Drive the level toward `target`
    ///
    /// Returns `true` once the target is reached.
    #[allow(clippy::float_cmp)]
    pub fn drive(&mut self, target: f32, now: Instant, timings: FadeTimings) -> bool {
        if self.level == target {
            return true;
        }
        let Some(step) = timings.step() else {
            self.level = target;
            return true;
        };

        if self.stepped_at == Some(now) {
            return false;
        }
        let fired = if self.step.last_fire().is_none() {
            self.step = PeriodicTrigger::armed(timings.quantum, now);
            true
        } else {
            self.step.set_interval(timings.quantum);
            self.step.try_fire(now)
        };
        if fired {
            self.stepped_at = Some(now);
            let distance = target - self.level;
            if libm::fabsf(distance) <= step + STEP_TOLERANCE {
                self.level = target;
            } else {
                self.level += libm::copysignf(step, distance);
            }
        }
        self.level == target
    }

    /// Stop stepping; the next fade starts a fresh quantum grid at its first
    /// step
    pub fn hold(&mut self) {
        self.step.disarm();
    }
}

impl Default for FadeLevel {
    fn default() -> Self {
        Self::new(FADE_DARK)
    }
}
