use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::buffer::PixelBuffer;
use crate::color::Rgb;
use crate::error::EngineError;
use crate::fade::{FADE_DARK, FADE_FULL, FadeLevel, FadeTimings};
use crate::intent_processor::{IntentProcessor, IntentReceiver, LampIntent};
use crate::pattern::{
    ModeDescriptor, ModeName, ParamError, ParamKey, PatternCounters, PatternId, PatternSet,
    RenderContext,
};
use crate::topology::{Topology, TopologyError};

/// Why the lamp is fading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeReason {
    /// Swapping the rendered pattern
    ModeChange,
    /// Turning the lamp on or off
    Power,
}

/// What the lamp is doing right now
///
/// Exactly one phase holds at a time. The steady phases only hold while the
/// fade level sits on the matching boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LampPhase {
    /// Dark and meant to stay dark
    Off,
    /// Lit at full fade level
    SteadyOn,
    FadingOut(FadeReason),
    FadingIn(FadeReason),
}

/// Requested and applied lamp state
#[derive(Debug, Clone, Copy)]
struct LampState {
    target_mode: PatternId,
    rendered_mode: PatternId,
    /// Equals `rendered_mode` once the fade-in after a swap finished
    settled_mode: PatternId,
    target_on: bool,
    rendered_on: bool,
    phase: LampPhase,
}

/// Configuration for the renderer
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub mode: PatternId,
    pub power: bool,
    pub timings: FadeTimings,
    pub topology: Topology,
    /// Seed for the fireflies schedule
    pub seed: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: PatternId::Colour,
            power: true,
            timings: FadeTimings::default(),
            topology: Topology::lamp(),
            seed: 0x5eed_1a4b,
        }
    }
}

/// One composed frame, ready for the output driver
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Pixels scaled by the fade level
    pub pixels: &'a [Rgb],
    /// Output brightness requested by the rendered pattern
    pub brightness: u8,
}

/// Read-only view of the renderer state for status reporting
#[derive(Debug, Clone, PartialEq)]
pub struct EngineStatus {
    pub target_mode: PatternId,
    pub rendered_mode: PatternId,
    pub phase: LampPhase,
    pub fade_level: u8,
    pub target_on: bool,
    pub rendered_on: bool,
    pub fade_duration: Duration,
    pub counters: PatternCounters,
    pub last_error: Option<EngineError>,
}

/// Lamp renderer - the mode state machine and compositor
pub struct Renderer<'a, const MAX_LEDS: usize, const INTENT_CHANNEL_SIZE: usize> {
    // External dependencies and configuration
    intent_processor: IntentProcessor<'a, INTENT_CHANNEL_SIZE>,
    timings: FadeTimings,
    topology: Topology,

    // Internal state
    state: LampState,
    fade: FadeLevel,
    patterns: PatternSet<MAX_LEDS>,
    canvas: PixelBuffer<MAX_LEDS>,
    frame: PixelBuffer<MAX_LEDS>,
    last_error: Option<EngineError>,
}

impl<'a, const MAX_LEDS: usize, const INTENT_CHANNEL_SIZE: usize>
    Renderer<'a, MAX_LEDS, INTENT_CHANNEL_SIZE>
{
    /// Create a dark renderer
    ///
    /// The lamp starts off at fade level 0 and fades in on the first frames
    /// when `config.power` is set.
    pub fn new(
        intents: IntentReceiver<'a, INTENT_CHANNEL_SIZE>,
        config: &EngineConfig,
    ) -> Result<Self, TopologyError> {
        config.topology.check_capacity(MAX_LEDS)?;
        let led_count = config.topology.led_count();
        Ok(Self {
            intent_processor: IntentProcessor::new(intents),
            timings: config.timings,
            topology: config.topology.clone(),
            state: LampState {
                target_mode: config.mode,
                rendered_mode: config.mode,
                settled_mode: config.mode,
                target_on: config.power,
                rendered_on: false,
                phase: LampPhase::Off,
            },
            fade: FadeLevel::new(FADE_DARK),
            patterns: PatternSet::new(config.seed),
            canvas: PixelBuffer::new(led_count),
            frame: PixelBuffer::new(led_count),
            last_error: None,
        })
    }

    /// Process one frame
    ///
    /// This is the main render loop step. Call it as often as the loop
    /// allows; all timing is derived from `now`. `wall_clock` is the local
    /// time of day in seconds since the epoch, or `None` until it is known.
    pub fn render(&mut self, now: Instant, wall_clock: Option<u64>) -> Frame<'_> {
        self.process_intents();
        self.advance(now);

        let ctx = RenderContext {
            now,
            wall_clock,
            topology: &self.topology,
        };
        self.patterns
            .render(self.state.rendered_mode, &ctx, &mut self.canvas);
        self.canvas.scaled_into(&mut self.frame, self.fade.scale());

        Frame {
            pixels: self.frame.as_slice(),
            brightness: self.patterns.output_brightness(self.state.rendered_mode),
        }
    }

    /// Request a pattern
    pub fn set_target_mode(&mut self, mode: PatternId) {
        self.state.target_mode = mode;
    }

    /// Request a pattern by its display name
    ///
    /// An unknown name keeps the current target and is recorded as the last
    /// error.
    pub fn request_mode_by_name(&mut self, name: &str) -> Result<PatternId, EngineError> {
        match PatternId::parse_from_str(name) {
            Some(mode) => {
                self.set_target_mode(mode);
                Ok(mode)
            }
            None => {
                #[cfg(feature = "esp32-log")]
                println!("[Renderer.request_mode_by_name] unknown mode {:?}", name);
                let mut truncated = ModeName::new();
                for ch in name.chars() {
                    if truncated.push(ch).is_err() {
                        break;
                    }
                }
                Err(self.report(EngineError::UnknownMode(truncated)))
            }
        }
    }

    /// Apply the parameters of a descriptor, then request its pattern
    ///
    /// Rejected parameters are reported; the remaining ones and the mode
    /// request still apply. Returns the last rejection, if any.
    pub fn apply_descriptor(&mut self, descriptor: &ModeDescriptor) -> Result<(), EngineError> {
        let mut result = Ok(());
        for &(key, value) in &descriptor.params {
            if let Err(err) = self.set_param(descriptor.id, key, value) {
                result = Err(err);
            }
        }
        self.set_target_mode(descriptor.id);
        result
    }

    /// Update one pattern parameter; out-of-range values are clamped
    pub fn set_param(
        &mut self,
        pattern: PatternId,
        key: ParamKey,
        value: i32,
    ) -> Result<(), EngineError> {
        self.patterns
            .set_param(pattern, key, value)
            .map_err(|err| self.report(err.into()))
    }

    /// Update one pattern parameter addressed by its web UI name
    pub fn set_param_by_name(
        &mut self,
        pattern: PatternId,
        name: &str,
        value: i32,
    ) -> Result<(), EngineError> {
        let Some(key) = ParamKey::parse_from_str(name) else {
            return Err(self.report(ParamError::UnknownKey.into()));
        };
        self.set_param(pattern, key, value)
    }

    /// Request the lamp on or off
    pub fn set_power(&mut self, on: bool) {
        self.state.target_on = on;
    }

    /// Change the fade duration; applies to the fade in progress
    pub fn set_fade_duration(&mut self, duration: Duration) {
        self.timings.duration = duration;
    }

    /// Replace the lamp layout
    ///
    /// The canvas is cleared and resized; stateful patterns re-initialize on
    /// their next frame.
    pub fn set_topology(&mut self, topology: Topology) -> Result<(), EngineError> {
        if let Err(err) = topology.check_capacity(MAX_LEDS) {
            return Err(self.report(err.into()));
        }
        #[cfg(feature = "esp32-log")]
        println!(
            "[Renderer.set_topology] {} leds",
            topology.led_count()
        );
        self.canvas.resize(topology.led_count());
        self.frame.resize(topology.led_count());
        self.topology = topology;
        Ok(())
    }

    /// LED layout the patterns currently draw on
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// All pattern instances, including the ones not on screen
    pub fn patterns(&self) -> &PatternSet<MAX_LEDS> {
        &self.patterns
    }

    /// Mutable pattern access for callers that configure patterns directly
    ///
    /// Prefer [`Renderer::set_param`], which also records errors for the
    /// status snapshot.
    pub fn patterns_mut(&mut self) -> &mut PatternSet<MAX_LEDS> {
        &mut self.patterns
    }

    /// Unscaled pattern output of the last frame
    pub fn canvas(&self) -> &[Rgb] {
        self.canvas.as_slice()
    }

    /// Pattern currently on screen; lags the target during a fade-out
    pub fn rendered_mode(&self) -> PatternId {
        self.state.rendered_mode
    }

    /// Transition phase as of the last rendered frame
    pub fn phase(&self) -> LampPhase {
        self.state.phase
    }

    /// Global fade multiplier in `[0, 255]`, unrounded
    pub fn fade_level(&self) -> f32 {
        self.fade.level()
    }

    /// Snapshot of the renderer state
    pub fn status(&self) -> EngineStatus {
        EngineStatus {
            target_mode: self.state.target_mode,
            rendered_mode: self.state.rendered_mode,
            phase: self.state.phase,
            fade_level: self.fade.scale(),
            target_on: self.state.target_on,
            rendered_on: self.state.rendered_on,
            fade_duration: self.timings.duration,
            counters: self.patterns.counters(),
            last_error: self.last_error.clone(),
        }
    }

    /// Take the last reported error, clearing it
    pub fn take_error(&mut self) -> Option<EngineError> {
        self.last_error.take()
    }

    /// Apply pending intents from the channel (non-blocking)
    fn process_intents(&mut self) {
        for intent in self.intent_processor.take_pending() {
            // Failures are recorded in `last_error`
            let _ = self.apply_intent(intent);
        }
    }

    fn apply_intent(&mut self, intent: LampIntent) -> Result<(), EngineError> {
        match intent {
            LampIntent::Mode(mode) => self.set_target_mode(mode),
            LampIntent::ModeByName(name) => {
                self.request_mode_by_name(&name)?;
            }
            LampIntent::Descriptor(descriptor) => self.apply_descriptor(&descriptor)?,
            LampIntent::Param {
                pattern,
                key,
                value,
            } => self.set_param(pattern, key, value)?,
            LampIntent::Power(on) => self.set_power(on),
            LampIntent::FadeDuration(duration) => self.set_fade_duration(duration),
        }
        Ok(())
    }

    /// Evaluate the state machine once
    ///
    /// Priority: a pending mode swap, then the fade-in after a swap, then
    /// power changes.
    fn advance(&mut self, now: Instant) {
        let timings = self.timings;
        let state = &mut self.state;

        if state.target_mode != state.rendered_mode {
            state.phase = LampPhase::FadingOut(FadeReason::ModeChange);
            if self.fade.drive(FADE_DARK, now, timings) {
                self.swap_mode(now);
            }
            return;
        }

        if state.rendered_mode != state.settled_mode {
            if state.rendered_on && state.target_on {
                state.phase = LampPhase::FadingIn(FadeReason::ModeChange);
                if self.fade.drive(FADE_FULL, now, timings) {
                    state.settled_mode = state.rendered_mode;
                    state.phase = LampPhase::SteadyOn;
                }
                return;
            }
            // A lamp that is or is about to be dark does not light the new mode
            state.settled_mode = state.rendered_mode;
        }

        if !state.target_on && (state.rendered_on || !self.fade.is_dark()) {
            state.phase = LampPhase::FadingOut(FadeReason::Power);
            if self.fade.drive(FADE_DARK, now, timings) {
                #[cfg(feature = "esp32-log")]
                println!("[Renderer.advance] lamp turned off");
                state.rendered_on = false;
                state.phase = LampPhase::Off;
            }
        } else if state.target_on && (!state.rendered_on || !self.fade.is_full()) {
            state.phase = LampPhase::FadingIn(FadeReason::Power);
            if self.fade.drive(FADE_FULL, now, timings) {
                #[cfg(feature = "esp32-log")]
                println!("[Renderer.advance] lamp turned on");
                state.rendered_on = true;
                state.phase = LampPhase::SteadyOn;
            }
        } else {
            state.phase = if state.rendered_on {
                LampPhase::SteadyOn
            } else {
                LampPhase::Off
            };
            self.fade.hold();
        }
    }

    /// Swap the rendered pattern while the lamp is dark
    fn swap_mode(&mut self, now: Instant) {
        #[cfg(feature = "esp32-log")]
        println!(
            "[Renderer.swap_mode] mode changed to {}",
            self.state.target_mode.as_str()
        );
        self.state.rendered_mode = self.state.target_mode;
        self.canvas.clear();
        self.patterns.enter(self.state.rendered_mode, now);
    }

    /// Remember an error for status reporting and hand it back
    fn report(&mut self, err: EngineError) -> EngineError {
        #[cfg(feature = "esp32-log")]
        println!("[Renderer.report] {}", err);
        self.last_error = Some(err.clone());
        err
    }
}
