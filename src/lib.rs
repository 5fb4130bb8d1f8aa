#![no_std]

pub mod buffer;
pub mod channel;
pub mod color;
pub mod error;
pub mod fade;
pub mod frame_scheduler;
pub mod intent_processor;
pub mod math8;
pub mod pattern;
pub mod renderer;
pub mod rng;
pub mod topology;
pub mod trigger;

pub use buffer::PixelBuffer;
pub use error::EngineError;
pub use fade::{FadeLevel, FadeTimings};
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use intent_processor::{
    IntentChannel, IntentProcessor, IntentReceiver, IntentSender, LampIntent,
};
pub use pattern::{ModeDescriptor, ModeName, ParamError, ParamKey, PatternId, PatternSet};
pub use renderer::{EngineConfig, EngineStatus, FadeReason, Frame, LampPhase, Renderer};
pub use topology::{Topology, TopologyError, Zone};
pub use trigger::PeriodicTrigger;

pub use color::{Hsv, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The engine is generic over this trait.
pub trait OutputDriver {
    /// Write colors to the LED strip along with the hardware brightness
    fn write(&mut self, colors: &[Rgb], brightness: u8);
}

/// Source of local wall-clock time
///
/// Returns local seconds since the epoch (time zone already applied), or
/// `None` while time has not been synchronized yet.
pub trait WallClock {
    fn local_seconds(&self) -> Option<u64>;
}

impl WallClock for Option<u64> {
    fn local_seconds(&self) -> Option<u64> {
        *self
    }
}
