//! Intent processing module
//!
//! Carries configuration changes from the outside world to the renderer.
//! There is no acknowledgement; the last write wins.

use embassy_time::Duration;
use heapless::Vec;

use crate::channel::{Channel, Receiver, Sender};
use crate::pattern::{ModeDescriptor, ModeName, ParamKey, PatternId};

/// Change requested by the configuration layer
#[derive(Debug, Clone)]
pub enum LampIntent {
    /// Switch to a known pattern
    Mode(PatternId),
    /// Switch to a pattern by its display name
    ModeByName(ModeName),
    /// Apply parameters, then switch to the pattern
    Descriptor(ModeDescriptor),
    /// Update one parameter of a pattern
    Param {
        pattern: PatternId,
        key: ParamKey,
        value: i32,
    },
    /// Turn the lamp on or off
    Power(bool),
    /// Change the fade duration
    FadeDuration(Duration),
}

/// Type alias for intent sender
pub type IntentSender<'a, const SIZE: usize> = Sender<'a, LampIntent, SIZE>;

/// Type alias for intent receiver
pub type IntentReceiver<'a, const SIZE: usize> = Receiver<'a, LampIntent, SIZE>;

/// Type alias for the intent channel
pub type IntentChannel<const SIZE: usize> = Channel<LampIntent, SIZE>;

/// Drains queued intents once per frame
pub struct IntentProcessor<'a, const SIZE: usize> {
    intents: IntentReceiver<'a, SIZE>,
}

impl<'a, const SIZE: usize> IntentProcessor<'a, SIZE> {
    pub const fn new(intents: IntentReceiver<'a, SIZE>) -> Self {
        Self { intents }
    }

    /// Take every pending intent from the channel (non-blocking)
    ///
    /// At most `SIZE` intents are taken per call; anything queued while
    /// draining waits for the next frame.
    pub fn take_pending(&mut self) -> Vec<LampIntent, SIZE> {
        let mut pending = Vec::new();
        for intent in self.intents.drain() {
            if pending.push(intent).is_err() {
                break;
            }
        }
        pending
    }
}
