//! Named numeric pattern parameters.
//!
//! The configuration layer addresses parameters by the names used in the
//! lamp web UI. Values arrive as plain integers and are clamped by each
//! pattern; only an unknown or misplaced key is an error.

use core::fmt;

use heapless::Vec;

use super::PatternId;

/// Maximum number of parameters carried by one [`ModeDescriptor`]
pub const MAX_DESCRIPTOR_PARAMS: usize = 8;

/// Parameter names understood by the patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKey {
    Red,
    Green,
    Blue,
    StartHue,
    Speed,
    Brightness,
    HourRed,
    HourGreen,
    HourBlue,
    MinuteRed,
    MinuteGreen,
    MinuteBlue,
    PausedBrightness,
    MinDelay,
    MaxDelay,
    FlashLength,
    Hue,
}

impl ParamKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::StartHue => "startHue",
            Self::Speed => "speed",
            Self::Brightness => "brightness",
            Self::HourRed => "hourRed",
            Self::HourGreen => "hourGreen",
            Self::HourBlue => "hourBlue",
            Self::MinuteRed => "minuteRed",
            Self::MinuteGreen => "minuteGreen",
            Self::MinuteBlue => "minuteBlue",
            Self::PausedBrightness => "pausedBrightness",
            Self::MinDelay => "minDelay",
            Self::MaxDelay => "maxDelay",
            Self::FlashLength => "flashLength",
            Self::Hue => "hue",
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        Some(match s {
            "red" => Self::Red,
            "green" => Self::Green,
            "blue" => Self::Blue,
            "startHue" => Self::StartHue,
            "speed" => Self::Speed,
            "brightness" => Self::Brightness,
            "hourRed" => Self::HourRed,
            "hourGreen" => Self::HourGreen,
            "hourBlue" => Self::HourBlue,
            "minuteRed" => Self::MinuteRed,
            "minuteGreen" => Self::MinuteGreen,
            "minuteBlue" => Self::MinuteBlue,
            "pausedBrightness" => Self::PausedBrightness,
            "minDelay" => Self::MinDelay,
            "maxDelay" => Self::MaxDelay,
            "flashLength" => Self::FlashLength,
            "hue" => Self::Hue,
            _ => return None,
        })
    }
}

/// Parameter update rejected by a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamError {
    /// Name does not match any [`ParamKey`]
    UnknownKey,
    /// Key exists but the pattern has no such parameter
    NotApplicable { pattern: PatternId, key: ParamKey },
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKey => f.write_str("unknown parameter"),
            Self::NotApplicable { pattern, key } => write!(
                f,
                "parameter {} does not apply to {}",
                key.as_str(),
                pattern.as_str()
            ),
        }
    }
}

/// Pattern selection together with its parameter values
#[derive(Debug, Clone)]
pub struct ModeDescriptor {
    pub id: PatternId,
    pub params: Vec<(ParamKey, i32), MAX_DESCRIPTOR_PARAMS>,
}

impl ModeDescriptor {
    pub const fn new(id: PatternId) -> Self {
        Self {
            id,
            params: Vec::new(),
        }
    }

    /// Add a parameter value
    ///
    /// Returns the pair back if the descriptor is full.
    pub fn with_param(mut self, key: ParamKey, value: i32) -> Result<Self, (ParamKey, i32)> {
        self.params.push((key, value))?;
        Ok(self)
    }
}

/// Clamp a raw value into the 8-bit range
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) const fn clamp_u8(value: i32) -> u8 {
    if value < 0 {
        0
    } else if value > 255 {
        255
    } else {
        value as u8
    }
}

/// Clamp a raw value into `0..=max`
#[allow(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub(crate) const fn clamp_u16(value: i32, max: u16) -> u16 {
    if value < 0 {
        0
    } else if value > max as i32 {
        max
    } else {
        value as u16
    }
}
