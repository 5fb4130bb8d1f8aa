//! Mapping from lamp sides to physical LED indices.

use core::fmt;

use heapless::Vec;

/// Maximum number of LEDs on a single side
pub const MAX_ZONE_LEDS: usize = 128;

/// Ordered LED indices of one zone
pub type ZoneIndices = Vec<u16, MAX_ZONE_LEDS>;

/// Named side of the lamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Top,
    Bottom,
    Left,
    Right,
}

impl Zone {
    pub const ALL: [Zone; 4] = [Zone::Top, Zone::Bottom, Zone::Left, Zone::Right];
}

/// Errors from building a [`Topology`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyError {
    /// Index is not below the LED count
    IndexOutOfRange { zone: Zone, index: u16 },
    /// Index appears twice across the zones
    DuplicateIndex { index: u16 },
    /// Zone holds more than [`MAX_ZONE_LEDS`] indices
    ZoneTooLong { zone: Zone },
    /// LED count exceeds the renderer capacity
    TooManyLeds { count: usize, capacity: usize },
}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { zone, index } => {
                write!(f, "led {index} in {zone:?} zone is out of range")
            }
            Self::DuplicateIndex { index } => write!(f, "led {index} is mapped twice"),
            Self::ZoneTooLong { zone } => write!(f, "{zone:?} zone is too long"),
            Self::TooManyLeds { count, capacity } => {
                write!(f, "{count} leds exceed the capacity of {capacity}")
            }
        }
    }
}

/// Static layout of the lamp
///
/// Every index is below `led_count` and appears in at most one zone.
#[derive(Debug, Clone)]
pub struct Topology {
    led_count: usize,
    top: ZoneIndices,
    bottom: ZoneIndices,
    left: ZoneIndices,
    right: ZoneIndices,
}

// Reference rectangular lamp: 66 LEDs, the string starts in the middle of
// the bottom side and runs clockwise when seen from the front.
const LAMP_LED_COUNT: usize = 66;
const LAMP_TOP: [u16; 30] = [
    18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40,
    41, 42, 43, 44, 45, 46, 47,
];
const LAMP_BOTTOM: [u16; 30] = [
    14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 65, 64, 63, 62, 61, 60, 59, 58, 57, 56, 55,
    54, 53, 52, 51,
];
const LAMP_LEFT: [u16; 3] = [48, 49, 50];
const LAMP_RIGHT: [u16; 3] = [15, 16, 17];

impl Topology {
    /// Build a topology, validating every index
    pub fn new(
        led_count: usize,
        top: &[u16],
        bottom: &[u16],
        left: &[u16],
        right: &[u16],
    ) -> Result<Self, TopologyError> {
        let topology = Self {
            led_count,
            top: Self::zone_from(Zone::Top, top)?,
            bottom: Self::zone_from(Zone::Bottom, bottom)?,
            left: Self::zone_from(Zone::Left, left)?,
            right: Self::zone_from(Zone::Right, right)?,
        };
        topology.validate()?;
        Ok(topology)
    }

    /// Layout of the reference 66 LED lamp
    pub fn lamp() -> Self {
        Self {
            led_count: LAMP_LED_COUNT,
            top: LAMP_TOP.iter().copied().collect(),
            bottom: LAMP_BOTTOM.iter().copied().collect(),
            left: LAMP_LEFT.iter().copied().collect(),
            right: LAMP_RIGHT.iter().copied().collect(),
        }
    }

    /// Total number of LEDs on the string
    pub const fn led_count(&self) -> usize {
        self.led_count
    }

    /// Ordered LED indices of a zone
    pub fn zone(&self, zone: Zone) -> &[u16] {
        match zone {
            Zone::Top => &self.top,
            Zone::Bottom => &self.bottom,
            Zone::Left => &self.left,
            Zone::Right => &self.right,
        }
    }

    /// Number of LEDs in a zone
    pub fn zone_len(&self, zone: Zone) -> usize {
        self.zone(zone).len()
    }

    /// Check that the layout fits a renderer holding `capacity` LEDs
    pub const fn check_capacity(&self, capacity: usize) -> Result<(), TopologyError> {
        if self.led_count > capacity {
            return Err(TopologyError::TooManyLeds {
                count: self.led_count,
                capacity,
            });
        }
        Ok(())
    }

    fn zone_from(zone: Zone, indices: &[u16]) -> Result<ZoneIndices, TopologyError> {
        Vec::from_slice(indices).map_err(|()| TopologyError::ZoneTooLong { zone })
    }

    fn validate(&self) -> Result<(), TopologyError> {
        for (pos, zone) in Zone::ALL.iter().enumerate() {
            for (i, &index) in self.zone(*zone).iter().enumerate() {
                if usize::from(index) >= self.led_count {
                    return Err(TopologyError::IndexOutOfRange { zone: *zone, index });
                }
                let later_in_zone = self.zone(*zone)[i + 1..].contains(&index);
                let in_later_zone = Zone::ALL[pos + 1..]
                    .iter()
                    .any(|other| self.zone(*other).contains(&index));
                if later_in_zone || in_later_zone {
                    return Err(TopologyError::DuplicateIndex { index });
                }
            }
        }
        Ok(())
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::lamp()
    }
}
