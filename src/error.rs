use core::fmt;

use crate::pattern::{ModeName, ParamError};
use crate::topology::TopologyError;

/// Conditions reported back to the configuration layer
///
/// None of them stops rendering; the renderer keeps producing frames with
/// its previous settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Requested mode name matches no pattern
    UnknownMode(ModeName),
    /// Parameter update was rejected
    Param(ParamError),
    /// Topology was rejected
    Topology(TopologyError),
}

impl From<ParamError> for EngineError {
    fn from(value: ParamError) -> Self {
        Self::Param(value)
    }
}

impl From<TopologyError> for EngineError {
    fn from(value: TopologyError) -> Self {
        Self::Topology(value)
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownMode(name) => write!(f, "unknown mode: {}", name.as_str()),
            Self::Param(err) => write!(f, "{err}"),
            Self::Topology(err) => write!(f, "{err}"),
        }
    }
}
