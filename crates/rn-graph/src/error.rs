//! Graph-specific error types.

use rn_core::{CoreError, StationId, TrackId};

/// Structural errors found while freezing a network.
///
/// These describe a broken arena, never bad input data: unresolvable
/// records are skipped and reported before they reach the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A track endpoint refers to a station that doesn't exist.
    InvalidEndpoint { track: TrackId, station: StationId },

    /// An arena entry's ID doesn't match its position.
    NonContiguousId { what: &'static str, id: u32, slot: usize },

    /// A track is listed under a station it doesn't touch, or is missing.
    InconsistentAdjacency { track: TrackId, station: StationId },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::InvalidEndpoint { track, station } => {
                write!(f, "Track {} refers to non-existent station {}", track, station)
            }
            GraphError::NonContiguousId { what, id, slot } => {
                write!(f, "{} id {} stored at slot {}", what, id, slot)
            }
            GraphError::InconsistentAdjacency { track, station } => {
                write!(
                    f,
                    "Track {} in station {}'s adjacency list is inconsistent",
                    track, station
                )
            }
        }
    }
}

impl std::error::Error for GraphError {}

impl From<GraphError> for CoreError {
    fn from(err: GraphError) -> Self {
        CoreError::Invariant {
            what: err.to_string(),
        }
    }
}
