//! Error types for station and train operations.
//!
//! Every operation either fully succeeds or returns one of these errors
//! without having changed any state.

use crate::domain::{InvalidTrainId, TrackNumber, TrainId};

/// Broad category of a [`SimError`], for callers that branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A caller-supplied parameter violates a precondition.
    InvalidArgument,
    /// The operation is not valid in the current state.
    Conflict,
    /// Boarding would exceed a train's capacity.
    CapacityExceeded,
}

/// Errors from station and train operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    /// A parameter is out of range (zero capacity, unknown track, ...)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The train is already in a station
    #[error("train {train} is already in a station (track {track})")]
    AlreadyInStation { train: TrainId, track: TrackNumber },

    /// The train is not in a station, or not in the one it was asked about
    #[error("train {0} is not in the station")]
    NotInStation(TrainId),

    /// A track is not held by the train that claims it
    #[error(
        "track {track} is not occupied by train {train} (current: {})",
        .current.as_ref().map_or("free", |t| t.as_str())
    )]
    TrackNotHeld {
        track: TrackNumber,
        train: TrainId,
        current: Option<TrainId>,
    },

    /// Boarding would push a train over its capacity
    #[error(
        "cannot add {requested} passengers to train {train}: would exceed capacity {capacity}"
    )]
    CapacityExceeded {
        train: TrainId,
        requested: u32,
        capacity: u32,
    },
}

impl SimError {
    /// Shorthand for an [`SimError::InvalidArgument`] with a message.
    pub fn invalid(message: impl Into<String>) -> Self {
        SimError::InvalidArgument(message.into())
    }

    /// The taxonomy bucket this error falls into.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SimError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            SimError::AlreadyInStation { .. }
            | SimError::NotInStation(_)
            | SimError::TrackNotHeld { .. } => ErrorKind::Conflict,
            SimError::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
        }
    }
}

impl From<InvalidTrainId> for SimError {
    fn from(err: InvalidTrainId) -> Self {
        SimError::InvalidArgument(err.to_string())
    }
}
