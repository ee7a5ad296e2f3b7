use thiserror::Error;

use crate::{CoordinateError, ObservedPosition, PositionError, RewardError, UserId};

/// Input rejected before any state changes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidParameter {
    /// The nearby attraction count was zero.
    #[error("nearby attraction count must be positive")]
    ZeroNearbyCount,
    /// A coordinate was non-finite or out of range.
    #[error("malformed coordinate: {0}")]
    Coordinate(#[from] CoordinateError),
    /// The position source answered for a different user.
    #[error("position sample for {actual} cannot be recorded for {expected}")]
    ForeignPosition {
        /// User being tracked.
        expected: UserId,
        /// User named by the sample.
        actual: UserId,
    },
}

/// Errors from [`crate::LocationTracker::track`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackError {
    /// The position source failed; nothing was recorded.
    #[error("no position available for {user_id}")]
    PositionUnavailable {
        /// User being tracked.
        user_id: UserId,
        /// Source error from the position source.
        #[source]
        source: PositionError,
    },
    /// The position was recorded but reward recalculation failed.
    ///
    /// The recorded position is not rolled back.
    #[error("position recorded for {} but reward recalculation failed", .position.user_id)]
    ScoringUnavailable {
        /// The position that was appended to the history.
        position: ObservedPosition,
        /// Source error from the reward scorer.
        #[source]
        source: RewardError,
    },
    /// The sample was malformed; nothing was recorded.
    #[error(transparent)]
    InvalidParameter(#[from] InvalidParameter),
}
