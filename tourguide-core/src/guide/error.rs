use thiserror::Error;

use crate::{
    InvalidParameter, ObservedPosition, PositionError, PricingError, RewardError, TrackError, UserId,
};

/// Errors returned by [`crate::TourGuide`] operations.
///
/// An empty attraction catalogue is not an error: nearby queries return an
/// empty list.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TourGuideError {
    /// The position source could not produce a sample; nothing was recorded.
    #[error("no position available for {user_id}")]
    PositionUnavailable {
        /// User being tracked.
        user_id: UserId,
        /// Source error from the position source.
        #[source]
        source: PositionError,
    },
    /// Reward scoring failed.
    ///
    /// When raised by tracking, `position` is the sample that was recorded
    /// before recalculation failed; it is not rolled back.
    #[error("reward scoring unavailable for {user_id}")]
    ScoringUnavailable {
        /// User being scored.
        user_id: UserId,
        /// Position recorded before the failure, if tracking was involved.
        position: Option<ObservedPosition>,
        /// Source error from the reward scorer.
        #[source]
        source: RewardError,
    },
    /// The trip pricer could not produce offers.
    #[error("trip pricing unavailable for {user_id}")]
    PricingUnavailable {
        /// User being priced.
        user_id: UserId,
        /// Source error from the trip pricer.
        #[source]
        source: PricingError,
    },
    /// Input was rejected before any state changed.
    #[error(transparent)]
    InvalidParameter(#[from] InvalidParameter),
    /// No user is stored under the identifier.
    #[error("unknown user {0}")]
    UnknownUser(UserId),
}

impl From<TrackError> for TourGuideError {
    fn from(value: TrackError) -> Self {
        match value {
            TrackError::PositionUnavailable { user_id, source } => {
                Self::PositionUnavailable { user_id, source }
            }
            TrackError::ScoringUnavailable { position, source } => Self::ScoringUnavailable {
                user_id: position.user_id.clone(),
                position: Some(position),
                source,
            },
            TrackError::InvalidParameter(invalid) => Self::InvalidParameter(invalid),
        }
    }
}
