//! Source of fresh user positions.

use thiserror::Error;

use crate::{ObservedPosition, UserId};

/// Errors from [`PositionSource::position`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    /// The source could not produce a sample.
    #[error("position source unavailable: {reason}")]
    Unavailable {
        /// Human-readable cause reported by the source.
        reason: String,
    },
}

/// Produce a fresh position sample for a user.
///
/// Implementations usually wrap a GPS service and may be slow or fail; the
/// engine never retries. Implementations must be `Send + Sync` so the
/// periodic tracker can share them across threads.
///
/// # Examples
/// ```rust
/// use chrono::Utc;
/// use tourguide_core::{Coordinate, ObservedPosition, PositionError, PositionSource, UserId};
///
/// struct NullIsland;
///
/// impl PositionSource for NullIsland {
///     fn position(&self, user_id: &UserId) -> Result<ObservedPosition, PositionError> {
///         Ok(ObservedPosition::new(
///             user_id.clone(),
///             Coordinate::from_degrees_unchecked(0.0, 0.0),
///             Utc::now(),
///         ))
///     }
/// }
///
/// let sample = NullIsland.position(&UserId::new("jon"))?;
/// assert_eq!(sample.user_id.as_str(), "jon");
/// # Ok::<(), PositionError>(())
/// ```
pub trait PositionSource: Send + Sync {
    /// Sample the current position of `user_id`.
    ///
    /// # Errors
    /// Returns [`PositionError::Unavailable`] when no sample can be produced.
    fn position(&self, user_id: &UserId) -> Result<ObservedPosition, PositionError>;
}
