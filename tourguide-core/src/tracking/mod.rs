//! Record fresh user positions.
//!
//! [`LocationTracker::track`] is the only operation that samples the position
//! source and mutates a user's history. Every successful sample is appended
//! and followed, synchronously, by a reward recalculation for that user.
//! Location queries reuse the last recorded position and only track when the
//! user has never been seen.
//!
//! Failure policy:
//! - position source failure: nothing is appended;
//! - malformed sample: nothing is appended;
//! - reward failure: the appended position stands and the error is returned.

mod error;

use log::{debug, warn};

pub use error::{InvalidParameter, TrackError};

use crate::{ObservedPosition, PositionSource, RewardScorer, User};

/// Samples positions and keeps a user's history and rewards current.
///
/// Callers must hold exclusive access to the [`User`] for the whole call;
/// the `&mut` receiver enforces this when users live behind a store lock.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use tourguide_core::{
///     Attraction, Coordinate, LocationTracker, ObservedPosition, PositionError,
///     PositionSource, RewardError, RewardScorer, User, UserId,
/// };
///
/// struct Fixed;
///
/// impl PositionSource for Fixed {
///     fn position(&self, user_id: &UserId) -> Result<ObservedPosition, PositionError> {
///         Ok(ObservedPosition::new(
///             user_id.clone(),
///             Coordinate::from_degrees_unchecked(1.0, 1.0),
///             Utc::now(),
///         ))
///     }
/// }
///
/// struct NoRewards;
///
/// impl RewardScorer for NoRewards {
///     fn reward_points(&self, _: &Attraction, _: &User) -> Result<u32, RewardError> {
///         Ok(0)
///     }
///     fn recalculate(&self, _: &mut User) -> Result<(), RewardError> {
///         Ok(())
///     }
/// }
///
/// let tracker = LocationTracker::new(Fixed, NoRewards);
/// let mut user = User::new(UserId::new("jon"), "Jon");
/// let first = tracker.current_or_last(&mut user)?;
/// let again = tracker.current_or_last(&mut user)?;
/// assert_eq!(first, again);
/// assert_eq!(user.history().len(), 1);
/// # Ok::<(), tourguide_core::TrackError>(())
/// ```
#[derive(Debug)]
pub struct LocationTracker<P, R>
where
    P: PositionSource,
    R: RewardScorer,
{
    source: P,
    scorer: R,
}

impl<P, R> LocationTracker<P, R>
where
    P: PositionSource,
    R: RewardScorer,
{
    /// Compose a tracker from its collaborators.
    pub const fn new(source: P, scorer: R) -> Self {
        Self { source, scorer }
    }

    /// The reward scorer used for recalculation.
    pub const fn scorer(&self) -> &R {
        &self.scorer
    }

    /// The position source used for sampling.
    pub const fn source(&self) -> &P {
        &self.source
    }

    /// Return the last recorded position, tracking once if there is none.
    ///
    /// # Errors
    /// Propagates [`TrackError`] from the implicit [`Self::track`] call.
    pub fn current_or_last(&self, user: &mut User) -> Result<ObservedPosition, TrackError> {
        if let Some(last) = user.last_position() {
            return Ok(last.clone());
        }
        self.track(user)
    }

    /// Sample, record, and recalculate rewards for `user`.
    ///
    /// # Errors
    /// - [`TrackError::PositionUnavailable`] when the source fails.
    /// - [`TrackError::InvalidParameter`] when the sample names another user
    ///   or carries a malformed coordinate.
    /// - [`TrackError::ScoringUnavailable`] when recalculation fails after the
    ///   position was recorded.
    pub fn track(&self, user: &mut User) -> Result<ObservedPosition, TrackError> {
        let position = self.source.position(user.id()).map_err(|source| {
            TrackError::PositionUnavailable {
                user_id: user.id().clone(),
                source,
            }
        })?;
        check_sample(user, &position)?;
        debug!(
            "recorded position ({}, {}) for {}",
            position.coordinate.latitude,
            position.coordinate.longitude,
            user.id()
        );
        user.record_position(position.clone());

        if let Err(source) = self.scorer.recalculate(user) {
            warn!(
                "reward recalculation failed for {}; keeping recorded position: {source}",
                user.id()
            );
            return Err(TrackError::ScoringUnavailable { position, source });
        }
        Ok(position)
    }
}

fn check_sample(user: &User, position: &ObservedPosition) -> Result<(), InvalidParameter> {
    if &position.user_id != user.id() {
        return Err(InvalidParameter::ForeignPosition {
            expected: user.id().clone(),
            actual: position.user_id.clone(),
        });
    }
    position.coordinate.validate()?;
    Ok(())
}
