//! Reward scoring for attractions a user is near or has visited.
//!
//! The scoring engine itself lives outside this crate. The engine only needs
//! a per-attraction point value for enrichment and a way to refresh the
//! user's stored rewards after every tracked position.

use thiserror::Error;

use crate::{Attraction, User};

/// Errors from [`RewardScorer`] calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewardError {
    /// The scoring service could not be reached or refused the request.
    #[error("reward scoring unavailable: {reason}")]
    Unavailable {
        /// Human-readable cause reported by the scorer.
        reason: String,
    },
}

/// Assign reward points to attractions for a user.
///
/// Implementations must be thread-safe (`Send` + `Sync`) and should treat the
/// user as read-only in [`RewardScorer::reward_points`].
///
/// # Examples
///
/// ```rust
/// use tourguide_core::{Attraction, Coordinate, RewardError, RewardScorer, User, UserId};
///
/// struct Flat(u32);
///
/// impl RewardScorer for Flat {
///     fn reward_points(&self, _attraction: &Attraction, _user: &User) -> Result<u32, RewardError> {
///         Ok(self.0)
///     }
///
///     fn recalculate(&self, _user: &mut User) -> Result<(), RewardError> {
///         Ok(())
///     }
/// }
///
/// let user = User::new(UserId::new("jon"), "Jon");
/// let pier = Attraction::new("pier", Coordinate::from_degrees_unchecked(0.0, 0.0));
/// assert_eq!(Flat(7).reward_points(&pier, &user)?, 7);
/// # Ok::<(), RewardError>(())
/// ```
pub trait RewardScorer: Send + Sync {
    /// Points `user` would earn for `attraction`.
    ///
    /// # Errors
    /// Returns [`RewardError`] when the score cannot be computed.
    fn reward_points(&self, attraction: &Attraction, user: &User) -> Result<u32, RewardError>;

    /// Recompute and store rewards for every attraction the user has visited.
    ///
    /// # Errors
    /// Returns [`RewardError`] when recalculation fails; rewards added before
    /// the failure may remain.
    fn recalculate(&self, user: &mut User) -> Result<(), RewardError>;
}
