//! Users and the state they own: position history, rewards and trip deals.
//!
//! A [`User`] exclusively owns its history and reward map. History is
//! append-only and chronological by insertion; nothing in the engine removes
//! entries from either collection.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::{Attraction, Coordinate};

/// Opaque user identifier.
///
/// # Examples
/// ```
/// use tourguide_core::UserId;
///
/// let id = UserId::new("internalUser0");
/// assert_eq!(id.as_str(), "internalUser0");
/// assert_eq!(id.to_string(), "internalUser0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct UserId(String);

impl UserId {
    /// Wrap an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A timestamped coordinate sample attributed to a user.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObservedPosition {
    /// User the sample belongs to.
    pub user_id: UserId,
    /// Sampled location.
    pub coordinate: Coordinate,
    /// Instant the sample was taken.
    pub timestamp: DateTime<Utc>,
}

impl ObservedPosition {
    /// Construct a sample.
    #[must_use]
    pub fn new(user_id: UserId, coordinate: Coordinate, timestamp: DateTime<Utc>) -> Self {
        Self {
            user_id,
            coordinate,
            timestamp,
        }
    }
}

/// Reward earned for being near an attraction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserReward {
    /// Position that earned the reward.
    pub position: ObservedPosition,
    /// Rewarded attraction.
    pub attraction: Attraction,
    /// Points awarded.
    pub points: u32,
}

/// Trip parameters forwarded to the pricing aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserPreferences {
    /// Number of adult travellers.
    pub adults: u32,
    /// Number of child travellers.
    pub children: u32,
    /// Trip length in nights.
    pub trip_duration_nights: u32,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            adults: 1,
            children: 0,
            trip_duration_nights: 1,
        }
    }
}

/// A priced offer returned by the trip pricer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripOffer {
    /// Provider name.
    pub provider: String,
    /// Quoted price.
    pub price: f64,
    /// Provider-side trip identifier.
    pub trip_id: String,
}

/// A traveller tracked by the engine.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use tourguide_core::{Coordinate, ObservedPosition, User, UserId};
///
/// let mut user = User::new(UserId::new("jon"), "Jon");
/// assert!(user.last_position().is_none());
///
/// let sample = ObservedPosition::new(
///     user.id().clone(),
///     Coordinate::from_degrees_unchecked(1.0, 2.0),
///     Utc::now(),
/// );
/// user.record_position(sample.clone());
/// assert_eq!(user.last_position(), Some(&sample));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    name: String,
    preferences: UserPreferences,
    history: Vec<ObservedPosition>,
    rewards: BTreeMap<String, UserReward>,
    trip_deals: Vec<TripOffer>,
}

impl User {
    /// Create a user with no history, no rewards and default preferences.
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            preferences: UserPreferences::default(),
            history: Vec::new(),
            rewards: BTreeMap::new(),
            trip_deals: Vec::new(),
        }
    }

    /// Replace the trip preferences, returning `self` for chaining.
    #[must_use]
    pub fn with_preferences(mut self, preferences: UserPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    /// Identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Trip preferences.
    #[must_use]
    pub const fn preferences(&self) -> UserPreferences {
        self.preferences
    }

    /// Positions in the order they were recorded.
    #[must_use]
    pub fn history(&self) -> &[ObservedPosition] {
        &self.history
    }

    /// Most recent position, if the user was ever tracked.
    #[must_use]
    pub fn last_position(&self) -> Option<&ObservedPosition> {
        self.history.last()
    }

    /// Append a position to the history.
    pub fn record_position(&mut self, position: ObservedPosition) {
        self.history.push(position);
    }

    /// Rewards ordered by attraction name.
    pub fn rewards(&self) -> impl Iterator<Item = &UserReward> {
        self.rewards.values()
    }

    /// Whether the user already holds a reward for the named attraction.
    #[must_use]
    pub fn has_reward_for(&self, attraction_name: &str) -> bool {
        self.rewards.contains_key(attraction_name)
    }

    /// Store a reward unless one exists for the same attraction.
    ///
    /// Returns `true` when the reward was added.
    pub fn add_reward(&mut self, reward: UserReward) -> bool {
        if self.has_reward_for(&reward.attraction.name) {
            return false;
        }
        self.rewards.insert(reward.attraction.name.clone(), reward);
        true
    }

    /// Sum of all reward points.
    #[must_use]
    pub fn cumulative_reward_points(&self) -> u64 {
        self.rewards
            .values()
            .map(|reward| u64::from(reward.points))
            .sum()
    }

    /// Offers from the last pricing request.
    #[must_use]
    pub fn trip_deals(&self) -> &[TripOffer] {
        &self.trip_deals
    }

    /// Replace the stored offers.
    pub fn set_trip_deals(&mut self, deals: Vec<TripOffer>) {
        self.trip_deals = deals;
    }
}
