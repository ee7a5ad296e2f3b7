//! The `TourGuide` façade.
//!
//! Composes the user store, the location tracker, the ranker and the enricher
//! in data-flow order: a tracked position is recorded on the user, ranked
//! against the catalogue, then joined with the user's reward scores. The
//! façade adds no logic of its own beyond locking, validation and the
//! configured nearby count.
//!
//! Locking discipline: tracking holds one user's lock for the whole
//! sample-append-recalculate sequence. Enrichment and pricing work on a
//! snapshot so external scorers and pricers never run under a user lock.

mod config;
mod error;

use log::{debug, info};

pub use config::{DEFAULT_NEARBY_COUNT, DEFAULT_TRIP_PRICER_API_KEY, TourGuideConfig};
pub use error::TourGuideError;

use crate::{
    Attraction, AttractionCatalog, Coordinate, InvalidParameter, LocationTracker, ObservedPosition,
    PositionSource, QuoteRequest, RankedAttraction, RewardScorer, TripOffer, TripPricer, User,
    UserHandle, UserId, UserReward, UserStore, enrich, lock_user, nearest, rank,
};

/// Tracks users and answers "what is nearby, and what deals fit" queries.
///
/// Generic over its collaborators: a user store, a position source, an
/// attraction catalogue, a reward scorer and a trip pricer. All methods take
/// `&self`; the type is `Send + Sync` whenever its collaborators are, so a
/// single instance can be shared with the periodic tracker.
pub struct TourGuide<S, P, C, R, T>
where
    S: UserStore,
    P: PositionSource,
    C: AttractionCatalog,
    R: RewardScorer,
    T: TripPricer,
{
    store: S,
    tracker: LocationTracker<P, R>,
    catalog: C,
    pricer: T,
    config: TourGuideConfig,
}

impl<S, P, C, R, T> TourGuide<S, P, C, R, T>
where
    S: UserStore,
    P: PositionSource,
    C: AttractionCatalog,
    R: RewardScorer,
    T: TripPricer,
{
    /// Construct a guide using default configuration.
    pub fn new(store: S, source: P, catalog: C, scorer: R, pricer: T) -> Self {
        Self {
            store,
            tracker: LocationTracker::new(source, scorer),
            catalog,
            pricer,
            config: TourGuideConfig::default(),
        }
    }

    /// Construct a guide with explicit configuration.
    ///
    /// # Errors
    /// Returns [`InvalidParameter`] when `config` fails validation.
    pub fn with_config(
        store: S,
        source: P,
        catalog: C,
        scorer: R,
        pricer: T,
        config: TourGuideConfig,
    ) -> Result<Self, InvalidParameter> {
        config.validate()?;
        Ok(Self {
            store,
            tracker: LocationTracker::new(source, scorer),
            catalog,
            pricer,
            config,
        })
    }

    /// Active configuration.
    pub const fn config(&self) -> &TourGuideConfig {
        &self.config
    }

    /// The location tracker and, through it, the position source and scorer.
    pub const fn tracker(&self) -> &LocationTracker<P, R> {
        &self.tracker
    }

    /// The trip pricer.
    pub const fn pricer(&self) -> &T {
        &self.pricer
    }

    /// Register `user` unless the id is taken. Returns `true` when added.
    pub fn add_user(&self, user: User) -> bool {
        let added = self.store.put(user);
        if !added {
            debug!("ignored duplicate user registration");
        }
        added
    }

    /// Snapshot of a stored user.
    pub fn user(&self, id: &UserId) -> Option<User> {
        let handle = self.store.get(id)?;
        let guard = lock_user(&handle);
        Some(guard.clone())
    }

    /// Identifiers of every stored user.
    pub fn user_ids(&self) -> Vec<UserId> {
        self.store.list()
    }

    /// Snapshots of every stored user.
    pub fn users(&self) -> Vec<User> {
        self.store
            .list()
            .iter()
            .filter_map(|id| self.user(id))
            .collect()
    }

    /// The user's last position, tracking once if the user was never seen.
    ///
    /// Repeated calls without an intervening [`Self::track_user`] return the
    /// same position.
    ///
    /// # Errors
    /// [`TourGuideError::UnknownUser`] or any tracking failure.
    pub fn current_or_last_location(
        &self,
        id: &UserId,
    ) -> Result<ObservedPosition, TourGuideError> {
        let handle = self.handle(id)?;
        let mut user = lock_user(&handle);
        Ok(self.tracker.current_or_last(&mut user)?)
    }

    /// Sample a fresh position, record it and recalculate rewards.
    ///
    /// # Errors
    /// - [`TourGuideError::UnknownUser`] for an unknown id.
    /// - [`TourGuideError::PositionUnavailable`] when the source fails.
    /// - [`TourGuideError::ScoringUnavailable`] when recalculation fails after
    ///   the position was recorded.
    /// - [`TourGuideError::InvalidParameter`] for a malformed sample.
    pub fn track_user(&self, id: &UserId) -> Result<ObservedPosition, TourGuideError> {
        let handle = self.handle(id)?;
        let mut user = lock_user(&handle);
        Ok(self.tracker.track(&mut user)?)
    }

    /// The configured number of attractions nearest to `position`.
    ///
    /// # Errors
    /// [`TourGuideError::InvalidParameter`] for a malformed coordinate.
    pub fn nearby_attractions(
        &self,
        position: &ObservedPosition,
    ) -> Result<Vec<Attraction>, TourGuideError> {
        let reference = checked_reference(position)?;
        let candidates: Vec<Attraction> = self.catalog.attractions().collect();
        Ok(nearest(reference, &candidates, self.config.nearby_count))
    }

    /// Like [`Self::nearby_attractions`], with distances but no scores.
    ///
    /// # Errors
    /// [`TourGuideError::InvalidParameter`] for a malformed coordinate.
    pub fn nearby_attractions_ranked(
        &self,
        position: &ObservedPosition,
    ) -> Result<Vec<RankedAttraction>, TourGuideError> {
        let reference = checked_reference(position)?;
        let candidates: Vec<Attraction> = self.catalog.attractions().collect();
        Ok(rank(reference, &candidates, self.config.nearby_count))
    }

    /// Nearby attractions joined with the reward points `id` would earn.
    ///
    /// # Errors
    /// - [`TourGuideError::InvalidParameter`] for a malformed coordinate.
    /// - [`TourGuideError::UnknownUser`] for an unknown id.
    /// - [`TourGuideError::ScoringUnavailable`] when scoring fails.
    pub fn nearby_attractions_enriched(
        &self,
        position: &ObservedPosition,
        id: &UserId,
    ) -> Result<Vec<RankedAttraction>, TourGuideError> {
        let ranked = self.nearby_attractions(position)?;
        let user = self
            .user(id)
            .ok_or_else(|| TourGuideError::UnknownUser(id.clone()))?;
        let scorer = self.tracker.scorer();
        enrich(position.coordinate, &ranked, |attraction| {
            scorer.reward_points(attraction, &user)
        })
        .map_err(|source| TourGuideError::ScoringUnavailable {
            user_id: id.clone(),
            position: None,
            source,
        })
    }

    /// Rewards earned by `id`, ordered by attraction name.
    ///
    /// # Errors
    /// [`TourGuideError::UnknownUser`] for an unknown id.
    pub fn user_rewards(&self, id: &UserId) -> Result<Vec<UserReward>, TourGuideError> {
        let handle = self.handle(id)?;
        let user = lock_user(&handle);
        Ok(user.rewards().cloned().collect())
    }

    /// Price trips for `id` using the sum of their reward points.
    ///
    /// The offers are stored on the user and returned.
    ///
    /// # Errors
    /// - [`TourGuideError::UnknownUser`] for an unknown id.
    /// - [`TourGuideError::PricingUnavailable`] when the pricer fails; stored
    ///   offers are left untouched.
    pub fn trip_deals(&self, id: &UserId) -> Result<Vec<TripOffer>, TourGuideError> {
        let handle = self.handle(id)?;
        let request = {
            let user = lock_user(&handle);
            let preferences = user.preferences();
            QuoteRequest {
                api_key: self.config.trip_pricer_api_key.clone(),
                user_id: id.clone(),
                adults: preferences.adults,
                children: preferences.children,
                trip_duration_nights: preferences.trip_duration_nights,
                cumulative_reward_points: user.cumulative_reward_points(),
            }
        };
        let offers = self
            .pricer
            .quote(&request)
            .map_err(|source| TourGuideError::PricingUnavailable {
                user_id: id.clone(),
                source,
            })?;
        info!(
            "priced {} offers for {id} with {} reward points",
            offers.len(),
            request.cumulative_reward_points
        );
        lock_user(&handle).set_trip_deals(offers.clone());
        Ok(offers)
    }

    fn handle(&self, id: &UserId) -> Result<UserHandle, TourGuideError> {
        self.store
            .get(id)
            .ok_or_else(|| TourGuideError::UnknownUser(id.clone()))
    }
}

fn checked_reference(position: &ObservedPosition) -> Result<Coordinate, InvalidParameter> {
    position.coordinate.validate()?;
    Ok(position.coordinate)
}
