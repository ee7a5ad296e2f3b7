//! Deterministic collaborators used by unit, behaviour and tracker tests.
//!
//! None of these types talk to real services. They count their calls so tests
//! can assert how often the engine reached out. The module is compiled for unit
//! tests and behind the `test-support` feature.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::Utc;

use crate::{
    Attraction, Coordinate, ObservedPosition, PositionError, PositionSource, PricingError,
    QuoteRequest, RewardError, RewardScorer, TripOffer, TripPricer, User, UserId, UserReward,
};

/// Latitude step between consecutive samples of a walking source.
pub const WALK_STEP_DEGREES: f64 = 0.001;

#[derive(Debug, Clone)]
enum Script {
    Walking(Coordinate),
    Fixed(Coordinate),
    Failing(String),
    Impersonating(UserId),
}

/// `PositionSource` replaying a fixed behaviour.
#[derive(Debug)]
pub struct ScriptedPositionSource {
    script: Script,
    samples: AtomicU32,
}

impl ScriptedPositionSource {
    const fn with_script(script: Script) -> Self {
        Self {
            script,
            samples: AtomicU32::new(0),
        }
    }

    /// Each sample moves [`WALK_STEP_DEGREES`] north of the previous one,
    /// starting at `start`.
    #[must_use]
    pub const fn walking(start: Coordinate) -> Self {
        Self::with_script(Script::Walking(start))
    }

    /// Every sample reports `coordinate`, valid or not.
    #[must_use]
    pub const fn fixed(coordinate: Coordinate) -> Self {
        Self::with_script(Script::Fixed(coordinate))
    }

    /// Every sample fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::with_script(Script::Failing(reason.into()))
    }

    /// Every sample is attributed to `other` instead of the requested user.
    #[must_use]
    pub const fn impersonating(other: UserId) -> Self {
        Self::with_script(Script::Impersonating(other))
    }

    /// Number of `position` calls so far, including failures.
    #[must_use]
    pub fn samples_taken(&self) -> u32 {
        self.samples.load(Ordering::SeqCst)
    }
}

impl PositionSource for ScriptedPositionSource {
    fn position(&self, user_id: &UserId) -> Result<ObservedPosition, PositionError> {
        let step = self.samples.fetch_add(1, Ordering::SeqCst);
        let (owner, coordinate) = match &self.script {
            Script::Walking(start) => (user_id.clone(), walk(*start, step)),
            Script::Fixed(coordinate) => (user_id.clone(), *coordinate),
            Script::Failing(reason) => {
                return Err(PositionError::Unavailable {
                    reason: reason.clone(),
                });
            }
            Script::Impersonating(other) => (
                other.clone(),
                Coordinate::from_degrees_unchecked(0.0, 0.0),
            ),
        };
        Ok(ObservedPosition::new(owner, coordinate, Utc::now()))
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "walking sources offset latitude by a fixed step"
)]
fn walk(start: Coordinate, step: u32) -> Coordinate {
    Coordinate::from_degrees_unchecked(
        start.latitude + WALK_STEP_DEGREES * f64::from(step),
        start.longitude,
    )
}

/// `RewardScorer` awarding a constant number of points.
///
/// `recalculate` grants the constant to each configured attraction the user
/// has not been rewarded for yet, using the user's last position. It also
/// checks that every recalculation observes exactly one new history entry
/// per call for that user, which only holds when track calls are serialised.
#[derive(Debug, Default)]
pub struct FixedRewardScorer {
    points: u32,
    failure: Option<String>,
    rewarded: Vec<Attraction>,
    delay: Duration,
    scored: AtomicUsize,
    recalculations: AtomicUsize,
    per_user: Mutex<HashMap<UserId, usize>>,
    interleavings: AtomicUsize,
}

impl FixedRewardScorer {
    /// Score every attraction at `points`.
    #[must_use]
    pub fn new(points: u32) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }

    /// Fail every call with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Grant rewards for `attractions` during recalculation.
    #[must_use]
    pub fn rewarding(mut self, attractions: Vec<Attraction>) -> Self {
        self.rewarded = attractions;
        self
    }

    /// Sleep for `delay` inside every recalculation.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of `reward_points` calls.
    #[must_use]
    pub fn scored(&self) -> usize {
        self.scored.load(Ordering::SeqCst)
    }

    /// Number of `recalculate` calls.
    #[must_use]
    pub fn recalculations(&self) -> usize {
        self.recalculations.load(Ordering::SeqCst)
    }

    /// Recalculations that saw a history length other than their call count.
    #[must_use]
    pub fn interleavings(&self) -> usize {
        self.interleavings.load(Ordering::SeqCst)
    }

    fn fail(&self) -> Result<(), RewardError> {
        match &self.failure {
            Some(reason) => Err(RewardError::Unavailable {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl RewardScorer for FixedRewardScorer {
    fn reward_points(&self, _attraction: &Attraction, _user: &User) -> Result<u32, RewardError> {
        self.scored.fetch_add(1, Ordering::SeqCst);
        self.fail()?;
        Ok(self.points)
    }

    fn recalculate(&self, user: &mut User) -> Result<(), RewardError> {
        self.recalculations.fetch_add(1, Ordering::SeqCst);
        let calls = {
            let mut per_user = self.per_user.lock().unwrap_or_else(PoisonError::into_inner);
            let count = per_user.entry(user.id().clone()).or_insert(0);
            *count += 1;
            *count
        };
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        if calls != user.history().len() {
            self.interleavings.fetch_add(1, Ordering::SeqCst);
        }
        self.fail()?;
        let Some(position) = user.last_position().cloned() else {
            return Ok(());
        };
        for attraction in &self.rewarded {
            user.add_reward(UserReward {
                position: position.clone(),
                attraction: attraction.clone(),
                points: self.points,
            });
        }
        Ok(())
    }
}

/// `TripPricer` returning canned offers and remembering the last request.
#[derive(Debug, Default)]
pub struct RecordingPricer {
    offers: Vec<TripOffer>,
    failure: Option<String>,
    last_request: Mutex<Option<QuoteRequest>>,
}

impl RecordingPricer {
    /// Answer every request with `offers`.
    #[must_use]
    pub fn new(offers: Vec<TripOffer>) -> Self {
        Self {
            offers,
            ..Self::default()
        }
    }

    /// Fail every request with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Self::default()
        }
    }

    /// The most recent request, if any.
    #[must_use]
    pub fn last_request(&self) -> Option<QuoteRequest> {
        self.last_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl TripPricer for RecordingPricer {
    fn quote(&self, request: &QuoteRequest) -> Result<Vec<TripOffer>, PricingError> {
        *self
            .last_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(request.clone());
        if let Some(reason) = &self.failure {
            return Err(PricingError::Unavailable {
                reason: reason.clone(),
            });
        }
        Ok(self.offers.clone())
    }
}

/// A handful of real-world attractions in catalogue order.
#[must_use]
pub fn sample_attractions() -> Vec<Attraction> {
    let at = Coordinate::from_degrees_unchecked;
    vec![
        Attraction::new("Disneyland", at(33.817595, -117.922008)).with_locality("Anaheim", "CA"),
        Attraction::new("Jackson Hole", at(43.582767, -110.821999))
            .with_locality("Jackson Hole", "WY"),
        Attraction::new("Mojave National Preserve", at(35.141689, -115.510399))
            .with_locality("Kelso", "CA"),
        Attraction::new("Joshua Tree National Park", at(33.881866, -115.90065))
            .with_locality("Joshua Tree National Park", "CA"),
        Attraction::new("Buffalo National River", at(35.985512, -92.757652))
            .with_locality("St Joe", "AR"),
        Attraction::new("Hot Springs National Park", at(34.52153, -93.042267))
            .with_locality("Hot Springs", "AR"),
        Attraction::new("Kartchner Caverns State Park", at(31.837551, -110.347382))
            .with_locality("Benson", "AZ"),
        Attraction::new("Legend Valley", at(39.937778, -82.40667))
            .with_locality("Thornville", "OH"),
    ]
}

/// Offers used by pricing tests.
#[must_use]
pub fn sample_offers() -> Vec<TripOffer> {
    vec![
        TripOffer {
            provider: "Holiday Travels".to_owned(),
            price: 480.0,
            trip_id: "trip-1".to_owned(),
        },
        TripOffer {
            provider: "Enterprize Ventures Limited".to_owned(),
            price: 312.5,
            trip_id: "trip-2".to_owned(),
        },
    ]
}
