//! Facade crate for the TourGuide engine.
//!
//! This crate re-exports the core domain types and engine, and exposes the
//! periodic background tracker behind the `tracker` feature flag.

#![forbid(unsafe_code)]

pub use tourguide_core::{
    Attraction, AttractionCatalog, Coordinate, CoordinateError, DEFAULT_NEARBY_COUNT,
    EARTH_RADIUS_KM, InvalidParameter, LocationTracker, MemoryCatalog, MemoryUserStore,
    ObservedPosition, PositionError, PositionSource, PricingError, QuoteRequest,
    RankedAttraction, RewardError, RewardScorer, TourGuide, TourGuideConfig, TourGuideError,
    TrackError, TripOffer, TripPricer, User, UserHandle, UserId, UserPreferences, UserReward,
    UserStore, enrich, flat_distance_km, nearest, rank,
};

#[cfg(feature = "tracker")]
pub use tourguide_tracker::{
    DEFAULT_MAX_CONCURRENT_TRACKS, DEFAULT_TRACKING_INTERVAL, RoundSummary, TrackUsers, Tracker,
    TrackerConfig, TrackerError, TrackerHandle, TrackerSummary,
};
