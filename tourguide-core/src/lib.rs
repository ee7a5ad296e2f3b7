//! Core domain and engine for the TourGuide service.
//!
//! The crate tracks users' positions, ranks nearby attractions by a flat
//! distance approximation and joins them with reward scores. External
//! services (position source, reward scorer, trip pricer) and storage sit
//! behind traits so callers can swap real backends for the in-memory and
//! test implementations provided here.

#![forbid(unsafe_code)]

mod attraction;
mod catalog;
mod coordinate;
mod enrich;
mod geo_math;
mod guide;
mod position;
mod pricing;
mod ranking;
mod rewards;
mod tracking;
mod user;

pub mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use attraction::{Attraction, RankedAttraction};
pub use catalog::{AttractionCatalog, MemoryCatalog};
pub use coordinate::{Coordinate, CoordinateError, LATITUDE_RANGE, LONGITUDE_RANGE};
pub use enrich::enrich;
pub use geo_math::{EARTH_RADIUS_KM, flat_distance_km};
pub use guide::{
    DEFAULT_NEARBY_COUNT, DEFAULT_TRIP_PRICER_API_KEY, TourGuide, TourGuideConfig, TourGuideError,
};
pub use position::{PositionError, PositionSource};
pub use pricing::{PricingError, QuoteRequest, TripPricer};
pub use ranking::{nearest, rank};
pub use rewards::{RewardError, RewardScorer};
pub use store::{MemoryUserStore, UserHandle, UserStore, lock_user};
pub use tracking::{InvalidParameter, LocationTracker, TrackError};
pub use user::{ObservedPosition, TripOffer, User, UserId, UserPreferences, UserReward};
