//! Trip pricing aggregator boundary.

use thiserror::Error;

use crate::{TripOffer, UserId};

/// Parameters of a pricing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    /// Credential for the pricing service.
    pub api_key: String,
    /// User the quote is for.
    pub user_id: UserId,
    /// Number of adult travellers.
    pub adults: u32,
    /// Number of child travellers.
    pub children: u32,
    /// Trip length in nights.
    pub trip_duration_nights: u32,
    /// Sum of the user's reward points, used as a discount signal.
    pub cumulative_reward_points: u64,
}

/// Errors from [`TripPricer::quote`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// The pricing service could not be reached or refused the request.
    #[error("trip pricing unavailable: {reason}")]
    Unavailable {
        /// Human-readable cause reported by the pricer.
        reason: String,
    },
}

/// Convert a user's reward total into provider offers.
///
/// Offers are returned in the provider's preferred order.
pub trait TripPricer: Send + Sync {
    /// Request offers for `request`.
    ///
    /// # Errors
    /// Returns [`PricingError`] when no quote can be produced.
    fn quote(&self, request: &QuoteRequest) -> Result<Vec<TripOffer>, PricingError>;
}
