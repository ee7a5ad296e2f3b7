use crate::InvalidParameter;

/// Default number of attractions returned by nearby queries.
pub const DEFAULT_NEARBY_COUNT: usize = 5;

/// Default credential passed to the trip pricer.
pub const DEFAULT_TRIP_PRICER_API_KEY: &str = "test-server-api-key";

/// Configuration for [`crate::TourGuide`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourGuideConfig {
    /// Number of attractions returned by nearby queries.
    pub nearby_count: usize,
    /// Credential forwarded to the trip pricer.
    pub trip_pricer_api_key: String,
}

impl Default for TourGuideConfig {
    fn default() -> Self {
        Self {
            nearby_count: DEFAULT_NEARBY_COUNT,
            trip_pricer_api_key: DEFAULT_TRIP_PRICER_API_KEY.to_owned(),
        }
    }
}

impl TourGuideConfig {
    /// Set the nearby attraction count.
    #[must_use]
    pub fn with_nearby_count(mut self, nearby_count: usize) -> Self {
        self.nearby_count = nearby_count;
        self
    }

    /// Set the trip pricer credential.
    #[must_use]
    pub fn with_trip_pricer_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.trip_pricer_api_key = api_key.into();
        self
    }

    /// Check the configuration before use.
    ///
    /// # Errors
    /// Returns [`InvalidParameter::ZeroNearbyCount`] when `nearby_count` is
    /// zero.
    pub fn validate(&self) -> Result<(), InvalidParameter> {
        if self.nearby_count == 0 {
            return Err(InvalidParameter::ZeroNearbyCount);
        }
        Ok(())
    }
}
