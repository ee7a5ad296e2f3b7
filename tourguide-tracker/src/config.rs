use std::time::Duration;

use crate::TrackerError;

/// Default pause between tracking rounds.
pub const DEFAULT_TRACKING_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Default number of users tracked concurrently within a round.
pub const DEFAULT_MAX_CONCURRENT_TRACKS: usize = 16;

/// Configuration for [`crate::Tracker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Time between the start of consecutive rounds.
    pub interval: Duration,
    /// Upper bound on `track_user` calls in flight at once.
    pub max_concurrent_tracks: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_TRACKING_INTERVAL,
            max_concurrent_tracks: DEFAULT_MAX_CONCURRENT_TRACKS,
        }
    }
}

impl TrackerConfig {
    /// Set the round interval.
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the per-round concurrency bound.
    #[must_use]
    pub const fn with_max_concurrent_tracks(mut self, max_concurrent_tracks: usize) -> Self {
        self.max_concurrent_tracks = max_concurrent_tracks;
        self
    }

    /// Check the configuration before scheduling.
    ///
    /// # Errors
    /// [`TrackerError::ZeroInterval`] or [`TrackerError::ZeroConcurrency`].
    pub fn validate(&self) -> Result<(), TrackerError> {
        if self.interval.is_zero() {
            return Err(TrackerError::ZeroInterval);
        }
        if self.max_concurrent_tracks == 0 {
            return Err(TrackerError::ZeroConcurrency);
        }
        Ok(())
    }
}
