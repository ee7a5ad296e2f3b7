use thiserror::Error;
use tokio::task::JoinError;

/// Errors raised while configuring or stopping a [`crate::Tracker`].
#[derive(Debug, Error)]
pub enum TrackerError {
    /// A zero interval would spin without pausing.
    #[error("tracking interval must be greater than zero")]
    ZeroInterval,
    /// No track call could ever be scheduled.
    #[error("max concurrent tracks must be greater than zero")]
    ZeroConcurrency,
    /// The tracking task panicked or was aborted.
    #[error("tracking task failed: {0}")]
    Join(#[from] JoinError),
}
