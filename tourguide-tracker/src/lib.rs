//! Periodic background tracking for TourGuide users.
//!
//! The [`Tracker`] is an independent Tokio task. Each round it lists the
//! stored users and issues one `track_user` call per user on the blocking
//! thread pool, with a bounded number in flight. Rounds start on a fixed
//! interval and are never interrupted: cancellation is only observed between
//! rounds, so a user's sample-append-recalculate sequence always runs to
//! completion. Per-user serialisation is provided by the guide itself, which
//! means the tracker and request handlers may track the same user at once.
//!
//! # Examples
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use tourguide_core::test_support::{
//!     FixedRewardScorer, RecordingPricer, ScriptedPositionSource, sample_attractions,
//! };
//! use tourguide_core::{Coordinate, MemoryCatalog, MemoryUserStore, TourGuide};
//! use tourguide_tracker::{Tracker, TrackerConfig};
//!
//! # async fn demo() -> Result<(), tourguide_tracker::TrackerError> {
//! let guide = Arc::new(TourGuide::new(
//!     MemoryUserStore::default(),
//!     ScriptedPositionSource::walking(Coordinate::from_degrees_unchecked(0.0, 0.0)),
//!     MemoryCatalog::new(sample_attractions()),
//!     FixedRewardScorer::new(10),
//!     RecordingPricer::default(),
//! ));
//! let config = TrackerConfig::default().with_interval(Duration::from_secs(60));
//! let handle = Tracker::new(guide, config)?.spawn();
//! // ... serve requests ...
//! let summary = handle.stop().await?;
//! println!("tracked {} users over {} rounds", summary.tracked, summary.rounds);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod config;
mod error;

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::{StreamExt, stream};
use log::{debug, info, warn};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tourguide_core::{
    AttractionCatalog, PositionSource, RewardScorer, TourGuide, TourGuideError, TripPricer, UserId,
    UserStore,
};

pub use config::{DEFAULT_MAX_CONCURRENT_TRACKS, DEFAULT_TRACKING_INTERVAL, TrackerConfig};
pub use error::TrackerError;

/// Something whose users can be tracked in the background.
///
/// Implemented for [`TourGuide`]; tests substitute lighter doubles.
pub trait TrackUsers: Send + Sync + 'static {
    /// Users to visit this round.
    fn tracked_users(&self) -> Vec<UserId>;

    /// Track one user. Runs on the blocking thread pool.
    ///
    /// # Errors
    /// Returns the guide's error; the tracker logs it and moves on.
    fn track(&self, id: &UserId) -> Result<(), TourGuideError>;
}

impl<S, P, C, R, T> TrackUsers for TourGuide<S, P, C, R, T>
where
    S: UserStore + 'static,
    P: PositionSource + 'static,
    C: AttractionCatalog + 'static,
    R: RewardScorer + 'static,
    T: TripPricer + 'static,
{
    fn tracked_users(&self) -> Vec<UserId> {
        self.user_ids()
    }

    fn track(&self, id: &UserId) -> Result<(), TourGuideError> {
        self.track_user(id).map(drop)
    }
}

/// Outcome of a single tracking round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundSummary {
    /// Users tracked successfully.
    pub tracked: usize,
    /// Users whose tracking failed or panicked.
    pub failed: usize,
    /// Wall-clock duration of the round.
    pub elapsed: Duration,
}

/// Totals accumulated by [`Tracker::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackerSummary {
    /// Completed rounds.
    pub rounds: u64,
    /// Successful track calls across all rounds.
    pub tracked: usize,
    /// Failed track calls across all rounds.
    pub failed: usize,
}

impl TrackerSummary {
    fn record(&mut self, round: &RoundSummary) {
        self.rounds = self.rounds.saturating_add(1);
        self.tracked = self.tracked.saturating_add(round.tracked);
        self.failed = self.failed.saturating_add(round.failed);
    }
}

/// Schedules tracking rounds over every user of a guide.
#[derive(Debug)]
pub struct Tracker<G> {
    guide: Arc<G>,
    config: TrackerConfig,
}

impl<G: TrackUsers> Tracker<G> {
    /// Build a tracker for `guide`.
    ///
    /// # Errors
    /// Returns [`TrackerError`] when `config` fails validation.
    pub fn new(guide: Arc<G>, config: TrackerConfig) -> Result<Self, TrackerError> {
        config.validate()?;
        Ok(Self { guide, config })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Track every user once, at most `max_concurrent_tracks` at a time.
    ///
    /// Failures are logged and counted; they never stop the round.
    pub async fn track_all(&self) -> RoundSummary {
        let started = Instant::now();
        let users = self.guide.tracked_users();
        let total = users.len();
        let tracked = stream::iter(users)
            .map(|id| track_one(Arc::clone(&self.guide), id))
            .buffer_unordered(self.config.max_concurrent_tracks)
            .filter(|succeeded| std::future::ready(*succeeded))
            .count()
            .await;
        RoundSummary {
            tracked,
            failed: total.saturating_sub(tracked),
            elapsed: started.elapsed(),
        }
    }

    /// Run rounds on the configured interval until `shutdown` is cancelled.
    ///
    /// The first round starts immediately. A round in progress when
    /// `shutdown` fires completes before the loop exits.
    pub async fn run(self, shutdown: CancellationToken) -> TrackerSummary {
        info!(
            "tracker starting: interval {:?}, up to {} concurrent tracks",
            self.config.interval, self.config.max_concurrent_tracks
        );
        let mut ticker = tokio::time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut summary = TrackerSummary::default();

        loop {
            tokio::select! {
                biased;

                () = shutdown.cancelled() => {
                    info!("tracker shutting down");
                    break;
                }

                _ = ticker.tick() => {
                    let round = self.track_all().await;
                    debug!(
                        "tracked {} users ({} failed) in {:?}",
                        round.tracked, round.failed, round.elapsed
                    );
                    summary.record(&round);
                }
            }
        }

        info!(
            "tracker stopped after {} rounds: {} tracked, {} failed",
            summary.rounds, summary.tracked, summary.failed
        );
        summary
    }

    /// Run the tracker on the current Tokio runtime.
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    #[must_use]
    pub fn spawn(self) -> TrackerHandle {
        let shutdown = CancellationToken::new();
        let task = tokio::spawn(self.run(shutdown.clone()));
        TrackerHandle { shutdown, task }
    }
}

async fn track_one<G: TrackUsers>(guide: Arc<G>, id: UserId) -> bool {
    let task_id = id.clone();
    match tokio::task::spawn_blocking(move || guide.track(&task_id)).await {
        Ok(Ok(())) => true,
        Ok(Err(err)) => {
            warn!("tracking {id} failed: {err}");
            false
        }
        Err(err) => {
            warn!("tracking task for {id} did not complete: {err}");
            false
        }
    }
}

/// Handle to a tracker spawned with [`Tracker::spawn`].
#[derive(Debug)]
pub struct TrackerHandle {
    shutdown: CancellationToken,
    task: JoinHandle<TrackerSummary>,
}

impl TrackerHandle {
    /// A clone of the token that stops the tracker.
    #[must_use]
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Report whether the tracking task has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Request shutdown and wait for the in-flight round to finish.
    ///
    /// # Errors
    /// [`TrackerError::Join`] when the tracking task panicked.
    pub async fn stop(self) -> Result<TrackerSummary, TrackerError> {
        self.shutdown.cancel();
        Ok(self.task.await?)
    }
}

#[cfg(test)]
mod tests;
