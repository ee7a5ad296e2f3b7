//! Unit tests for the background tracker.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use rstest::rstest;
use tourguide_core::test_support::{FixedRewardScorer, RecordingPricer, ScriptedPositionSource};
use tourguide_core::{Coordinate, MemoryCatalog, MemoryUserStore, User};

use super::*;

type TestGuide = TourGuide<
    MemoryUserStore,
    ScriptedPositionSource,
    MemoryCatalog,
    FixedRewardScorer,
    RecordingPricer,
>;

fn user_ids(count: usize) -> Vec<UserId> {
    (0..count)
        .map(|n| UserId::new(format!("internalUser{n}")))
        .collect()
}

fn guide_with(
    users: usize,
    source: ScriptedPositionSource,
    scorer: FixedRewardScorer,
) -> Arc<TestGuide> {
    let store = MemoryUserStore::with_users(
        user_ids(users)
            .into_iter()
            .map(|id| User::new(id.clone(), id.as_str())),
    );
    Arc::new(TourGuide::new(
        store,
        source,
        MemoryCatalog::default(),
        scorer,
        RecordingPricer::default(),
    ))
}

fn walking() -> ScriptedPositionSource {
    ScriptedPositionSource::walking(Coordinate::from_degrees_unchecked(0.0, 0.0))
}

fn fast() -> TrackerConfig {
    TrackerConfig::default().with_interval(Duration::from_millis(10))
}

fn total_history(guide: &TestGuide) -> usize {
    guide.users().iter().map(|user| user.history().len()).sum()
}

/// Records how many track calls overlap.
#[derive(Debug, Default)]
struct OverlapProbe {
    users: Vec<UserId>,
    panic_on: Option<UserId>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

impl TrackUsers for OverlapProbe {
    fn tracked_users(&self) -> Vec<UserId> {
        self.users.clone()
    }

    fn track(&self, id: &UserId) -> Result<(), TourGuideError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.panic_on.as_ref() == Some(id) {
            panic!("probe told to fail on {id}");
        }
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(10));
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

#[rstest]
fn zero_interval_is_rejected_at_construction() {
    let guide = guide_with(1, walking(), FixedRewardScorer::new(1));
    let result = Tracker::new(guide, TrackerConfig::default().with_interval(Duration::ZERO));
    assert!(matches!(result, Err(TrackerError::ZeroInterval)));
}

#[tokio::test]
async fn a_round_tracks_every_user_once() {
    let guide = guide_with(5, walking(), FixedRewardScorer::new(1));
    let tracker = Tracker::new(Arc::clone(&guide), fast()).expect("valid config");

    let round = tracker.track_all().await;

    assert_eq!((round.tracked, round.failed), (5, 0));
    for user in guide.users() {
        assert_eq!(user.history().len(), 1, "{} tracked once", user.id());
    }
    assert_eq!(guide.tracker().scorer().recalculations(), 5);
}

#[tokio::test]
async fn an_empty_store_makes_an_empty_round() {
    let guide = guide_with(0, walking(), FixedRewardScorer::new(1));
    let tracker = Tracker::new(guide, fast()).expect("valid config");
    let round = tracker.track_all().await;
    assert_eq!((round.tracked, round.failed), (0, 0));
}

#[tokio::test]
async fn failures_are_counted_without_stopping_the_round() {
    let guide = guide_with(
        3,
        ScriptedPositionSource::failing("gps offline"),
        FixedRewardScorer::new(1),
    );
    let tracker = Tracker::new(Arc::clone(&guide), fast()).expect("valid config");

    let round = tracker.track_all().await;

    assert_eq!((round.tracked, round.failed), (0, 3));
    assert_eq!(guide.tracker().source().samples_taken(), 3);
    assert_eq!(total_history(&guide), 0);
}

#[tokio::test]
async fn panicking_tracks_are_counted_as_failures() {
    let users = user_ids(3);
    let probe = Arc::new(OverlapProbe {
        panic_on: users.first().cloned(),
        users,
        ..OverlapProbe::default()
    });
    let tracker = Tracker::new(Arc::clone(&probe), fast()).expect("valid config");

    let round = tracker.track_all().await;

    assert_eq!((round.tracked, round.failed), (2, 1));
    assert_eq!(probe.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrency_is_bounded() {
    let probe = Arc::new(OverlapProbe {
        users: user_ids(8),
        ..OverlapProbe::default()
    });
    let config = fast().with_max_concurrent_tracks(2);
    let tracker = Tracker::new(Arc::clone(&probe), config).expect("valid config");

    let round = tracker.track_all().await;

    assert_eq!(round.tracked, 8);
    let peak = probe.peak.load(Ordering::SeqCst);
    assert!((1..=2).contains(&peak), "peak in-flight tracks was {peak}");
}

#[tokio::test]
async fn a_cancelled_tracker_runs_no_rounds() {
    let guide = guide_with(2, walking(), FixedRewardScorer::new(1));
    let tracker = Tracker::new(Arc::clone(&guide), fast()).expect("valid config");
    let shutdown = CancellationToken::new();
    shutdown.cancel();

    let summary = tracker.run(shutdown).await;

    assert_eq!(summary, TrackerSummary::default());
    assert_eq!(total_history(&guide), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn spawned_tracker_repeats_rounds_until_stopped() {
    let guide = guide_with(3, walking(), FixedRewardScorer::new(1));
    let handle = Tracker::new(Arc::clone(&guide), fast())
        .expect("valid config")
        .spawn();

    let waited = tokio::time::timeout(Duration::from_secs(5), async {
        while guide.tracker().scorer().recalculations() < 6 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    assert!(waited.is_ok(), "tracker did not complete two rounds");

    let summary = handle.stop().await.expect("tracker task completes");

    assert!(summary.rounds >= 2, "only {} rounds ran", summary.rounds);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.tracked, total_history(&guide));
    assert_eq!(guide.tracker().scorer().interleavings(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn background_and_direct_tracking_of_one_user_serialise() {
    let guide = guide_with(
        1,
        walking(),
        FixedRewardScorer::new(1).with_delay(Duration::from_millis(2)),
    );
    let id = user_ids(1).into_iter().next().expect("one user");
    let tracker = Tracker::new(Arc::clone(&guide), fast()).expect("valid config");

    let direct = {
        let shared = Arc::clone(&guide);
        tokio::task::spawn_blocking(move || {
            for _ in 0..5 {
                shared.track_user(&id).expect("direct track");
            }
        })
    };
    for _ in 0..5 {
        let round = tracker.track_all().await;
        assert_eq!(round.tracked, 1);
    }
    direct.await.expect("direct tracking completes");

    assert_eq!(total_history(&guide), 10);
    assert_eq!(guide.tracker().scorer().interleavings(), 0);
}

#[tokio::test]
async fn stop_reports_the_accumulated_summary() {
    let guide = guide_with(2, walking(), FixedRewardScorer::new(1));
    let handle = Tracker::new(Arc::clone(&guide), TrackerConfig::default())
        .expect("valid config")
        .spawn();
    let token = handle.shutdown_token();

    // The first tick fires immediately; wait for that round.
    let waited = tokio::time::timeout(Duration::from_secs(5), async {
        while total_history(&guide) < 2 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    assert!(waited.is_ok(), "first round did not run");
    assert!(!token.is_cancelled());

    let summary = handle.stop().await.expect("tracker task completes");
    assert!(token.is_cancelled());
    assert_eq!(
        summary,
        TrackerSummary {
            rounds: 1,
            tracked: 2,
            failed: 0,
        }
    );
}
