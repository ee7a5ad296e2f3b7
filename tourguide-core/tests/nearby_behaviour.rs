#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]

//! Behaviour tests for nearby attraction queries.

use std::cell::{Cell, RefCell};

use chrono::Utc;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tourguide_core::test_support::{
    FixedRewardScorer, RecordingPricer, ScriptedPositionSource, sample_attractions,
};
use tourguide_core::{
    Attraction, Coordinate, DEFAULT_NEARBY_COUNT, MemoryCatalog, MemoryUserStore,
    ObservedPosition, RankedAttraction, TourGuide, TourGuideConfig, TourGuideError, User, UserId,
};

type Outcome = Option<Result<Vec<RankedAttraction>, TourGuideError>>;

/// One degree of longitude on the equator, in kilometres.
const KM_PER_DEGREE: f64 = 111.194_926_644_558_73;

fn at(latitude: f64, longitude: f64) -> Coordinate {
    Coordinate::from_degrees_unchecked(latitude, longitude)
}

fn east_of_origin(name: &str, km: f64) -> Attraction {
    Attraction::new(name, at(0.0, km / KM_PER_DEGREE))
}

#[fixture]
fn catalogue() -> RefCell<Vec<Attraction>> {
    RefCell::new(Vec::new())
}

#[fixture]
fn count() -> Cell<usize> {
    Cell::new(DEFAULT_NEARBY_COUNT)
}

#[fixture]
fn points() -> Cell<u32> {
    Cell::new(0)
}

#[fixture]
fn outcome() -> RefCell<Outcome> {
    RefCell::new(None)
}

fn query(
    catalogue: &RefCell<Vec<Attraction>>,
    count: &Cell<usize>,
    points: &Cell<u32>,
    reference: Coordinate,
    enriched: bool,
) -> Result<Vec<RankedAttraction>, TourGuideError> {
    let visitor = UserId::new("visitor");
    let guide = TourGuide::with_config(
        MemoryUserStore::with_users([User::new(visitor.clone(), "Visitor")]),
        ScriptedPositionSource::fixed(reference),
        MemoryCatalog::new(catalogue.borrow().clone()),
        FixedRewardScorer::new(points.get()),
        RecordingPricer::default(),
        TourGuideConfig::default().with_nearby_count(count.get()),
    )
    .expect("nearby count is positive");
    let position = ObservedPosition::new(visitor.clone(), reference, Utc::now());
    if enriched {
        guide.nearby_attractions_enriched(&position, &visitor)
    } else {
        guide.nearby_attractions_ranked(&position)
    }
}

fn ranked(outcome: &RefCell<Outcome>) -> Vec<RankedAttraction> {
    outcome
        .borrow()
        .clone()
        .expect("query ran")
        .expect("query succeeded")
}

#[given("attractions 10, 3 and 7 kilometres east of the origin")]
fn given_spread(#[from(catalogue)] catalogue: &RefCell<Vec<Attraction>>) {
    *catalogue.borrow_mut() = vec![
        east_of_origin("ten", 10.0),
        east_of_origin("three", 3.0),
        east_of_origin("seven", 7.0),
    ];
}

#[given("a nearby count of 2")]
fn given_count_two(#[from(count)] count: &Cell<usize>) {
    count.set(2);
}

#[given("an empty attraction catalogue")]
fn given_empty(#[from(catalogue)] catalogue: &RefCell<Vec<Attraction>>) {
    catalogue.borrow_mut().clear();
}

#[given("an attraction on the equator at longitude -179")]
fn given_across_meridian(#[from(catalogue)] catalogue: &RefCell<Vec<Attraction>>) {
    *catalogue.borrow_mut() = vec![Attraction::new("dateline buoy", at(0.0, -179.0))];
}

#[given("the sample attraction catalogue")]
fn given_samples(#[from(catalogue)] catalogue: &RefCell<Vec<Attraction>>) {
    *catalogue.borrow_mut() = sample_attractions();
}

#[given("a reward scorer awarding 75 points")]
fn given_points(#[from(points)] points: &Cell<u32>) {
    points.set(75);
}

#[when("nearby attractions are ranked from the origin")]
fn when_ranked_from_origin(
    #[from(catalogue)] catalogue: &RefCell<Vec<Attraction>>,
    #[from(count)] count: &Cell<usize>,
    #[from(points)] points: &Cell<u32>,
    #[from(outcome)] outcome: &RefCell<Outcome>,
) {
    *outcome.borrow_mut() = Some(query(catalogue, count, points, at(0.0, 0.0), false));
}

#[when("nearby attractions are ranked from the equator at longitude 179")]
fn when_ranked_from_dateline(
    #[from(catalogue)] catalogue: &RefCell<Vec<Attraction>>,
    #[from(count)] count: &Cell<usize>,
    #[from(points)] points: &Cell<u32>,
    #[from(outcome)] outcome: &RefCell<Outcome>,
) {
    *outcome.borrow_mut() = Some(query(catalogue, count, points, at(0.0, 179.0), false));
}

#[when("enriched attractions are requested near Disneyland")]
fn when_enriched(
    #[from(catalogue)] catalogue: &RefCell<Vec<Attraction>>,
    #[from(count)] count: &Cell<usize>,
    #[from(points)] points: &Cell<u32>,
    #[from(outcome)] outcome: &RefCell<Outcome>,
) {
    let reference = at(33.8, -117.9);
    *outcome.borrow_mut() = Some(query(catalogue, count, points, reference, true));
}

#[then("the attractions 3 and 7 kilometres away are returned in that order")]
fn then_ordered(#[from(outcome)] outcome: &RefCell<Outcome>) {
    let names: Vec<String> = ranked(outcome)
        .into_iter()
        .map(|entry| entry.attraction.name)
        .collect();
    assert_eq!(names, ["three", "seven"]);
}

#[then("no attractions are returned")]
fn then_empty(#[from(outcome)] outcome: &RefCell<Outcome>) {
    assert!(ranked(outcome).is_empty());
}

#[then("the reported distance exceeds 39000 kilometres")]
fn then_no_wraparound(#[from(outcome)] outcome: &RefCell<Outcome>) {
    let entries = ranked(outcome);
    let entry = entries.first().expect("one attraction");
    assert!(
        entry.distance_km > 39_000.0,
        "distance {} km looks wrapped",
        entry.distance_km
    );
}

#[then("five attractions are returned with 75 points each")]
fn then_enriched(#[from(outcome)] outcome: &RefCell<Outcome>) {
    let entries = ranked(outcome);
    assert_eq!(entries.len(), 5);
    assert!(entries.iter().all(|entry| entry.reward_points == Some(75)));
}

#[then("Disneyland is listed first")]
fn then_disneyland_first(#[from(outcome)] outcome: &RefCell<Outcome>) {
    let entries = ranked(outcome);
    assert_eq!(
        entries.first().map(|entry| entry.attraction.name.as_str()),
        Some("Disneyland")
    );
}

#[scenario(path = "tests/features/nearby.feature", index = 0)]
fn closest_first(
    catalogue: RefCell<Vec<Attraction>>,
    count: Cell<usize>,
    points: Cell<u32>,
    outcome: RefCell<Outcome>,
) {
    let _ = (catalogue, count, points, outcome);
}

#[scenario(path = "tests/features/nearby.feature", index = 1)]
fn empty_catalogue(
    catalogue: RefCell<Vec<Attraction>>,
    count: Cell<usize>,
    points: Cell<u32>,
    outcome: RefCell<Outcome>,
) {
    let _ = (catalogue, count, points, outcome);
}

#[scenario(path = "tests/features/nearby.feature", index = 2)]
fn no_antimeridian_wrap(
    catalogue: RefCell<Vec<Attraction>>,
    count: Cell<usize>,
    points: Cell<u32>,
    outcome: RefCell<Outcome>,
) {
    let _ = (catalogue, count, points, outcome);
}

#[scenario(path = "tests/features/nearby.feature", index = 3)]
fn enriched_with_points(
    catalogue: RefCell<Vec<Attraction>>,
    count: Cell<usize>,
    points: Cell<u32>,
    outcome: RefCell<Outcome>,
) {
    let _ = (catalogue, count, points, outcome);
}
