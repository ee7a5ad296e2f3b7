//! Select the attractions nearest to a reference coordinate.
//!
//! Candidates are ordered by ascending [`flat_distance_km`] using a stable
//! sort, so attractions at equal distance keep their catalogue order. The
//! result holds at most `k` entries; `k == 0` and an empty candidate set both
//! produce an empty result rather than an error.

use std::cmp::Ordering;

use crate::{Attraction, Coordinate, RankedAttraction, flat_distance_km};

/// The `k` attractions nearest to `reference`, closest first.
///
/// # Examples
/// ```
/// use tourguide_core::{Attraction, Coordinate, nearest};
///
/// let at = Coordinate::from_degrees_unchecked;
/// let candidates = vec![
///     Attraction::new("far", at(0.0, 3.0)),
///     Attraction::new("near", at(0.0, 1.0)),
///     Attraction::new("middle", at(0.0, 2.0)),
/// ];
/// let names: Vec<_> = nearest(at(0.0, 0.0), &candidates, 2)
///     .into_iter()
///     .map(|a| a.name)
///     .collect();
/// assert_eq!(names, ["near", "middle"]);
/// ```
#[must_use]
pub fn nearest(reference: Coordinate, candidates: &[Attraction], k: usize) -> Vec<Attraction> {
    select(reference, candidates, k)
        .into_iter()
        .map(|(attraction, _)| attraction.clone())
        .collect()
}

/// Like [`nearest`], keeping the distance used for ordering.
///
/// Every entry has `reward_points == None`.
#[must_use]
pub fn rank(reference: Coordinate, candidates: &[Attraction], k: usize) -> Vec<RankedAttraction> {
    select(reference, candidates, k)
        .into_iter()
        .map(|(attraction, distance_km)| RankedAttraction {
            attraction: attraction.clone(),
            user_coordinate: reference,
            distance_km,
            reward_points: None,
        })
        .collect()
}

fn select(reference: Coordinate, candidates: &[Attraction], k: usize) -> Vec<(&Attraction, f64)> {
    if k == 0 {
        return Vec::new();
    }
    let mut measured: Vec<(&Attraction, f64)> = candidates
        .iter()
        .map(|attraction| (attraction, flat_distance_km(reference, attraction.coordinate)))
        .collect();
    // `sort_by` is stable: equal distances keep candidate order.
    measured.sort_by(|(_, lhs), (_, rhs)| compare_distance(*lhs, *rhs));
    measured.truncate(k);
    measured
}

/// Total order on distances with NaN after every number.
fn compare_distance(lhs: f64, rhs: f64) -> Ordering {
    match (lhs.is_nan(), rhs.is_nan()) {
        (false, false) => lhs.total_cmp(&rhs),
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
    }
}
