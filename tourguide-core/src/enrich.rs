//! Join ranked attractions with a user's reward scores.

use crate::{Attraction, Coordinate, RankedAttraction, RewardError, flat_distance_km};

/// Score each ranked attraction and attach its distance from `reference`.
///
/// Output order and length match `ranked`. The scorer runs exactly once per
/// attraction, in order, and the first failure aborts the join.
///
/// # Errors
/// Propagates the first [`RewardError`] returned by `scorer`.
///
/// # Examples
/// ```
/// use tourguide_core::{Attraction, Coordinate, enrich};
///
/// let reference = Coordinate::from_degrees_unchecked(0.0, 0.0);
/// let ranked = vec![Attraction::new("pier", Coordinate::from_degrees_unchecked(0.0, 1.0))];
/// let enriched = enrich(reference, &ranked, |_| Ok(42))?;
/// assert_eq!(enriched[0].reward_points, Some(42));
/// # Ok::<(), tourguide_core::RewardError>(())
/// ```
pub fn enrich<F>(
    reference: Coordinate,
    ranked: &[Attraction],
    mut scorer: F,
) -> Result<Vec<RankedAttraction>, RewardError>
where
    F: FnMut(&Attraction) -> Result<u32, RewardError>,
{
    ranked
        .iter()
        .map(|attraction| {
            let points = scorer(attraction)?;
            Ok(RankedAttraction {
                attraction: attraction.clone(),
                user_coordinate: reference,
                distance_km: flat_distance_km(reference, attraction.coordinate),
                reward_points: Some(points),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn at(latitude: f64, longitude: f64) -> Coordinate {
        Coordinate::from_degrees_unchecked(latitude, longitude)
    }

    #[rstest]
    fn preserves_order_and_scores_each_once() {
        let ranked = vec![
            Attraction::new("b", at(0.0, 2.0)),
            Attraction::new("a", at(0.0, 1.0)),
        ];
        let mut calls = Vec::new();
        let enriched = enrich(at(0.0, 0.0), &ranked, |attraction| {
            calls.push(attraction.name.clone());
            Ok(u32::try_from(calls.len()).unwrap_or(u32::MAX) * 10)
        })
        .expect("scorer succeeds");

        assert_eq!(calls, ["b", "a"]);
        let summary: Vec<_> = enriched
            .iter()
            .map(|r| (r.attraction.name.as_str(), r.reward_points))
            .collect();
        assert_eq!(summary, [("b", Some(10)), ("a", Some(20))]);
    }

    #[rstest]
    fn stops_at_first_scoring_failure() {
        let ranked = vec![
            Attraction::new("a", at(0.0, 1.0)),
            Attraction::new("b", at(0.0, 2.0)),
            Attraction::new("c", at(0.0, 3.0)),
        ];
        let mut calls = 0_u32;
        let err = enrich(at(0.0, 0.0), &ranked, |attraction| {
            calls += 1;
            if attraction.name == "b" {
                Err(RewardError::Unavailable {
                    reason: "reward central offline".to_owned(),
                })
            } else {
                Ok(1)
            }
        })
        .expect_err("second attraction fails");
        assert_eq!(calls, 2);
        assert!(matches!(err, RewardError::Unavailable { .. }));
    }

    #[rstest]
    fn empty_input_is_not_an_error() {
        let enriched = enrich(at(0.0, 0.0), &[], |_| Ok(1)).expect("nothing to score");
        assert!(enriched.is_empty());
    }
}
