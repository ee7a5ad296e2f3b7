//! Distance between two coordinates.
//!
//! The engine ranks attractions with a flat approximation: both coordinates
//! are converted to radians and the planar Euclidean separation of the
//! differences is scaled by the Earth's mean radius. This is not a
//! great-circle distance. It understates separations away from the equator
//! and has no antimeridian wraparound, so longitudes `179` and `-179` come out
//! roughly `358` degrees apart. Rankings depend on this exact formula; keep it.

use geo::Coord;

use crate::Coordinate;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Flat-approximation distance in kilometres between `a` and `b`.
///
/// Symmetric, non-negative, and zero exactly when the inputs are equal. Inputs
/// are not validated.
///
/// # Examples
/// ```
/// use tourguide_core::{Coordinate, flat_distance_km};
///
/// let origin = Coordinate::from_degrees_unchecked(0.0, 0.0);
/// let north = Coordinate::from_degrees_unchecked(1.0, 0.0);
/// let km = flat_distance_km(origin, north);
/// assert!((km - 111.194_926_6).abs() < 1e-6);
/// assert_eq!(km, flat_distance_km(north, origin));
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "distance maths scales a radian separation by the Earth radius"
)]
pub fn flat_distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let from = to_radians(a.into());
    let to = to_radians(b.into());
    let delta = to - from;
    EARTH_RADIUS_KM * (delta.y * delta.y + delta.x * delta.x).sqrt()
}

fn to_radians(coord: Coord<f64>) -> Coord<f64> {
    Coord {
        x: coord.x.to_radians(),
        y: coord.y.to_radians(),
    }
}
