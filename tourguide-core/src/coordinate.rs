//! Geographic coordinates in decimal degrees.
//!
//! [`Coordinate`] is the value type shared by positions and attractions. The
//! checked constructor guards public entry points; the unchecked constructor
//! exists for trusted reference data and for the distance maths, which never
//! validates its input.

use geo::{Coord, Point};
use thiserror::Error;

/// Valid latitude range in degrees.
pub const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;

/// Valid longitude range in degrees.
pub const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// A WGS84 latitude/longitude pair in degrees.
///
/// Converts into [`geo::Coord`] using the `x = longitude`, `y = latitude`
/// axis order.
///
/// # Examples
/// ```
/// use tourguide_core::Coordinate;
///
/// # fn main() -> Result<(), tourguide_core::CoordinateError> {
/// let eiffel = Coordinate::new(48.8584, 2.2945)?;
/// let coord: geo::Coord<f64> = eiffel.into();
/// assert_eq!(coord.x, 2.2945);
/// assert_eq!(coord.y, 48.8584);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    /// Degrees north of the equator.
    pub latitude: f64,
    /// Degrees east of the prime meridian.
    pub longitude: f64,
}

/// Errors returned by [`Coordinate::new`] and [`Coordinate::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    /// Latitude or longitude was NaN or infinite.
    #[error("coordinate components must be finite")]
    NonFinite,
    /// Latitude fell outside `[-90, 90]`.
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    /// Longitude fell outside `[-180, 180]`.
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

impl Coordinate {
    /// Validate and construct a [`Coordinate`].
    ///
    /// # Errors
    /// Returns [`CoordinateError`] when either component is non-finite or out
    /// of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        let coordinate = Self::from_degrees_unchecked(latitude, longitude);
        coordinate.validate()?;
        Ok(coordinate)
    }

    /// Construct a [`Coordinate`] without range checks.
    ///
    /// # Examples
    /// ```
    /// use tourguide_core::Coordinate;
    ///
    /// let odd = Coordinate::from_degrees_unchecked(120.0, 0.0);
    /// assert!(odd.validate().is_err());
    /// ```
    #[must_use]
    pub const fn from_degrees_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check finiteness and ranges.
    ///
    /// # Errors
    /// Returns the first violated constraint as a [`CoordinateError`].
    pub fn validate(&self) -> Result<(), CoordinateError> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(CoordinateError::NonFinite);
        }
        if !LATITUDE_RANGE.contains(&self.latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(self.latitude));
        }
        if !LONGITUDE_RANGE.contains(&self.longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(self.longitude));
        }
        Ok(())
    }

    /// Return the coordinate as a `geo` point (`x = longitude`).
    #[must_use]
    pub fn to_point(self) -> Point<f64> {
        Point::from(Coord::from(self))
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(value: Coordinate) -> Self {
        Self {
            x: value.longitude,
            y: value.latitude,
        }
    }
}

impl From<Coord<f64>> for Coordinate {
    fn from(value: Coord<f64>) -> Self {
        Self::from_degrees_unchecked(value.y, value.x)
    }
}
