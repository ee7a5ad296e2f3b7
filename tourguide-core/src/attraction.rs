use crate::Coordinate;

/// A point of interest from the attraction catalogue.
///
/// Attractions are static reference data: the engine reads them but never
/// mutates them. Names are unique within a catalogue and key the user's
/// reward map.
///
/// # Examples
/// ```
/// use tourguide_core::{Attraction, Coordinate};
///
/// let attraction = Attraction::new("Disneyland", Coordinate::from_degrees_unchecked(33.817595, -117.922008))
///     .with_locality("Anaheim", "CA");
/// assert_eq!(attraction.name, "Disneyland");
/// assert_eq!(attraction.city, "Anaheim");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attraction {
    /// Display name, unique within the catalogue.
    pub name: String,
    /// City the attraction belongs to; empty when unknown.
    #[cfg_attr(feature = "serde", serde(default))]
    pub city: String,
    /// State or region; empty when unknown.
    #[cfg_attr(feature = "serde", serde(default))]
    pub state: String,
    /// Location of the attraction.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub coordinate: Coordinate,
}

impl Attraction {
    /// Construct an attraction without locality information.
    pub fn new(name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            city: String::new(),
            state: String::new(),
            coordinate,
        }
    }

    /// Attach a city and state, returning `self` for chaining.
    #[must_use]
    pub fn with_locality(mut self, city: impl Into<String>, state: impl Into<String>) -> Self {
        self.city = city.into();
        self.state = state.into();
        self
    }
}

/// An attraction ranked against a reference coordinate.
///
/// Built fresh for every query and never cached. `reward_points` is `None`
/// for rank-only results and carries the user's score once enriched.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedAttraction {
    /// The ranked attraction.
    pub attraction: Attraction,
    /// Reference coordinate the distance was measured from.
    pub user_coordinate: Coordinate,
    /// Flat-approximation distance in kilometres.
    pub distance_km: f64,
    /// Reward points the user would earn, when scored.
    pub reward_points: Option<u32>,
}
