//! Read-only access to the attraction catalogue.
//!
//! The `AttractionCatalog` trait yields the full candidate set for a ranking
//! query. Catalogues are small and change rarely, so every query scans the
//! whole set; there is no spatial index.

use crate::Attraction;

/// Read-only attraction reference data.
///
/// # Examples
///
/// ```rust
/// use tourguide_core::{Attraction, AttractionCatalog, Coordinate, MemoryCatalog};
///
/// let pier = Attraction::new("pier", Coordinate::from_degrees_unchecked(0.0, 1.0));
/// let catalog = MemoryCatalog::new(vec![pier.clone()]);
/// let found: Vec<_> = catalog.attractions().collect();
/// assert_eq!(found, vec![pier]);
/// ```
pub trait AttractionCatalog: Send + Sync {
    /// Return every attraction in catalogue order.
    ///
    /// The order must be stable between calls: ranking ties are broken by it.
    fn attractions(&self) -> Box<dyn Iterator<Item = Attraction> + Send + '_>;
}

/// In-memory catalogue preserving insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryCatalog {
    attractions: Vec<Attraction>,
}

impl MemoryCatalog {
    /// Create a catalogue from the provided attractions.
    #[must_use]
    pub const fn new(attractions: Vec<Attraction>) -> Self {
        Self { attractions }
    }

    /// Number of attractions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attractions.len()
    }

    /// Report whether the catalogue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attractions.is_empty()
    }
}

impl FromIterator<Attraction> for MemoryCatalog {
    fn from_iter<I: IntoIterator<Item = Attraction>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl AttractionCatalog for MemoryCatalog {
    fn attractions(&self) -> Box<dyn Iterator<Item = Attraction> + Send + '_> {
        Box::new(self.attractions.iter().cloned())
    }
}
