//! Geocoding collaborator: free-text address to coordinate.
//!
//! The engine treats every provider failure the same as "not found" and never
//! retries on its own; the user re-triggers by editing the destination.

use std::collections::HashMap;

use bevy_ecs::prelude::Resource;

use crate::geo::Coordinate;

#[cfg(feature = "nominatim")]
pub mod nominatim;

pub trait GeocodingProvider: Send + Sync {
    /// Resolves an address to a coordinate, or `None` when not found.
    /// Network or provider errors are reported as `None`.
    fn resolve(&self, address: &str) -> Option<Coordinate>;
}

#[derive(Resource)]
pub struct GeocoderResource(pub Box<dyn GeocodingProvider>);

/// Table-backed geocoder for tests and demos. Lookups are exact on the
/// trimmed address text.
#[derive(Debug, Default)]
pub struct FixedGeocoder {
    entries: HashMap<String, Coordinate>,
}

impl FixedGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, address: impl Into<String>, location: Coordinate) -> Self {
        self.entries.insert(address.into(), location);
        self
    }
}

impl GeocodingProvider for FixedGeocoder {
    fn resolve(&self, address: &str) -> Option<Coordinate> {
        self.entries.get(address.trim()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_geocoder_resolves_known_addresses_only() {
        let geocoder =
            FixedGeocoder::new().with_entry("central station", Coordinate::new(52.525, 13.369));

        assert!(geocoder.resolve("central station").is_some());
        assert!(geocoder.resolve(" central station ").is_some());
        assert!(geocoder.resolve("nowhere at all").is_none());
    }
}
