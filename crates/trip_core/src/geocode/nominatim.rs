//! Nominatim-backed geocoding provider (optional `nominatim` feature).

use serde::Deserialize;

use crate::geo::Coordinate;
use crate::geocode::GeocodingProvider;

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

pub struct NominatimGeocoder {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        // Nominatim's usage policy requires an identifying user agent.
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("trip_core/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn search(&self, address: &str) -> Result<Vec<SearchHit>, reqwest::Error> {
        self.client
            .get(format!("{}/search", self.base_url))
            .query(&[("format", "json"), ("q", address), ("limit", "1")])
            .send()?
            .error_for_status()?
            .json()
    }
}

impl GeocodingProvider for NominatimGeocoder {
    fn resolve(&self, address: &str) -> Option<Coordinate> {
        let hits = match self.search(address) {
            Ok(hits) => hits,
            Err(err) => {
                tracing::warn!(%err, "geocoding request failed; treating as not found");
                return None;
            }
        };
        let hit = hits.first()?;
        let latitude = hit.lat.parse().ok()?;
        let longitude = hit.lon.parse().ok()?;
        Some(Coordinate::new(latitude, longitude))
    }
}
