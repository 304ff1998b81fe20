//! Geo math: distance, bearing and ETA for the approach simulation.
//!
//! Coordinates are WGS84 degrees. Distances use the haversine formula;
//! bearings use a planar approximation that is good enough for the
//! short-range approach simulation, not for navigation.

use serde::{Deserialize, Serialize};

/// Earth radius used by the haversine distance, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Assumed average driver speed, expressed as kilometres per minute (30 km/h).
pub const KM_PER_MINUTE: f64 = 0.5;

/// A latitude/longitude pair in degrees. Immutable value type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Great-circle distance between two coordinates in kilometres.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let (lat1, lon1) = (a.latitude.to_radians(), a.longitude.to_radians());
    let (lat2, lon2) = (b.latitude.to_radians(), b.longitude.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let sin_dlat = (dlat * 0.5).sin();
    let sin_dlon = (dlon * 0.5).sin();
    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Planar bearing from one coordinate toward another, in radians.
///
/// `atan2(Δlng, Δlat)`: zero points north (increasing latitude). Not a true
/// geodesic bearing.
pub fn bearing_radians(from: Coordinate, to: Coordinate) -> f64 {
    let dlat = to.latitude - from.latitude;
    let dlng = to.longitude - from.longitude;
    dlng.atan2(dlat)
}

/// ETA in whole minutes at the assumed average speed. Never less than 1.
pub fn eta_minutes(distance_km: f64) -> u64 {
    let minutes = (distance_km / KM_PER_MINUTE).round() as i64;
    minutes.max(1) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn distance_is_symmetric_and_zero_on_identity() {
        let a = Coordinate::new(52.52, 13.40);
        let b = Coordinate::new(52.50, 13.45);
        assert!((distance_km(a, b) - distance_km(b, a)).abs() < EPS);
        assert!(distance_km(a, a).abs() < EPS);
    }

    #[test]
    fn one_hundredth_degree_of_longitude_at_equator_is_about_1_11_km() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 0.01);
        let d = distance_km(a, b);
        assert!((d - 1.112).abs() < 0.01, "unexpected distance: {d}");
    }

    #[test]
    fn bearing_points_along_the_dominant_axis() {
        let origin = Coordinate::new(0.0, 0.0);
        let north = Coordinate::new(1.0, 0.0);
        let east = Coordinate::new(0.0, 1.0);
        assert!(bearing_radians(origin, north).abs() < EPS);
        assert!((bearing_radians(origin, east) - std::f64::consts::FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn eta_is_at_least_one_minute() {
        assert_eq!(eta_minutes(0.0), 1);
        assert_eq!(eta_minutes(0.2), 1);
        assert_eq!(eta_minutes(1.5), 3);
        assert_eq!(eta_minutes(10.0), 20);
    }
}
