//! Price estimation from geocoded endpoints.

use serde::{Deserialize, Serialize};

use crate::geo::{self, Coordinate};

/// Base fare in currency units.
pub const BASE_FARE: f64 = 5.00;

/// Per-kilometre rate in currency units.
pub const PER_KM_RATE: f64 = 2.00;

/// A price quote derived from the rider and destination coordinates.
///
/// Recomputed whenever either endpoint changes; absent (no quote) when either
/// coordinate is missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Quoted amount, rounded to cents.
    pub amount: f64,
    /// Great-circle distance the quote was based on.
    pub distance_km: f64,
}

/// Round a currency amount to cents.
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Quote a trip: `BASE_FARE + PER_KM_RATE × distance`, rounded to cents.
pub fn estimate(rider: Coordinate, destination: Coordinate) -> PriceQuote {
    let distance_km = geo::distance_km(rider, destination);
    PriceQuote {
        amount: round_to_cents(BASE_FARE + distance_km * PER_KM_RATE),
        distance_km,
    }
}
