//! Session state: rider location, destination entry and the derived quote.
//!
//! Destination text edits are debounced through the simulation clock: each
//! edit bumps a lookup generation and schedules a `GeocodeLookup` event one
//! debounce window out. When the event fires, a generation mismatch means the
//! text changed in the meantime and the lookup is discarded, so rapid edits
//! coalesce into a single geocoding call for the final text.

use bevy_ecs::prelude::{Entity, Resource};
use thiserror::Error;

use crate::clock::{EventKind, EventSubject, SimulationClock, ONE_SEC_MS};
use crate::geo::Coordinate;
use crate::pricing::{self, PriceQuote};

/// Debounce window for destination geocoding, in milliseconds.
pub const DEBOUNCE_MS: u64 = ONE_SEC_MS;

/// Address strings shorter than this never trigger a lookup.
pub const MIN_QUERY_LEN: usize = 3;

/// Why a trip request was rejected. Shown to the user as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RequestRejection {
    #[error("your current location is not available yet")]
    MissingRiderLocation,
    #[error("select a destination to see a price and request a trip")]
    MissingDestination,
    #[error("a trip is already in progress")]
    TripAlreadyActive,
}

/// Per-session booking state. Exactly one active trip at a time.
#[derive(Debug, Default, Resource)]
pub struct Session {
    pub rider_location: Option<Coordinate>,
    pub destination_text: String,
    pub destination: Option<Coordinate>,
    pub quote: Option<PriceQuote>,
    pub active_trip: Option<Entity>,
    pub last_rejection: Option<RequestRejection>,
    lookup_generation: u64,
}

impl Session {
    /// Generation of the most recent destination edit. A pending lookup whose
    /// generation differs has been superseded.
    pub fn lookup_generation(&self) -> u64 {
        self.lookup_generation
    }

    pub fn set_rider_location(&mut self, location: Coordinate) {
        self.rider_location = Some(location);
        self.recompute_quote();
    }

    /// Applies a destination text edit and schedules a debounced lookup.
    ///
    /// Any pending lookup is superseded by the generation bump. Text shorter
    /// than [`MIN_QUERY_LEN`] clears the destination and quote and schedules
    /// nothing.
    pub fn edit_destination(&mut self, clock: &mut SimulationClock, text: impl Into<String>) {
        self.destination_text = text.into();
        self.lookup_generation += 1;

        if self.destination_text.trim().len() < MIN_QUERY_LEN {
            self.destination = None;
            self.recompute_quote();
            return;
        }

        clock.schedule_in(
            DEBOUNCE_MS,
            EventKind::GeocodeLookup,
            Some(EventSubject::Lookup(self.lookup_generation)),
        );
    }

    /// Applies a geocoding result: `Some` stores the coordinate, `None`
    /// (not found or provider failure) clears it. Either way the quote is
    /// recomputed.
    pub fn apply_geocode_result(&mut self, result: Option<Coordinate>) {
        self.destination = result;
        self.recompute_quote();
    }

    /// Quote is defined iff both endpoints are known.
    pub fn recompute_quote(&mut self) {
        self.quote = match (self.rider_location, self.destination) {
            (Some(rider), Some(destination)) => Some(pricing::estimate(rider, destination)),
            _ => None,
        };
    }

    /// Clears trip request state. Used on cancellation and after rating.
    pub fn reset_trip(&mut self) {
        self.active_trip = None;
        self.destination_text.clear();
        self.destination = None;
        self.quote = None;
    }

    /// Clears the request fields but keeps the active trip reference; used by
    /// the settle delay after completion, while the trip awaits its rating.
    pub fn clear_request_fields(&mut self) {
        self.destination_text.clear();
        self.destination = None;
        self.quote = None;
    }
}
