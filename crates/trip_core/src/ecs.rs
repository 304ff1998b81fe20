//! Components for the trip lifecycle.
//!
//! `IDLE` is the absence of a trip entity: a trip is spawned on request
//! confirmation and despawned on cancellation or rating, so there is never
//! more than one per session.

use std::collections::VecDeque;

use bevy_ecs::prelude::{Component, Resource};

use crate::geo::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripState {
    Searching,
    Matched,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct Trip {
    pub state: TripState,
    pub rider_location: Coordinate,
    pub destination: Coordinate,
    /// Fare quoted when the request was confirmed.
    pub quoted_fare: f64,
    /// Simulation time when the request was confirmed.
    pub requested_at: u64,
    /// Simulation time when a vehicle was matched; set by `match_found_system`.
    pub matched_at: Option<u64>,
    /// Simulation time when the vehicle arrived; set by `driver_arrived_system`.
    pub completed_at: Option<u64>,
}

/// The matched vehicle. Owned by the trip once matched; `current_location`
/// is mutated only by the approach ticker while the trip is `Matched`.
#[derive(Debug, Clone, PartialEq, Component)]
pub struct Vehicle {
    pub display_name: String,
    pub vehicle_model: String,
    pub plate: String,
    pub current_location: Coordinate,
}

/// Live approach data, refreshed on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct TripLiveData {
    pub driver_distance_km: f64,
    pub eta_minutes: u64,
    /// "Arriving soon" has been sent for this trip (idempotent per trip).
    pub arriving_soon_sent: bool,
}

/// Vehicle offers pushed from outside (simulated dispatch). `MatchFound`
/// events consume the front entry.
#[derive(Debug, Default, Resource)]
pub struct PendingMatches(pub VecDeque<Vehicle>);

/// A post-trip rating. Score 0 means the rider skipped rating.
#[derive(Debug, Clone)]
pub struct TripRating {
    pub score: u8,
    pub feedback: Option<String>,
}

/// Ratings submitted by the user. `RateTrip` events consume the front entry.
#[derive(Debug, Default, Resource)]
pub struct PendingRatings(pub VecDeque<TripRating>);
