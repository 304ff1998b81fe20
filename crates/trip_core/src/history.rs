//! Trip history and session counters.

use bevy_ecs::prelude::{Entity, Resource};

/// One finished trip, recorded when the rider submits (or skips) the rating.
/// Timestamps are simulation milliseconds.
#[derive(Debug, Clone)]
pub struct CompletedTripRecord {
    pub trip_entity: Entity,
    pub fare: f64,
    pub vehicle_plate: String,
    pub requested_at: u64,
    pub matched_at: u64,
    pub completed_at: u64,
    /// `None` when the rider skipped rating.
    pub rating: Option<u8>,
    pub feedback: Option<String>,
}

impl CompletedTripRecord {
    /// Time from request confirmation to match.
    pub fn time_to_match(&self) -> u64 {
        self.matched_at.saturating_sub(self.requested_at)
    }

    /// Time from match to the vehicle reaching the rider.
    pub fn time_to_arrival(&self) -> u64 {
        self.completed_at.saturating_sub(self.matched_at)
    }
}

#[derive(Debug, Default, Resource)]
pub struct TripHistory {
    pub completed_trips: Vec<CompletedTripRecord>,
    pub trips_cancelled_total: u64,
    pub requests_rejected_total: u64,
}
