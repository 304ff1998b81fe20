//! RateTrip system: records the completed trip (score 0 = skipped) and
//! returns the session to `IDLE`.

use bevy_ecs::prelude::{Commands, Query, Res, ResMut};

use crate::clock::{CurrentEvent, EventKind};
use crate::ecs::{PendingRatings, Trip, TripState, Vehicle};
use crate::history::{CompletedTripRecord, TripHistory};
use crate::session::Session;

pub fn rate_trip_system(
    mut commands: Commands,
    event: Res<CurrentEvent>,
    mut session: ResMut<Session>,
    mut ratings: ResMut<PendingRatings>,
    mut history: ResMut<TripHistory>,
    trips: Query<(&Trip, &Vehicle)>,
) {
    if event.0.kind != EventKind::RateTrip {
        return;
    }

    let Some(rating) = ratings.0.pop_front() else {
        return;
    };
    let Some(trip_entity) = session.active_trip else {
        tracing::debug!("rating with no active trip; discarded");
        return;
    };
    let Ok((trip, vehicle)) = trips.get(trip_entity) else {
        return;
    };
    if trip.state != TripState::Completed {
        tracing::debug!(state = ?trip.state, "rating outside COMPLETED; ignored");
        return;
    }

    history.completed_trips.push(CompletedTripRecord {
        trip_entity,
        fare: trip.quoted_fare,
        vehicle_plate: vehicle.plate.clone(),
        requested_at: trip.requested_at,
        matched_at: trip.matched_at.unwrap_or(trip.requested_at),
        completed_at: trip.completed_at.unwrap_or(trip.requested_at),
        rating: (rating.score > 0).then_some(rating.score),
        feedback: rating.feedback,
    });

    commands.entity(trip_entity).despawn();
    session.reset_trip();
}
