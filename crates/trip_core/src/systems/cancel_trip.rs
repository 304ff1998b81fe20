//! CancelTrip system: returns the session to `IDLE` from `SEARCHING` or
//! `MATCHED`.
//!
//! Despawning the trip is what releases the approach ticker: any pending
//! tick or arrival event finds no entity and is discarded. Cancelling with
//! no active trip is a no-op.

use bevy_ecs::prelude::{Commands, Query, Res, ResMut};

use crate::clock::{CurrentEvent, EventKind};
use crate::ecs::{Trip, TripState};
use crate::history::TripHistory;
use crate::session::Session;

pub fn cancel_trip_system(
    mut commands: Commands,
    event: Res<CurrentEvent>,
    mut session: ResMut<Session>,
    mut history: ResMut<TripHistory>,
    trips: Query<&Trip>,
) {
    if event.0.kind != EventKind::CancelTrip {
        return;
    }

    let Some(trip_entity) = session.active_trip else {
        return;
    };
    let Ok(trip) = trips.get(trip_entity) else {
        session.reset_trip();
        return;
    };
    // A completed trip is past cancellation; it resolves through rating.
    if trip.state == TripState::Completed {
        tracing::debug!("cancel after completion; ignored");
        return;
    }

    commands.entity(trip_entity).despawn();
    session.reset_trip();
    history.trips_cancelled_total += 1;
}
