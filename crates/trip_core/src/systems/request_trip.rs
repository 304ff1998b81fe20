//! RequestTrip system: validates the session and spawns the trip in
//! `Searching`.

use bevy_ecs::prelude::{Commands, Res, ResMut};

use crate::clock::{CurrentEvent, EventKind, SimulationClock};
use crate::ecs::{Trip, TripState};
use crate::history::TripHistory;
use crate::session::{RequestRejection, Session};

pub fn request_trip_system(
    mut commands: Commands,
    clock: Res<SimulationClock>,
    event: Res<CurrentEvent>,
    mut session: ResMut<Session>,
    mut history: ResMut<TripHistory>,
) {
    if event.0.kind != EventKind::RequestTrip {
        return;
    }

    // Only one active trip per session; a second request is rejected without
    // touching the existing trip.
    if session.active_trip.is_some() {
        tracing::debug!("trip request while a trip is active; rejected");
        session.last_rejection = Some(RequestRejection::TripAlreadyActive);
        history.requests_rejected_total += 1;
        return;
    }

    let Some(rider_location) = session.rider_location else {
        session.last_rejection = Some(RequestRejection::MissingRiderLocation);
        history.requests_rejected_total += 1;
        return;
    };
    let (Some(destination), Some(quote)) = (session.destination, session.quote) else {
        session.last_rejection = Some(RequestRejection::MissingDestination);
        history.requests_rejected_total += 1;
        return;
    };

    let trip_entity = commands
        .spawn(Trip {
            state: TripState::Searching,
            rider_location,
            destination,
            quoted_fare: quote.amount,
            requested_at: clock.now(),
            matched_at: None,
            completed_at: None,
        })
        .id();
    session.active_trip = Some(trip_entity);
    session.last_rejection = None;
}
