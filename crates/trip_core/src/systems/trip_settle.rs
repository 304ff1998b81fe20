//! TripSettle system: clears the request fields after the post-completion
//! settle delay, while the completed trip awaits its rating.

use bevy_ecs::prelude::{Query, Res, ResMut};

use crate::clock::{CurrentEvent, EventKind, EventSubject};
use crate::ecs::{Trip, TripState};
use crate::session::Session;

pub fn trip_settle_system(
    event: Res<CurrentEvent>,
    mut session: ResMut<Session>,
    trips: Query<&Trip>,
) {
    if event.0.kind != EventKind::TripSettle {
        return;
    }

    let Some(EventSubject::Trip(trip_entity)) = event.0.subject else {
        return;
    };
    // Guard against a trip cancelled or re-requested during the delay.
    if session.active_trip != Some(trip_entity) {
        return;
    }
    let Ok(trip) = trips.get(trip_entity) else {
        return;
    };
    if trip.state != TripState::Completed {
        return;
    }

    session.clear_request_fields();
}
