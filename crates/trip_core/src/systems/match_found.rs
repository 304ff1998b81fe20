//! MatchFound system: attaches an offered vehicle to the searching trip and
//! starts the approach ticker.

use bevy_ecs::prelude::{Commands, Query, Res, ResMut};

use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::config::SimulatorConfig;
use crate::ecs::{PendingMatches, Trip, TripLiveData, TripState};
use crate::geo;
use crate::notify::NotifierResource;
use crate::session::Session;

pub fn match_found_system(
    mut commands: Commands,
    mut clock: ResMut<SimulationClock>,
    event: Res<CurrentEvent>,
    config: Res<SimulatorConfig>,
    session: Res<Session>,
    mut offers: ResMut<PendingMatches>,
    notifier: Res<NotifierResource>,
    mut trips: Query<&mut Trip>,
) {
    if event.0.kind != EventKind::MatchFound {
        return;
    }

    let Some(vehicle) = offers.0.pop_front() else {
        return;
    };
    let Some(trip_entity) = session.active_trip else {
        tracing::debug!("match offer with no active trip; discarded");
        return;
    };
    let Ok(mut trip) = trips.get_mut(trip_entity) else {
        return;
    };
    // A match arriving twice is ignored once already matched.
    if trip.state != TripState::Searching {
        tracing::debug!(state = ?trip.state, "match offer outside SEARCHING; ignored");
        return;
    }

    trip.state = TripState::Matched;
    trip.matched_at = Some(clock.now());

    let driver_distance_km = geo::distance_km(vehicle.current_location, trip.rider_location);
    let eta_minutes = geo::eta_minutes(driver_distance_km);
    notifier.0.notify(
        "Driver found",
        &format!(
            "{} ({}) is on the way, about {} min away",
            vehicle.display_name, vehicle.vehicle_model, eta_minutes
        ),
    );

    commands.entity(trip_entity).insert((
        vehicle,
        TripLiveData {
            driver_distance_km,
            eta_minutes,
            arriving_soon_sent: false,
        },
    ));

    clock.schedule_in(
        config.tick_interval_ms,
        EventKind::DriverTick,
        Some(EventSubject::Trip(trip_entity)),
    );
}
