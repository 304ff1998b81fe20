//! DriverArrived system: `MATCHED → COMPLETED`.
//!
//! The vehicle reference stays on the trip for the post-trip rating; the
//! session's request fields are cleared only after the settle delay, so a
//! completion view can be shown first.

use bevy_ecs::prelude::{Query, Res, ResMut};

use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::config::SimulatorConfig;
use crate::ecs::{Trip, TripState, Vehicle};
use crate::notify::NotifierResource;

pub fn driver_arrived_system(
    mut clock: ResMut<SimulationClock>,
    event: Res<CurrentEvent>,
    config: Res<SimulatorConfig>,
    notifier: Res<NotifierResource>,
    mut trips: Query<(&mut Trip, &Vehicle)>,
) {
    if event.0.kind != EventKind::DriverArrived {
        return;
    }

    let Some(EventSubject::Trip(trip_entity)) = event.0.subject else {
        return;
    };
    let Ok((mut trip, vehicle)) = trips.get_mut(trip_entity) else {
        return;
    };
    if trip.state != TripState::Matched {
        return;
    }

    trip.state = TripState::Completed;
    trip.completed_at = Some(clock.now());

    notifier.0.notify(
        "Your driver has arrived",
        &format!("{} is waiting at your location", vehicle.display_name),
    );

    clock.schedule_in(
        config.settle_delay_ms,
        EventKind::TripSettle,
        Some(EventSubject::Trip(trip_entity)),
    );
}
