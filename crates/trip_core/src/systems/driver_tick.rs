//! DriverTick system: advances the matched vehicle toward the rider.
//!
//! Each tick recomputes distance and ETA, fires the one-shot "arriving soon"
//! notification below its threshold, and either reports arrival or steps the
//! vehicle along the bearing and reschedules itself. The ticker stops by not
//! rescheduling: once the trip leaves `Matched` (or is despawned), a pending
//! tick fails its guard and the timer chain ends.

use bevy_ecs::prelude::{Query, Res, ResMut};

use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::config::SimulatorConfig;
use crate::ecs::{Trip, TripLiveData, TripState, Vehicle};
use crate::geo::{self, Coordinate};
use crate::notify::NotifierResource;

/// One step along the bearing, clamped to the remaining offset so the
/// vehicle never oscillates around the rider.
fn step_toward(from: Coordinate, to: Coordinate, step_degrees: f64) -> Coordinate {
    let dlat = to.latitude - from.latitude;
    let dlng = to.longitude - from.longitude;
    if (dlat * dlat + dlng * dlng).sqrt() <= step_degrees {
        return to;
    }
    let bearing = geo::bearing_radians(from, to);
    Coordinate {
        latitude: from.latitude + step_degrees * bearing.cos(),
        longitude: from.longitude + step_degrees * bearing.sin(),
    }
}

pub fn driver_tick_system(
    mut clock: ResMut<SimulationClock>,
    event: Res<CurrentEvent>,
    config: Res<SimulatorConfig>,
    notifier: Res<NotifierResource>,
    mut trips: Query<(&Trip, &mut Vehicle, &mut TripLiveData)>,
) {
    if event.0.kind != EventKind::DriverTick {
        return;
    }

    let Some(EventSubject::Trip(trip_entity)) = event.0.subject else {
        return;
    };
    // Trip cancelled or already reset: the stale tick dies here.
    let Ok((trip, mut vehicle, mut live)) = trips.get_mut(trip_entity) else {
        return;
    };
    if trip.state != TripState::Matched {
        return;
    }

    let distance_km = geo::distance_km(vehicle.current_location, trip.rider_location);
    live.driver_distance_km = distance_km;
    live.eta_minutes = geo::eta_minutes(distance_km);

    if distance_km < config.arrival_threshold_km {
        // Arrived: stop ticking and hand over without moving the vehicle.
        clock.schedule_in(0, EventKind::DriverArrived, Some(EventSubject::Trip(trip_entity)));
        return;
    }

    if distance_km < config.arriving_soon_km && !live.arriving_soon_sent {
        live.arriving_soon_sent = true;
        notifier.0.notify(
            "Arriving soon",
            &format!("{} is almost there", vehicle.display_name),
        );
    }

    vehicle.current_location = step_toward(
        vehicle.current_location,
        trip.rider_location,
        config.step_degrees,
    );

    clock.schedule_in(
        config.tick_interval_ms,
        EventKind::DriverTick,
        Some(EventSubject::Trip(trip_entity)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_moves_along_the_bearing() {
        let from = Coordinate::new(0.0, 0.0);
        let to = Coordinate::new(0.0, 1.0);
        let next = step_toward(from, to, 0.005);
        assert!(next.latitude.abs() < 1e-12);
        assert!((next.longitude - 0.005).abs() < 1e-12);
    }

    #[test]
    fn final_step_lands_on_the_target_instead_of_overshooting() {
        let from = Coordinate::new(0.0, 0.003);
        let to = Coordinate::new(0.0, 0.0);
        let next = step_toward(from, to, 0.005);
        assert_eq!(next, to);
    }
}
