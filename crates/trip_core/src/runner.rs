//! Event runner: advances the clock and routes events into the ECS.
//!
//! Clock progression and event routing happen here, outside systems. Each
//! step pops the next event from [`SimulationClock`], inserts it as
//! [`CurrentEvent`], then runs the schedule.

use bevy_ecs::prelude::{Res, Schedule, World};
use bevy_ecs::schedule::{apply_deferred, IntoSystemConfigs};

use crate::clock::{CurrentEvent, EventKind, SimulationClock};
use crate::systems::{
    cancel_trip::cancel_trip_system, driver_arrived::driver_arrived_system,
    driver_tick::driver_tick_system, geocode_lookup::geocode_lookup_system,
    match_found::match_found_system, rate_trip::rate_trip_system,
    request_trip::request_trip_system, trip_settle::trip_settle_system,
};

fn is_geocode_lookup(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::GeocodeLookup)
        .unwrap_or(false)
}

fn is_request_trip(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::RequestTrip)
        .unwrap_or(false)
}

fn is_cancel_trip(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::CancelTrip)
        .unwrap_or(false)
}

fn is_match_found(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::MatchFound)
        .unwrap_or(false)
}

fn is_driver_tick(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::DriverTick)
        .unwrap_or(false)
}

fn is_driver_arrived(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::DriverArrived)
        .unwrap_or(false)
}

fn is_trip_settle(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::TripSettle)
        .unwrap_or(false)
}

fn is_rate_trip(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::RateTrip)
        .unwrap_or(false)
}

/// Runs one step: pops the next event, inserts it as [`CurrentEvent`], then
/// runs the schedule. Returns `false` when the clock is empty.
pub fn run_next_event(world: &mut World, schedule: &mut Schedule) -> bool {
    let event = match world.resource_mut::<SimulationClock>().pop_next() {
        Some(event) => event,
        None => return false,
    };
    world.insert_resource(CurrentEvent(event));
    schedule.run(world);
    true
}

/// Runs steps until the event queue is empty or `max_steps` is reached.
/// Returns the number of steps executed.
pub fn run_until_empty(world: &mut World, schedule: &mut Schedule, max_steps: usize) -> usize {
    let mut steps = 0;
    while steps < max_steps && run_next_event(world, schedule) {
        steps += 1;
    }
    steps
}

/// Builds the default schedule: every event-reacting system behind its
/// event-kind condition, plus [`apply_deferred`] so spawned trips are
/// applied before the next step.
pub fn simulation_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((
        geocode_lookup_system.run_if(is_geocode_lookup),
        request_trip_system.run_if(is_request_trip),
        cancel_trip_system.run_if(is_cancel_trip),
        match_found_system.run_if(is_match_found),
        driver_tick_system.run_if(is_driver_tick),
        driver_arrived_system.run_if(is_driver_arrived),
        trip_settle_system.run_if(is_trip_settle),
        rate_trip_system.run_if(is_rate_trip),
        apply_deferred,
    ));
    schedule
}
