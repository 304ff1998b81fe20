mod support;

use support::{push_event, ScheduleRunner};
use trip_core::clock::EventKind;
use trip_core::ecs::{PendingMatches, Trip, TripLiveData, TripState, Vehicle};
use trip_core::geo::Coordinate;
use trip_core::session::Session;
use trip_core::test_helpers::{
    create_test_world, install_recording_notifier, prepare_quoted_session, test_vehicle,
};

const RIDER: Coordinate = Coordinate {
    latitude: 0.0,
    longitude: 0.0,
};
const DESTINATION: Coordinate = Coordinate {
    latitude: 0.0,
    longitude: 0.01,
};

/// Requests a trip and matches a vehicle parked at `vehicle_location`.
fn matched_trip(
    world: &mut bevy_ecs::prelude::World,
    runner: &mut ScheduleRunner,
    vehicle_location: Coordinate,
) -> bevy_ecs::prelude::Entity {
    prepare_quoted_session(world, RIDER, DESTINATION);
    push_event(world, EventKind::RequestTrip, None);
    runner.run_one(world);

    world
        .resource_mut::<PendingMatches>()
        .0
        .push_back(test_vehicle(vehicle_location));
    push_event(world, EventKind::MatchFound, None);
    runner.run_one(world);

    world.resource::<Session>().active_trip.expect("active trip")
}

#[test]
fn approach_converges_and_completes_the_trip() {
    let mut world = create_test_world();
    let mut runner = ScheduleRunner::new();

    // About 1.5 km east of the rider.
    let trip_entity = matched_trip(&mut world, &mut runner, Coordinate::new(0.0, 0.0135));

    let live = world
        .entity(trip_entity)
        .get::<TripLiveData>()
        .expect("live data");
    assert_eq!(live.eta_minutes, 3);

    runner.run_until_empty(&mut world, 100);

    let trip = world.entity(trip_entity).get::<Trip>().expect("trip");
    assert_eq!(trip.state, TripState::Completed);
    assert!(trip.completed_at.is_some());
    let vehicle = world.entity(trip_entity).get::<Vehicle>().expect("vehicle");
    assert!((vehicle.current_location.longitude - RIDER.longitude).abs() < 1e-12);
}

#[test]
fn arriving_soon_fires_exactly_once() {
    let mut world = create_test_world();
    let sent = install_recording_notifier(&mut world);
    let mut runner = ScheduleRunner::new();

    matched_trip(&mut world, &mut runner, Coordinate::new(0.0, 0.0135));
    runner.run_until_empty(&mut world, 100);

    let sent = sent.lock().expect("notification log");
    let arriving_soon = sent
        .iter()
        .filter(|(title, _)| title == "Arriving soon")
        .count();
    assert_eq!(arriving_soon, 1);
}

#[test]
fn notifications_arrive_in_lifecycle_order() {
    let mut world = create_test_world();
    let sent = install_recording_notifier(&mut world);
    let mut runner = ScheduleRunner::new();

    matched_trip(&mut world, &mut runner, Coordinate::new(0.0, 0.0135));
    runner.run_until_empty(&mut world, 100);

    let titles: Vec<String> = sent
        .lock()
        .expect("notification log")
        .iter()
        .map(|(title, _)| title.clone())
        .collect();
    assert_eq!(
        titles,
        vec!["Driver found", "Arriving soon", "Your driver has arrived"]
    );
}

#[test]
fn vehicle_inside_the_arrival_threshold_does_not_move() {
    let mut world = create_test_world();
    let mut runner = ScheduleRunner::new();

    // About 44 m away, already inside the arrival threshold.
    let start = Coordinate::new(0.0, 0.0004);
    let trip_entity = matched_trip(&mut world, &mut runner, start);

    // First tick reports arrival instead of stepping.
    runner.run_one(&mut world);
    let vehicle = world.entity(trip_entity).get::<Vehicle>().expect("vehicle");
    assert_eq!(vehicle.current_location, start);

    runner.run_until_empty(&mut world, 100);
    let trip = world.entity(trip_entity).get::<Trip>().expect("trip");
    assert_eq!(trip.state, TripState::Completed);
}

#[test]
fn settle_clears_request_fields_but_keeps_the_trip_for_rating() {
    let mut world = create_test_world();
    let mut runner = ScheduleRunner::new();

    let trip_entity = matched_trip(&mut world, &mut runner, Coordinate::new(0.0, 0.0135));
    runner.run_until_empty(&mut world, 100);

    let session = world.resource::<Session>();
    assert_eq!(session.active_trip, Some(trip_entity));
    assert!(session.destination_text.is_empty());
    assert!(session.destination.is_none());
    assert!(session.quote.is_none());
    assert!(world.get_entity(trip_entity).is_some());
}

#[test]
fn live_data_tracks_the_shrinking_distance() {
    let mut world = create_test_world();
    let mut runner = ScheduleRunner::new();

    let trip_entity = matched_trip(&mut world, &mut runner, Coordinate::new(0.0, 0.0135));
    let initial = world
        .entity(trip_entity)
        .get::<TripLiveData>()
        .expect("live data")
        .driver_distance_km;

    // One tick later the vehicle is one step closer.
    runner.run_one(&mut world);
    let after_tick = world
        .entity(trip_entity)
        .get::<TripLiveData>()
        .expect("live data")
        .driver_distance_km;
    assert!(after_tick <= initial);

    runner.run_one(&mut world);
    let after_second = world
        .entity(trip_entity)
        .get::<TripLiveData>()
        .expect("live data")
        .driver_distance_km;
    assert!(after_second < after_tick);
}
