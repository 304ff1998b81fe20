mod support;

use support::{push_event, ScheduleRunner};
use trip_core::billing::{BillingProfile, ChargeStatus, PaymentMethod, SettlementEngine};
use trip_core::clock::{EventKind, SimulationClock};
use trip_core::ecs::{PendingMatches, PendingRatings, Trip, TripRating, TripState};
use trip_core::geo::Coordinate;
use trip_core::geocode::FixedGeocoder;
use trip_core::history::TripHistory;
use trip_core::session::Session;
use trip_core::test_helpers::{
    create_test_world, edit_destination, install_geocoder, install_recording_notifier,
    test_vehicle,
};

fn billing_profile() -> BillingProfile {
    BillingProfile {
        legal_name: "Ana Souza".to_owned(),
        tax_id: "390.533.447-05".to_owned(),
        email: "ana@example.com".to_owned(),
        phone: "+55 11 99999-0000".to_owned(),
    }
}

/// Full lifecycle against exact reference numbers: a 1.11 km trip quoted at
/// 7.22, a vehicle starting 1.5 km out, arrival, settlement and rating.
#[test]
fn full_trip_lifecycle_with_settlement() {
    let mut world = create_test_world();
    install_geocoder(
        &mut world,
        FixedGeocoder::new().with_entry("harbor terminal", Coordinate::new(0.0, 0.01)),
    );
    let sent = install_recording_notifier(&mut world);
    let mut runner = ScheduleRunner::new();

    world
        .resource_mut::<Session>()
        .set_rider_location(Coordinate::new(0.0, 0.0));

    // Type a destination; the debounced lookup resolves it and quotes.
    edit_destination(&mut world, "harbor terminal");
    runner.run_one(&mut world);
    let quote = world.resource::<Session>().quote.expect("quote");
    assert!((quote.amount - 7.22).abs() < 1e-9);

    // Request, then match a vehicle about 1.5 km east of the rider.
    push_event(&mut world, EventKind::RequestTrip, None);
    runner.run_one(&mut world);
    let trip_entity = world
        .resource::<Session>()
        .active_trip
        .expect("active trip");

    world
        .resource_mut::<PendingMatches>()
        .0
        .push_back(test_vehicle(Coordinate::new(0.0, 0.0135)));
    push_event(&mut world, EventKind::MatchFound, None);
    runner.run_one(&mut world);

    let trip = world.entity(trip_entity).get::<Trip>().expect("trip");
    assert_eq!(trip.state, TripState::Matched);
    assert_eq!(trip.matched_at, Some(1000));

    // Drive the approach to completion and through the settle delay.
    runner.run_until_empty(&mut world, 100);

    let trip = world.entity(trip_entity).get::<Trip>().expect("trip");
    assert_eq!(trip.state, TripState::Completed);
    let completed_at = trip.completed_at.expect("completed timestamp");
    assert!(completed_at > trip.matched_at.expect("matched timestamp"));

    // The settle delay cleared the request fields but kept the trip.
    let session = world.resource::<Session>();
    assert!(session.destination.is_none());
    assert!(session.quote.is_none());
    assert_eq!(session.active_trip, Some(trip_entity));

    // Settle the fare at the point of sale: confirmed synchronously, platform
    // books its 20% share of 7.22.
    let fare = trip.quoted_fare;
    let charge = world
        .resource_mut::<SettlementEngine>()
        .settle(fare, PaymentMethod::PointOfSale, &billing_profile())
        .expect("charge");
    assert_eq!(charge.status, ChargeStatus::Confirmed);
    let engine = world.resource::<SettlementEngine>();
    assert!((engine.ledger().platform_balance() - 1.44).abs() < 1e-9);

    // Rate the trip; the session returns to idle and history records it.
    world.resource_mut::<PendingRatings>().0.push_back(TripRating {
        score: 5,
        feedback: Some("smooth ride".to_owned()),
    });
    push_event(&mut world, EventKind::RateTrip, None);
    runner.run_one(&mut world);

    assert!(world.get_entity(trip_entity).is_none());
    assert!(world.resource::<Session>().active_trip.is_none());

    let history = world.resource::<TripHistory>();
    assert_eq!(history.completed_trips.len(), 1);
    let record = &history.completed_trips[0];
    assert!((record.fare - 7.22).abs() < 1e-9);
    assert_eq!(record.rating, Some(5));
    assert_eq!(record.completed_at, completed_at);

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

/// The instant-transfer path stays pending until the external confirmation
/// arrives, and only then books the platform share.
#[test]
fn instant_transfer_settlement_confirms_asynchronously() {
    let mut world = create_test_world();

    let charge = world
        .resource_mut::<SettlementEngine>()
        .settle(7.22, PaymentMethod::InstantTransfer, &billing_profile())
        .expect("charge");
    assert_eq!(charge.status, ChargeStatus::Pending);
    let transfer = charge.transfer.as_ref().expect("transfer payload");
    assert!(transfer.payload.contains("722"));
    assert!(world
        .resource::<SettlementEngine>()
        .ledger()
        .entries()
        .is_empty());

    world
        .resource_mut::<SettlementEngine>()
        .confirm_instant_transfer(&charge.id)
        .expect("confirmation");
    let engine = world.resource::<SettlementEngine>();
    assert!((engine.ledger().platform_balance() - 1.44).abs() < 1e-9);
}

/// Two trips settled for the same rider reuse one billing identity and
/// accumulate the platform balance.
#[test]
fn repeated_settlements_accumulate_the_platform_balance() {
    let mut world = create_test_world();

    for _ in 0..2 {
        world
            .resource_mut::<SettlementEngine>()
            .settle(10.0, PaymentMethod::PointOfSale, &billing_profile())
            .expect("charge");
    }

    let engine = world.resource::<SettlementEngine>();
    assert!((engine.ledger().platform_balance() - 4.0).abs() < 1e-9);
    assert_eq!(engine.ledger().entries().len(), 2);
}

/// After a full lifecycle the clock is empty: every timer either fired or was
/// discarded by its guard.
#[test]
fn clock_drains_completely_after_the_lifecycle() {
    let mut world = create_test_world();
    install_geocoder(
        &mut world,
        FixedGeocoder::new().with_entry("harbor terminal", Coordinate::new(0.0, 0.01)),
    );
    let mut runner = ScheduleRunner::new();

    world
        .resource_mut::<Session>()
        .set_rider_location(Coordinate::new(0.0, 0.0));
    edit_destination(&mut world, "harbor terminal");
    runner.run_one(&mut world);
    push_event(&mut world, EventKind::RequestTrip, None);
    runner.run_one(&mut world);
    world
        .resource_mut::<PendingMatches>()
        .0
        .push_back(test_vehicle(Coordinate::new(0.0, 0.0135)));
    push_event(&mut world, EventKind::MatchFound, None);
    runner.run_one(&mut world);

    let steps = runner.run_until_empty(&mut world, 1000);
    assert!(steps < 1000, "event queue should drain");
    assert!(world.resource::<SimulationClock>().is_empty());
}
