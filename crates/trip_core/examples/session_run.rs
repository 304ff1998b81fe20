//! Run one rider session end to end and print the resulting ledger.
//!
//! Run with: cargo run -p trip_core --example session_run

use bevy_ecs::prelude::World;
use trip_core::billing::{BillingProfile, PaymentMethod, SettlementEngine};
use trip_core::clock::{EventKind, SimulationClock};
use trip_core::ecs::{PendingMatches, PendingRatings, TripRating};
use trip_core::geo::Coordinate;
use trip_core::geocode::FixedGeocoder;
use trip_core::history::TripHistory;
use trip_core::runner::{run_until_empty, simulation_schedule};
use trip_core::session::Session;
use trip_core::test_helpers::{
    create_test_world, edit_destination, install_geocoder, install_recording_notifier,
    test_vehicle,
};

fn push_event(world: &mut World, kind: EventKind) {
    world.resource_mut::<SimulationClock>().schedule_in(0, kind, None);
}

fn main() {
    tracing_subscriber::fmt::init();

    let mut world = create_test_world();
    install_geocoder(
        &mut world,
        FixedGeocoder::new().with_entry("harbor terminal", Coordinate::new(0.0, 0.01)),
    );
    let sent = install_recording_notifier(&mut world);
    let mut schedule = simulation_schedule();

    world
        .resource_mut::<Session>()
        .set_rider_location(Coordinate::new(0.0, 0.0));
    edit_destination(&mut world, "harbor terminal");
    run_until_empty(&mut world, &mut schedule, 10);

    let quote = world
        .resource::<Session>()
        .quote
        .expect("destination should resolve to a quote");
    println!("Quote: {:.2} for {:.2} km", quote.amount, quote.distance_km);

    push_event(&mut world, EventKind::RequestTrip);
    world
        .resource_mut::<PendingMatches>()
        .0
        .push_back(test_vehicle(Coordinate::new(0.0, 0.0135)));
    push_event(&mut world, EventKind::MatchFound);

    let steps = run_until_empty(&mut world, &mut schedule, 1000);
    println!("Steps executed: {}", steps);

    let profile = BillingProfile {
        legal_name: "Ana Souza".to_owned(),
        tax_id: "390.533.447-05".to_owned(),
        email: "ana@example.com".to_owned(),
        phone: "+55 11 99999-0000".to_owned(),
    };
    let charge = world
        .resource_mut::<SettlementEngine>()
        .settle(quote.amount, PaymentMethod::PointOfSale, &profile)
        .expect("settlement should succeed");
    println!("Charge {} settled: {:?}", charge.id, charge.status);

    world.resource_mut::<PendingRatings>().0.push_back(TripRating {
        score: 5,
        feedback: Some("smooth ride".to_owned()),
    });
    push_event(&mut world, EventKind::RateTrip);
    run_until_empty(&mut world, &mut schedule, 10);

    println!("\nNotifications:");
    for (title, body) in sent.lock().expect("notification log").iter() {
        println!("  {}: {}", title, body);
    }

    let history = world.resource::<TripHistory>();
    println!("\nCompleted trips: {}", history.completed_trips.len());
    for record in &history.completed_trips {
        println!(
            "  fare={:.2} plate={} time_to_arrival={} s rating={:?}",
            record.fare,
            record.vehicle_plate,
            record.time_to_arrival() / 1000,
            record.rating,
        );
    }

    let view = world.resource::<SettlementEngine>().ledger_view();
    println!("\nPlatform balance: {:.2}", view.platform_balance);
    for entry in &view.entries {
        println!(
            "  {} gross={:.2} platform={:.2}",
            entry.charge_id, entry.gross_amount, entry.platform_amount
        );
    }
}
