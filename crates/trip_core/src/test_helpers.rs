//! World construction helpers for tests and demos.

use std::sync::{Arc, Mutex};

use bevy_ecs::prelude::World;

use crate::billing::engine::SettlementEngine;
use crate::billing::provider::InMemoryBilling;
use crate::clock::SimulationClock;
use crate::config::SimulatorConfig;
use crate::ecs::{PendingMatches, PendingRatings, Vehicle};
use crate::geo::Coordinate;
use crate::geocode::{FixedGeocoder, GeocoderResource, GeocodingProvider};
use crate::history::TripHistory;
use crate::notify::{Notifier, NotifierResource, NullNotifier};
use crate::session::Session;

/// A world with every engine resource installed: empty session, default
/// simulator config, an empty table geocoder, a silent notifier and an
/// in-memory billing provider.
pub fn create_test_world() -> World {
    let mut world = World::new();
    world.insert_resource(SimulationClock::default());
    world.insert_resource(Session::default());
    world.insert_resource(SimulatorConfig::default());
    world.insert_resource(PendingMatches::default());
    world.insert_resource(PendingRatings::default());
    world.insert_resource(TripHistory::default());
    world.insert_resource(NotifierResource(Box::new(NullNotifier)));
    world.insert_resource(GeocoderResource(Box::new(FixedGeocoder::new())));
    world.insert_resource(SettlementEngine::new(Box::new(InMemoryBilling::new())));
    world
}

/// Replaces the geocoder with the given provider.
pub fn install_geocoder(world: &mut World, geocoder: impl GeocodingProvider + 'static) {
    world.insert_resource(GeocoderResource(Box::new(geocoder)));
}

/// Notifier that records every `(title, body)` pair it is asked to send.
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, body: &str) {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push((title.to_owned(), body.to_owned()));
        }
    }
}

/// Replaces the notifier with a recording one and returns the shared log of
/// sent notifications.
pub fn install_recording_notifier(world: &mut World) -> Arc<Mutex<Vec<(String, String)>>> {
    let sent = Arc::new(Mutex::new(Vec::new()));
    world.insert_resource(NotifierResource(Box::new(RecordingNotifier {
        sent: Arc::clone(&sent),
    })));
    sent
}

/// Applies a destination text edit through the session, scheduling the
/// debounced lookup on the world's clock.
pub fn edit_destination(world: &mut World, text: &str) {
    let mut session = world.remove_resource::<Session>().expect("Session resource");
    {
        let mut clock = world.resource_mut::<SimulationClock>();
        session.edit_destination(&mut clock, text);
    }
    world.insert_resource(session);
}

/// A plausible vehicle parked at `location`.
pub fn test_vehicle(location: Coordinate) -> Vehicle {
    Vehicle {
        display_name: "Carlos".to_owned(),
        vehicle_model: "Toyota Corolla".to_owned(),
        plate: "BRA2E19".to_owned(),
        current_location: location,
    }
}

/// Puts the session in a requestable state: rider location set, destination
/// resolved and a quote computed.
pub fn prepare_quoted_session(world: &mut World, rider: Coordinate, destination: Coordinate) {
    let mut session = world.resource_mut::<Session>();
    session.set_rider_location(rider);
    session.destination_text = "resolved destination".to_owned();
    session.apply_geocode_result(Some(destination));
}
