//! GeocodeLookup system: resolves the destination text once the debounce
//! window has elapsed.

use bevy_ecs::prelude::{Res, ResMut};

use crate::clock::{CurrentEvent, EventKind, EventSubject};
use crate::geocode::GeocoderResource;
use crate::session::Session;

pub fn geocode_lookup_system(
    event: Res<CurrentEvent>,
    mut session: ResMut<Session>,
    geocoder: Res<GeocoderResource>,
) {
    if event.0.kind != EventKind::GeocodeLookup {
        return;
    }

    let Some(EventSubject::Lookup(generation)) = event.0.subject else {
        return;
    };
    // The text changed after this lookup was scheduled; a newer lookup is
    // pending and this one must not apply a stale result.
    if generation != session.lookup_generation() {
        tracing::debug!(generation, "superseded geocode lookup discarded");
        return;
    }

    let result = geocoder.0.resolve(&session.destination_text);
    if result.is_none() {
        tracing::warn!(
            address = %session.destination_text,
            "destination could not be resolved"
        );
    }
    session.apply_geocode_result(result);
}
