//! Simulation clock: a min-heap of timestamped events.
//!
//! Every timer in the engine — the geocode debounce, the driver position
//! ticker and the post-completion settle delay — is an event scheduled here.
//! Events carry a subject so the handling system can validate that the state
//! the event was scheduled for still exists; a guard failure discards the
//! event, which is how timers are "cancelled" when their owning state exits.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bevy_ecs::prelude::{Entity, Resource};

pub const ONE_SEC_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Debounce window elapsed; resolve the destination text.
    GeocodeLookup,
    /// User confirmed a trip request.
    RequestTrip,
    /// User cancelled the active trip.
    CancelTrip,
    /// A matched vehicle was pushed from outside (simulated dispatch).
    MatchFound,
    /// Periodic driver approach tick.
    DriverTick,
    /// The vehicle crossed the arrival threshold.
    DriverArrived,
    /// Settle delay after completion elapsed; clear trip request fields.
    TripSettle,
    /// User submitted (or skipped) a post-trip rating.
    RateTrip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSubject {
    Trip(Entity),
    /// Geocode lookup generation; stale generations are discarded.
    Lookup(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub timestamp: u64,
    pub kind: EventKind,
    pub subject: Option<EventSubject>,
    /// Insertion order, used to keep same-timestamp events FIFO.
    seq: u64,
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap by (timestamp, seq).
        other
            .timestamp
            .cmp(&self.timestamp)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The event currently being processed. Inserted by the runner before each
/// schedule pass; systems read it to decide whether they apply.
#[derive(Debug, Clone, Copy, Resource)]
pub struct CurrentEvent(pub Event);

#[derive(Debug, Default, Resource)]
pub struct SimulationClock {
    now: u64,
    next_seq: u64,
    events: BinaryHeap<Event>,
}

impl SimulationClock {
    /// Current simulation time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn schedule_at(&mut self, timestamp: u64, kind: EventKind, subject: Option<EventSubject>) {
        debug_assert!(
            timestamp >= self.now,
            "event timestamp must be >= current time"
        );
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push(Event {
            timestamp,
            kind,
            subject,
            seq,
        });
    }

    pub fn schedule_in(&mut self, delta_ms: u64, kind: EventKind, subject: Option<EventSubject>) {
        self.schedule_at(self.now.saturating_add(delta_ms), kind, subject);
    }

    /// Pops the next event and advances `now` to its timestamp.
    pub fn pop_next(&mut self) -> Option<Event> {
        let event = self.events.pop()?;
        self.now = event.timestamp;
        Some(event)
    }

    pub fn next_event_time(&self) -> Option<u64> {
        self.events.peek().map(|event| event.timestamp)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
