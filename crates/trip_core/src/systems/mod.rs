pub mod cancel_trip;
pub mod driver_arrived;
pub mod driver_tick;
pub mod geocode_lookup;
pub mod match_found;
pub mod rate_trip;
pub mod request_trip;
pub mod trip_settle;
