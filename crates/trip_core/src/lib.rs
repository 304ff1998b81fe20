pub mod billing;
pub mod clock;
pub mod config;
pub mod ecs;
pub mod geo;
pub mod geocode;
pub mod history;
pub mod ledger;
pub mod notify;
pub mod pricing;
pub mod runner;
pub mod session;
pub mod systems;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;
