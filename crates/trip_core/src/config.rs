//! Tunable constants for the approach simulation.

use bevy_ecs::prelude::Resource;

/// Driver approach simulation parameters.
///
/// The reference defaults come from the demo behaviour; none of them is
/// load-bearing for correctness, so deployments tune them freely.
#[derive(Debug, Clone, Copy, Resource)]
pub struct SimulatorConfig {
    /// Interval between position ticks, in milliseconds.
    pub tick_interval_ms: u64,
    /// Distance below which the vehicle is considered arrived, in km.
    pub arrival_threshold_km: f64,
    /// Distance below which the one-shot "arriving soon" notification fires.
    pub arriving_soon_km: f64,
    /// Per-tick step applied along the bearing, in angular degrees.
    pub step_degrees: f64,
    /// Delay after completion before trip request fields are cleared, in ms.
    pub settle_delay_ms: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 2000,
            arrival_threshold_km: 0.05,
            arriving_soon_km: 0.5,
            step_degrees: 0.005,
            settle_delay_ms: 1500,
        }
    }
}
