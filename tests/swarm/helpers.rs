//! Shared test helpers for swarm integration tests.

use std::sync::Arc;

use hivemind::swarm::{
    adapters::SimulatedDrone,
    domain::PortName,
    services::SwarmDispatcher,
};
use mockable::DefaultClock;
use rstest::fixture;

/// Swarm type used throughout the integration tests.
pub type TestSwarm = SwarmDispatcher<SimulatedDrone, DefaultClock>;

/// Provides a fresh, empty swarm for each test.
#[fixture]
pub fn swarm() -> TestSwarm {
    SwarmDispatcher::new(Arc::new(DefaultClock))
}

/// Builds a port name, panicking on blank input.
pub fn port(name: &str) -> PortName {
    PortName::new(name).expect("test port names are not blank")
}

/// Pairs each drone with `drone-<index>` and registers it.
pub fn register(swarm: &mut TestSwarm, drones: &[Arc<SimulatedDrone>]) {
    swarm
        .add_and_pair(
            drones
                .iter()
                .enumerate()
                .map(|(index, drone)| (port(&format!("drone-{index}")), Arc::clone(drone))),
        )
        .expect("simulated drones pair");
}

/// Creates `count` simulated drones built by `build`.
pub fn fleet(count: usize, build: impl Fn() -> SimulatedDrone) -> Vec<Arc<SimulatedDrone>> {
    (0..count).map(|_| Arc::new(build())).collect()
}
