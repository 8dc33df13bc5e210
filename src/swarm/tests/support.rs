//! Shared fixtures for swarm unit tests.

use std::sync::Arc;
use std::time::Duration;

use crate::swarm::{
    adapters::SimulatedDrone,
    domain::{ControlVector, FlightState, LandingOffset, PortName, Position},
    ports::{Drone, DroneResult},
    services::SwarmDispatcher,
};
use mockable::DefaultClock;

mockall::mock! {
    pub Driver {}

    impl Drone for Driver {
        fn pair(&self, port: &PortName) -> DroneResult<()>;
        fn send_takeoff(&self) -> DroneResult<()>;
        fn send_landing(&self) -> DroneResult<()>;
        fn send_stop(&self) -> DroneResult<()>;
        fn send_hover(&self, duration: Duration) -> DroneResult<()>;
        fn reset_move_values(&self) -> DroneResult<()>;
        fn send_control(&self, control: ControlVector) -> DroneResult<()>;
        fn flight_state(&self) -> DroneResult<FlightState>;
        fn position(&self) -> DroneResult<Position>;
        fn previous_landing(&self) -> DroneResult<LandingOffset>;
        fn set_previous_landing(&self, offset: LandingOffset) -> DroneResult<()>;
    }
}

pub(super) type SimulatedSwarm = SwarmDispatcher<SimulatedDrone, DefaultClock>;

pub(super) type MockSwarm = SwarmDispatcher<MockDriver, DefaultClock>;

pub(super) fn port(name: &str) -> PortName {
    PortName::new(name).expect("test port names are valid")
}

/// Builds a simulated swarm with the given drones registered in order.
pub(super) fn simulated_swarm(drones: &[(&str, &Arc<SimulatedDrone>)]) -> SimulatedSwarm {
    let mut swarm = SwarmDispatcher::new(Arc::new(DefaultClock));
    swarm
        .add_and_pair(
            drones
                .iter()
                .map(|(name, drone)| (port(name), Arc::clone(drone))),
        )
        .expect("simulated drones pair");
    swarm
}

/// Returns a mock driver that accepts pairing.
pub(super) fn pairable_driver() -> MockDriver {
    let mut driver = MockDriver::new();
    driver.expect_pair().returning(|_| Ok(()));
    driver
}

/// Builds a mock swarm with the given drivers registered in order.
pub(super) fn mock_swarm(drivers: Vec<(&str, MockDriver)>) -> MockSwarm {
    let mut swarm = SwarmDispatcher::new(Arc::new(DefaultClock));
    swarm
        .add_and_pair(
            drivers
                .into_iter()
                .map(|(name, driver)| (port(name), Arc::new(driver))),
        )
        .expect("mock drivers pair");
    swarm
}
