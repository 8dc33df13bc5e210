//! Shared world state for swarm flight BDD scenarios.

use std::sync::Arc;

use hivemind::swarm::{
    adapters::SimulatedDrone,
    domain::{BroadcastOutcome, FlightReport, PortName},
    services::{SwarmDispatcher, SwarmResult},
};
use mockable::DefaultClock;
use rstest::fixture;
use tokio::runtime::Runtime;

/// Swarm type used by the BDD world.
pub type TestSwarm = SwarmDispatcher<SimulatedDrone, DefaultClock>;

/// Scenario world for swarm flight behaviour tests.
pub struct FlightWorld {
    /// Paused current-thread runtime driving coordinated calls.
    pub runtime: Runtime,
    /// The swarm under test.
    pub swarm: TestSwarm,
    /// Registered drones in registration order.
    pub drones: Vec<(PortName, Arc<SimulatedDrone>)>,
    /// Result of the last take-off or landing.
    pub last_flight: Option<SwarmResult<Vec<FlightReport>>>,
    /// Result of the last broadcast.
    pub last_broadcast: Option<SwarmResult<BroadcastOutcome>>,
}

impl FlightWorld {
    /// Creates a world with an empty swarm.
    ///
    /// # Panics
    ///
    /// Panics if the runtime cannot be built.
    #[must_use]
    pub fn new() -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .expect("paused runtime builds");
        Self {
            runtime,
            swarm: SwarmDispatcher::new(Arc::new(DefaultClock)),
            drones: Vec::new(),
            last_flight: None,
            last_broadcast: None,
        }
    }

    /// Pairs `count` drones built by `build` under `drone-<index>` ports.
    ///
    /// # Errors
    ///
    /// Returns an error if a port is invalid or pairing fails.
    pub fn register(
        &mut self,
        count: usize,
        build: impl Fn() -> SimulatedDrone,
    ) -> Result<(), eyre::Report> {
        let mut pairs = Vec::with_capacity(count);
        for index in 0..count {
            let port = PortName::new(format!("drone-{index}"))?;
            pairs.push((port, Arc::new(build())));
        }
        self.swarm
            .add_and_pair(pairs.iter().cloned())
            .map_err(|err| eyre::eyre!("pairing failed: {err}"))?;
        self.drones.extend(pairs);
        Ok(())
    }

    /// Returns the reports of the last successful flight call.
    ///
    /// # Errors
    ///
    /// Returns an error if no flight call ran or it failed.
    pub fn flight_reports(&self) -> Result<&[FlightReport], eyre::Report> {
        match &self.last_flight {
            Some(Ok(reports)) => Ok(reports),
            Some(Err(err)) => Err(eyre::eyre!("flight call failed: {err}")),
            None => Err(eyre::eyre!("no flight call in scenario world")),
        }
    }
}

impl Default for FlightWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> FlightWorld {
    FlightWorld::default()
}
