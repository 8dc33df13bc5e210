//! Given steps for swarm flight BDD scenarios.

use super::world::FlightWorld;
use hivemind::swarm::adapters::SimulatedDrone;
use rstest_bdd_macros::given;

#[given("a swarm of {count:usize} drones confirming take-off after {polls:u32} polls")]
fn swarm_confirming_takeoff(
    world: &mut FlightWorld,
    count: usize,
    polls: u32,
) -> Result<(), eyre::Report> {
    world.register(count, || {
        SimulatedDrone::new().with_takeoff_confirmation_after(polls)
    })
}

#[given("a swarm of {count:usize} drones confirming landing after {polls:u32} polls")]
fn swarm_confirming_landing(
    world: &mut FlightWorld,
    count: usize,
    polls: u32,
) -> Result<(), eyre::Report> {
    world.register(count, || {
        SimulatedDrone::new().with_landing_confirmation_after(polls)
    })
}

#[given("a swarm of {count:usize} idle drones")]
fn idle_swarm(world: &mut FlightWorld, count: usize) -> Result<(), eyre::Report> {
    world.register(count, SimulatedDrone::new)
}

#[given("an empty swarm")]
fn empty_swarm(world: &mut FlightWorld) {
    world.drones.clear();
}
