//! When steps for swarm flight BDD scenarios.

use super::world::FlightWorld;
use hivemind::swarm::{
    domain::{ControlVector, OperationArgs, TargetSelector},
    services::operations::names,
};
use rstest_bdd_macros::when;

#[when("the swarm takes off")]
fn swarm_takes_off(world: &mut FlightWorld) {
    let result = world
        .runtime
        .block_on(world.swarm.takeoff(&TargetSelector::All));
    world.last_flight = Some(result);
}

#[when("the swarm lands")]
fn swarm_lands(world: &mut FlightWorld) {
    let result = world.runtime.block_on(world.swarm.land());
    world.last_flight = Some(result);
}

#[when(r#"control {roll:i32}, {pitch:i32}, {yaw:i32}, {throttle:i32} is sent to port "{port}""#)]
fn control_sent_to_port(
    world: &mut FlightWorld,
    roll: i32,
    pitch: i32,
    yaw: i32,
    throttle: i32,
    port: String,
) -> Result<(), eyre::Report> {
    let selector = TargetSelector::ports([port])?;
    let args = OperationArgs::from(ControlVector::new(roll, pitch, yaw, throttle));
    world.last_broadcast = Some(world.swarm.invoke(names::SEND_CONTROL, &args, &selector));
    Ok(())
}

#[when("the flight state is read")]
fn flight_state_read(world: &mut FlightWorld) {
    world.last_broadcast = Some(world.swarm.invoke(
        names::FLIGHT_STATE,
        &OperationArgs::none(),
        &TargetSelector::All,
    ));
}
