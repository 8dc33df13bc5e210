//! Then steps for swarm flight BDD scenarios.

use super::world::FlightWorld;
use hivemind::swarm::{
    adapters::SimulatedCommand,
    domain::FlightPhase,
    services::SwarmError,
};
use rstest_bdd_macros::then;

fn expect_confirmed(world: &FlightWorld, phase: FlightPhase) -> Result<(), eyre::Report> {
    let reports = world.flight_reports()?;
    if reports.len() != world.drones.len() {
        return Err(eyre::eyre!(
            "expected {} reports, found {}",
            world.drones.len(),
            reports.len()
        ));
    }
    if let Some(report) = reports
        .iter()
        .find(|report| report.phase() != phase || !report.confirmed())
    {
        return Err(eyre::eyre!("unconfirmed {phase} for {}", report.port()));
    }
    Ok(())
}

fn expect_each_received(
    world: &FlightWorld,
    expected: &SimulatedCommand,
    count: usize,
) -> Result<(), eyre::Report> {
    for (port, drone) in &world.drones {
        let sent = drone.count_commands(|command| command == expected)?;
        if sent != count {
            return Err(eyre::eyre!("{port} received {sent} {expected:?}, expected {count}"));
        }
    }
    Ok(())
}

#[then("every drone reports a confirmed take-off")]
fn every_drone_took_off(world: &FlightWorld) -> Result<(), eyre::Report> {
    expect_confirmed(world, FlightPhase::TakeOff)
}

#[then("every drone reports a confirmed landing")]
fn every_drone_landed(world: &FlightWorld) -> Result<(), eyre::Report> {
    expect_confirmed(world, FlightPhase::Landing)
}

#[then("each drone received {count:usize} take-off command")]
fn each_received_takeoff(world: &FlightWorld, count: usize) -> Result<(), eyre::Report> {
    expect_each_received(world, &SimulatedCommand::TakeOff, count)
}

#[then("each drone received {count:usize} landing commands")]
fn each_received_landing(world: &FlightWorld, count: usize) -> Result<(), eyre::Report> {
    expect_each_received(world, &SimulatedCommand::Landing, count)
}

#[then(r#"only port "{port}" received a control command"#)]
fn only_port_received_control(world: &FlightWorld, port: String) -> Result<(), eyre::Report> {
    for (name, drone) in &world.drones {
        let received = drone.control_commands()?.len();
        let expected = usize::from(name.as_str() == port);
        if received != expected {
            return Err(eyre::eyre!(
                "{name} received {received} control commands, expected {expected}"
            ));
        }
    }
    Ok(())
}

#[then("no drone received a control command")]
fn no_drone_received_control(world: &FlightWorld) -> Result<(), eyre::Report> {
    for (name, drone) in &world.drones {
        if !drone.control_commands()?.is_empty() {
            return Err(eyre::eyre!("{name} received a control command"));
        }
    }
    Ok(())
}

#[then("the broadcast fails with an unknown port error")]
fn broadcast_fails_unknown_port(world: &FlightWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_broadcast
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing broadcast result in scenario world"))?;
    if !matches!(result, Err(SwarmError::UnknownPort(_))) {
        return Err(eyre::eyre!("expected unknown port error, got {result:?}"));
    }
    Ok(())
}

#[then("the snapshot holds {rows:usize} rows")]
fn snapshot_holds_rows(world: &FlightWorld, rows: usize) -> Result<(), eyre::Report> {
    let outcome = match &world.last_broadcast {
        Some(Ok(outcome)) => outcome,
        Some(Err(err)) => return Err(eyre::eyre!("attribute read failed: {err}")),
        None => return Err(eyre::eyre!("missing broadcast result in scenario world")),
    };
    let snapshot = outcome
        .snapshot()
        .ok_or_else(|| eyre::eyre!("expected an attribute snapshot, got {outcome:?}"))?;
    if snapshot.len() != rows {
        return Err(eyre::eyre!("expected {rows} rows, found {}", snapshot.len()));
    }
    Ok(())
}

#[then("the flight call fails because the swarm is empty")]
fn flight_fails_empty(world: &FlightWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_flight
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing flight result in scenario world"))?;
    if !matches!(result, Err(SwarmError::EmptySwarm)) {
        return Err(eyre::eyre!("expected empty swarm error, got {result:?}"));
    }
    Ok(())
}
