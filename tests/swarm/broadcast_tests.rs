//! Broadcast tests: named capabilities, selectors, and result shaping.

use super::helpers::{TestSwarm, fleet, register, swarm};
use hivemind::swarm::{
    adapters::SimulatedDrone,
    domain::{BroadcastOutcome, ControlVector, FlightMode, OperationArgs, Position, TargetSelector},
    services::{SwarmError, operations::names},
};
use rstest::rstest;
use serde_json::json;

#[rstest]
fn standard_capabilities_are_registered(swarm: TestSwarm) {
    let registered = swarm.operations().names();

    for name in [
        names::SEND_TAKEOFF,
        names::SEND_LANDING,
        names::SEND_STOP,
        names::SEND_HOVER,
        names::RESET_MOVE_VALUES,
        names::SEND_CONTROL,
        names::FLIGHT_STATE,
        names::POSITION,
        names::PREVIOUS_LANDING,
    ] {
        assert!(registered.contains(&name), "missing capability {name}");
    }
}

#[rstest]
fn commands_without_results_yield_sentinel(mut swarm: TestSwarm) {
    let drones = fleet(3, SimulatedDrone::new);
    register(&mut swarm, &drones);

    let outcome = swarm
        .invoke(
            names::SEND_CONTROL,
            &OperationArgs::from(ControlVector::new(0, 10, 0, 20)),
            &TargetSelector::All,
        )
        .expect("broadcast should succeed");

    assert!(outcome.is_nothing_returned());
    for drone in &drones {
        assert_eq!(
            drone.control_commands().expect("state readable"),
            vec![ControlVector::new(0, 10, 0, 20)]
        );
    }
}

#[rstest]
fn position_snapshot_expands_each_drone(mut swarm: TestSwarm) {
    let drones = fleet(2, || {
        SimulatedDrone::new().with_positions([Position::new(1.5, -2.0, 0.5)])
    });
    register(&mut swarm, &drones);

    let outcome = swarm
        .invoke(names::POSITION, &OperationArgs::none(), &TargetSelector::All)
        .expect("attribute read should succeed");

    let row = vec![json!(1.5), json!(-2.0), json!(0.5)];
    assert_eq!(outcome.snapshot(), Some(&[row.clone(), row][..]));
}

#[rstest]
fn snapshot_serializes_with_kind_tag(mut swarm: TestSwarm) {
    let drones = fleet(1, || SimulatedDrone::new().with_mode(FlightMode::Flight));
    register(&mut swarm, &drones);

    let outcome = swarm
        .invoke(names::FLIGHT_STATE, &OperationArgs::none(), &TargetSelector::All)
        .expect("attribute read should succeed");

    let encoded = serde_json::to_value(&outcome).expect("outcome serializes");
    assert_eq!(
        encoded,
        json!({ "kind": "attribute_snapshot", "values": [["flight", 100]] })
    );
    let decoded: BroadcastOutcome = serde_json::from_value(encoded).expect("outcome decodes");
    assert_eq!(decoded, outcome);
}

#[rstest]
fn hover_rejects_unknown_ports_before_sending(mut swarm: TestSwarm) {
    let drones = fleet(2, SimulatedDrone::new);
    register(&mut swarm, &drones);
    let selector = TargetSelector::ports(["drone-1", "drone-7"]).expect("valid ports");

    let result = swarm.invoke(
        names::SEND_HOVER,
        &OperationArgs::new(vec![json!(2.0)]),
        &selector,
    );

    assert!(matches!(result, Err(SwarmError::UnknownPort(ref port)) if port.as_str() == "drone-7"));
    for drone in &drones {
        assert_eq!(drone.commands().expect("state readable").len(), 1);
    }
}
