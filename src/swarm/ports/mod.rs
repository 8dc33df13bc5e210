//! Port contracts for swarm coordination.
//!
//! Ports define the driver-agnostic interface the swarm services use to
//! command individual drones.

pub mod drone;

pub use drone::{Drone, DroneError, DroneResult};
