//! Adapter implementations for the drone port.

mod simulated;

pub use simulated::{SimulatedCommand, SimulatedDrone};
