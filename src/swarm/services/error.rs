//! Service-level errors for swarm registry and dispatch operations.

use crate::swarm::{
    domain::{FlightPhase, PortName, SwarmDomainError},
    ports::DroneError,
};
use std::fmt;
use thiserror::Error;

/// Result type for swarm service operations.
pub type SwarmResult<T> = Result<T, SwarmError>;

/// Service-level errors for swarm operations.
#[derive(Debug, Error)]
pub enum SwarmError {
    /// The operation needs at least one registered drone.
    #[error("the swarm has no drones")]
    EmptySwarm,

    /// No drone capability is registered under the name.
    #[error("drones expose no operation named '{0}'")]
    UnknownOperation(String),

    /// Input was structurally invalid.
    #[error("malformed input: {0}")]
    MalformedInput(#[from] SwarmDomainError),

    /// The driver could not pair a drone.
    #[error("pairing failed on port {port}: {source}")]
    Pairing {
        /// Port the pairing was attempted on.
        port: PortName,
        /// Driver error, unchanged.
        source: DroneError,
    },

    /// A port selection named a port with no registered drone.
    #[error("no drone is registered on port {0}")]
    UnknownPort(PortName),

    /// Operation arguments could not be decoded.
    #[error("invalid arguments for '{operation}': {reason}")]
    InvalidArguments {
        /// Operation name.
        operation: String,
        /// What was wrong with the arguments.
        reason: String,
    },

    /// A drone failed during a sequential broadcast; later drones were not
    /// called.
    #[error("drone on port {port} failed: {source}")]
    Drone {
        /// Port of the failing drone.
        port: PortName,
        /// Driver error.
        source: DroneError,
    },

    /// One or more drones failed during a coordinated take-off or landing.
    /// Every other drone ran its sequence to completion.
    #[error("{phase} failed on {count} drone(s)", count = failures.len())]
    Coordination {
        /// Coordinated transition.
        phase: FlightPhase,
        /// Per-drone failures in dispatch order.
        failures: Vec<DroneFailure>,
    },
}

/// A single drone's failure inside a coordinated call.
#[derive(Debug, Clone)]
pub struct DroneFailure {
    /// Port of the failing drone.
    pub port: PortName,
    /// Driver error.
    pub error: DroneError,
}

impl fmt::Display for DroneFailure {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}: {}", self.port, self.error)
    }
}
