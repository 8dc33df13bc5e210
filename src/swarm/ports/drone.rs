//! Capability port for a single drone driver.

use crate::swarm::domain::{ControlVector, FlightState, LandingOffset, PortName, Position};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for drone driver operations.
pub type DroneResult<T> = Result<T, DroneError>;

/// Capabilities the swarm requires from a drone driver.
///
/// Calls are synchronous and take `&self`; drivers that keep link state use
/// interior mutability. Handles are shared as `Arc<D>` and compared by
/// pointer identity.
pub trait Drone: Send + Sync {
    /// Pairs the drone through the given serial or radio port.
    ///
    /// # Errors
    ///
    /// Returns [`DroneError::Pairing`] when the link cannot be established.
    fn pair(&self, port: &PortName) -> DroneResult<()>;

    /// Sends the take-off command once.
    ///
    /// # Errors
    ///
    /// Returns driver errors when the command cannot be delivered.
    fn send_takeoff(&self) -> DroneResult<()>;

    /// Sends the landing command once.
    ///
    /// # Errors
    ///
    /// Returns driver errors when the command cannot be delivered.
    fn send_landing(&self) -> DroneResult<()>;

    /// Sends an immediate motor stop.
    ///
    /// # Errors
    ///
    /// Returns driver errors when the command cannot be delivered.
    fn send_stop(&self) -> DroneResult<()>;

    /// Holds position for the given duration.
    ///
    /// # Errors
    ///
    /// Returns driver errors when the command cannot be delivered.
    fn send_hover(&self, duration: Duration) -> DroneResult<()>;

    /// Clears transient roll, pitch, yaw, and throttle values.
    ///
    /// # Errors
    ///
    /// Returns driver errors when the driver state cannot be updated.
    fn reset_move_values(&self) -> DroneResult<()>;

    /// Sends one raw control command.
    ///
    /// # Errors
    ///
    /// Returns driver errors when the command cannot be delivered.
    fn send_control(&self, control: ControlVector) -> DroneResult<()>;

    /// Reads the controller state.
    ///
    /// # Errors
    ///
    /// Returns driver errors when telemetry cannot be read.
    fn flight_state(&self) -> DroneResult<FlightState>;

    /// Reads the position estimate.
    ///
    /// # Errors
    ///
    /// Returns driver errors when telemetry cannot be read.
    fn position(&self) -> DroneResult<Position>;

    /// Returns the offset accumulated over previous landings.
    ///
    /// # Errors
    ///
    /// Returns driver errors when the stored offset cannot be read.
    fn previous_landing(&self) -> DroneResult<LandingOffset>;

    /// Replaces the offset accumulated over previous landings.
    ///
    /// # Errors
    ///
    /// Returns driver errors when the stored offset cannot be written.
    fn set_previous_landing(&self, offset: LandingOffset) -> DroneResult<()>;
}

/// Errors returned by drone drivers.
#[derive(Debug, Clone, Error)]
pub enum DroneError {
    /// The driver could not pair through the port.
    #[error("failed to pair through port {port}: {reason}")]
    Pairing {
        /// Port the pairing was attempted on.
        port: PortName,
        /// Driver-supplied reason.
        reason: String,
    },

    /// A command was issued before the drone was paired.
    #[error("drone is not paired")]
    NotPaired,

    /// The drone refused a command.
    #[error("drone rejected {command}: {reason}")]
    CommandRejected {
        /// Command name.
        command: String,
        /// Driver-supplied reason.
        reason: String,
    },

    /// Transport or driver runtime failure.
    #[error("drone link error: {0}")]
    Link(Arc<dyn std::error::Error + Send + Sync>),
}

impl DroneError {
    /// Wraps a transport or driver runtime error.
    #[must_use]
    pub fn link(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Link(Arc::new(err))
    }

    /// Builds a command rejection.
    #[must_use]
    pub fn rejected(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CommandRejected {
            command: command.into(),
            reason: reason.into(),
        }
    }
}
