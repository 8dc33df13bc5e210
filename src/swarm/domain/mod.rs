//! Domain model for swarm coordination.
//!
//! The swarm domain models drone identity, flight telemetry, target
//! selection, broadcast results, and the timing of coordinated take-off and
//! landing. Driver and runtime concerns stay outside this boundary.

mod coordination;
mod error;
mod flight;
mod maneuver;
mod operation;
mod port;
mod selector;

pub use coordination::{
    CoordinationId, FlightPhase, FlightReport, FlightReportData, FlightTiming,
};
pub use error::SwarmDomainError;
pub use flight::{ControlVector, FlightMode, FlightState, LandingOffset, Position};
pub use maneuver::{SpiralDirection, SpiralManeuver};
pub use operation::{BroadcastOutcome, OperationArgs, is_empty_value};
pub use port::PortName;
pub use selector::{SwarmMember, TargetSelector};
