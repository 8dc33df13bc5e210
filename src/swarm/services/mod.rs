//! Application services for swarm membership, dispatch, and coordination.

mod coordination;
mod dispatcher;
mod error;
pub mod operations;
mod registry;

pub use dispatcher::SwarmDispatcher;
pub use error::{DroneFailure, SwarmError, SwarmResult};
pub use operations::{Capability, InvocationError, OperationRegistry};
pub use registry::SwarmRegistry;
