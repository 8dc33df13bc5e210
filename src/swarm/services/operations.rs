//! Name-addressable drone capabilities for broadcast dispatch.
//!
//! Each capability is either an operation, called on the selected drones
//! with positional arguments, or an attribute, read from every drone in the
//! swarm. Names are resolved at call time so callers can reach any
//! registered capability by string.

use crate::swarm::{
    domain::{ControlVector, OperationArgs},
    ports::{Drone, DroneError},
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Names of the capabilities registered by [`OperationRegistry::standard`].
pub mod names {
    /// Sends take-off once.
    pub const SEND_TAKEOFF: &str = "send_takeoff";
    /// Sends landing once.
    pub const SEND_LANDING: &str = "send_landing";
    /// Stops the motors.
    pub const SEND_STOP: &str = "send_stop";
    /// Hovers for a number of seconds.
    pub const SEND_HOVER: &str = "send_hover";
    /// Clears transient move values.
    pub const RESET_MOVE_VALUES: &str = "reset_move_values";
    /// Sends `(roll, pitch, yaw, throttle)`.
    pub const SEND_CONTROL: &str = "send_control";
    /// Reads `(mode, battery_percent)`.
    pub const FLIGHT_STATE: &str = "flight_state";
    /// Reads `(x, y, z)`.
    pub const POSITION: &str = "position";
    /// Reads the accumulated `(x, y)` landing offset.
    pub const PREVIOUS_LANDING: &str = "previous_landing";
}

/// Errors raised while invoking a single capability on one drone.
#[derive(Debug, Error)]
pub enum InvocationError {
    /// The arguments did not match what the capability expects.
    #[error("{0}")]
    InvalidArguments(String),
    /// The drone driver failed.
    #[error(transparent)]
    Drone(#[from] DroneError),
}

/// Operation invoker: calls one capability on one drone.
pub type OperationFn<D> =
    Arc<dyn Fn(&D, &OperationArgs) -> Result<Value, InvocationError> + Send + Sync>;

/// Attribute reader: reads one value from one drone.
pub type AttributeFn<D> = Arc<dyn Fn(&D) -> Result<Value, DroneError> + Send + Sync>;

/// A registered capability.
pub enum Capability<D> {
    /// Called on selected drones; results are aggregated positionally.
    Operation(OperationFn<D>),
    /// Read from every drone; values are returned as tuples.
    Attribute(AttributeFn<D>),
}

/// Registry of capabilities addressable by name.
pub struct OperationRegistry<D> {
    capabilities: HashMap<String, Capability<D>>,
}

impl<D> OperationRegistry<D> {
    /// Creates a registry with no capabilities.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            capabilities: HashMap::new(),
        }
    }

    /// Registers an operation, replacing any capability with the same name.
    #[must_use]
    pub fn with_operation<F>(mut self, name: impl Into<String>, operation: F) -> Self
    where
        F: Fn(&D, &OperationArgs) -> Result<Value, InvocationError> + Send + Sync + 'static,
    {
        self.capabilities
            .insert(name.into(), Capability::Operation(Arc::new(operation)));
        self
    }

    /// Registers an attribute, replacing any capability with the same name.
    #[must_use]
    pub fn with_attribute<F>(mut self, name: impl Into<String>, attribute: F) -> Self
    where
        F: Fn(&D) -> Result<Value, DroneError> + Send + Sync + 'static,
    {
        self.capabilities
            .insert(name.into(), Capability::Attribute(Arc::new(attribute)));
        self
    }

    /// Looks up a capability by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Capability<D>> {
        self.capabilities.get(name)
    }

    /// Returns `true` when a capability is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.capabilities.contains_key(name)
    }

    /// Returns registered names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut sorted: Vec<&str> = self.capabilities.keys().map(String::as_str).collect();
        sorted.sort_unstable();
        sorted
    }
}

impl<D: Drone + 'static> OperationRegistry<D> {
    /// Creates a registry exposing every [`Drone`] capability under the
    /// names in [`names`].
    #[must_use]
    pub fn standard() -> Self {
        Self::empty()
            .with_operation(names::SEND_TAKEOFF, |drone: &D, args: &OperationArgs| {
                expect_arity(args, 0)?;
                drone.send_takeoff()?;
                Ok(Value::Null)
            })
            .with_operation(names::SEND_LANDING, |drone: &D, args: &OperationArgs| {
                expect_arity(args, 0)?;
                drone.send_landing()?;
                Ok(Value::Null)
            })
            .with_operation(names::SEND_STOP, |drone: &D, args: &OperationArgs| {
                expect_arity(args, 0)?;
                drone.send_stop()?;
                Ok(Value::Null)
            })
            .with_operation(names::SEND_HOVER, |drone: &D, args: &OperationArgs| {
                expect_arity(args, 1)?;
                drone.send_hover(seconds_arg(args, 0)?)?;
                Ok(Value::Null)
            })
            .with_operation(names::RESET_MOVE_VALUES, |drone: &D, args: &OperationArgs| {
                expect_arity(args, 0)?;
                drone.reset_move_values()?;
                Ok(Value::Null)
            })
            .with_operation(names::SEND_CONTROL, |drone: &D, args: &OperationArgs| {
                expect_arity(args, 4)?;
                let control = ControlVector::new(
                    integer_arg(args, 0)?,
                    integer_arg(args, 1)?,
                    integer_arg(args, 2)?,
                    integer_arg(args, 3)?,
                );
                drone.send_control(control)?;
                Ok(Value::Null)
            })
            .with_attribute(names::FLIGHT_STATE, |drone: &D| {
                let state = drone.flight_state()?;
                Ok(json!([state.mode().as_str(), state.battery_percent()]))
            })
            .with_attribute(names::POSITION, |drone: &D| {
                let position = drone.position()?;
                Ok(json!([position.x(), position.y(), position.z()]))
            })
            .with_attribute(names::PREVIOUS_LANDING, |drone: &D| {
                let offset = drone.previous_landing()?;
                Ok(json!([offset.x(), offset.y()]))
            })
    }
}

impl<D: Drone + 'static> Default for OperationRegistry<D> {
    fn default() -> Self {
        Self::standard()
    }
}

/// Fails unless exactly `expected` arguments were supplied.
///
/// # Errors
///
/// Returns [`InvocationError::InvalidArguments`] on an arity mismatch.
pub fn expect_arity(args: &OperationArgs, expected: usize) -> Result<(), InvocationError> {
    if args.len() == expected {
        return Ok(());
    }
    Err(InvocationError::InvalidArguments(format!(
        "expected {expected} argument(s), got {}",
        args.len()
    )))
}

/// Decodes the argument at `index` as a 32-bit integer.
///
/// # Errors
///
/// Returns [`InvocationError::InvalidArguments`] when the argument is
/// missing, not an integer, or out of range.
pub fn integer_arg(args: &OperationArgs, index: usize) -> Result<i32, InvocationError> {
    args.get(index)
        .and_then(Value::as_i64)
        .and_then(|integer| i32::try_from(integer).ok())
        .ok_or_else(|| {
            InvocationError::InvalidArguments(format!("argument {index} must be a 32-bit integer"))
        })
}

/// Decodes the argument at `index` as a non-negative number of seconds.
///
/// # Errors
///
/// Returns [`InvocationError::InvalidArguments`] when the argument is
/// missing, not a number, or not a valid duration.
pub fn seconds_arg(args: &OperationArgs, index: usize) -> Result<Duration, InvocationError> {
    let seconds = args.get(index).and_then(Value::as_f64).ok_or_else(|| {
        InvocationError::InvalidArguments(format!("argument {index} must be a number of seconds"))
    })?;
    Duration::try_from_secs_f64(seconds).map_err(|err| {
        InvocationError::InvalidArguments(format!("argument {index} is not a duration: {err}"))
    })
}
