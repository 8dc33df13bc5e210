//! Target selection for swarm-wide operations.

use super::{PortName, SwarmDomainError};
use std::fmt;
use std::sync::Arc;

/// A single swarm member named either by port or by handle.
///
/// Used where callers supply members as a loose list, such as flattened
/// pairing streams and removal requests.
pub enum SwarmMember<D> {
    /// A member identified by the port it was paired through.
    Port(PortName),
    /// A member identified by its drone handle.
    Drone(Arc<D>),
}

impl<D> SwarmMember<D> {
    /// Creates a port member from a raw port name.
    ///
    /// # Errors
    ///
    /// Returns [`SwarmDomainError::EmptyPortName`] when the name is blank.
    pub fn port(value: impl Into<String>) -> Result<Self, SwarmDomainError> {
        Ok(Self::Port(PortName::new(value)?))
    }

    /// Creates a handle member.
    #[must_use]
    pub const fn drone(handle: Arc<D>) -> Self {
        Self::Drone(handle)
    }
}

impl<D> Clone for SwarmMember<D> {
    fn clone(&self) -> Self {
        match self {
            Self::Port(port) => Self::Port(port.clone()),
            Self::Drone(handle) => Self::Drone(Arc::clone(handle)),
        }
    }
}

impl<D> fmt::Debug for SwarmMember<D> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Port(port) => formatter.debug_tuple("Port").field(port).finish(),
            Self::Drone(handle) => formatter
                .debug_tuple("Drone")
                .field(&Arc::as_ptr(handle))
                .finish(),
        }
    }
}

/// Which drones an operation applies to.
///
/// A selector is built per call and never stored. Port selections keep the
/// order in which ports were given; handle selections follow registry order.
pub enum TargetSelector<D> {
    /// Every drone currently registered.
    All,
    /// Drones registered under the given ports.
    Ports(Vec<PortName>),
    /// Registered drones whose handle is one of the given handles.
    Handles(Vec<Arc<D>>),
}

impl<D> TargetSelector<D> {
    /// Selects drones by raw port names. No names selects every drone.
    ///
    /// # Errors
    ///
    /// Returns [`SwarmDomainError::EmptyPortName`] when any name is blank.
    pub fn ports<I, S>(ports: I) -> Result<Self, SwarmDomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let validated = ports
            .into_iter()
            .map(PortName::new)
            .collect::<Result<Vec<_>, _>>()?;
        if validated.is_empty() {
            return Ok(Self::All);
        }
        Ok(Self::Ports(validated))
    }

    /// Selects drones by handle. No handles selects every drone.
    #[must_use]
    pub fn handles(handles: impl IntoIterator<Item = Arc<D>>) -> Self {
        let collected: Vec<Arc<D>> = handles.into_iter().collect();
        if collected.is_empty() {
            return Self::All;
        }
        Self::Handles(collected)
    }

    /// Builds a selector from a list of members that must all be of one
    /// kind. An empty list selects every drone.
    ///
    /// # Errors
    ///
    /// Returns [`SwarmDomainError::MixedSelector`] when ports and handles are
    /// combined.
    pub fn from_members(
        members: impl IntoIterator<Item = SwarmMember<D>>,
    ) -> Result<Self, SwarmDomainError> {
        let mut remaining = members.into_iter();
        let Some(first) = remaining.next() else {
            return Ok(Self::All);
        };
        match first {
            SwarmMember::Port(port) => {
                let mut ports = vec![port];
                for member in remaining {
                    match member {
                        SwarmMember::Port(next) => ports.push(next),
                        SwarmMember::Drone(_) => return Err(SwarmDomainError::MixedSelector),
                    }
                }
                Ok(Self::Ports(ports))
            }
            SwarmMember::Drone(handle) => {
                let mut handles = vec![handle];
                for member in remaining {
                    match member {
                        SwarmMember::Drone(next) => handles.push(next),
                        SwarmMember::Port(_) => return Err(SwarmDomainError::MixedSelector),
                    }
                }
                Ok(Self::Handles(handles))
            }
        }
    }

    /// Returns `true` when the selector targets every registered drone.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl<D> Default for TargetSelector<D> {
    fn default() -> Self {
        Self::All
    }
}

impl<D> Clone for TargetSelector<D> {
    fn clone(&self) -> Self {
        match self {
            Self::All => Self::All,
            Self::Ports(ports) => Self::Ports(ports.clone()),
            Self::Handles(handles) => Self::Handles(handles.clone()),
        }
    }
}

impl<D> fmt::Debug for TargetSelector<D> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => formatter.write_str("All"),
            Self::Ports(ports) => formatter.debug_tuple("Ports").field(ports).finish(),
            Self::Handles(handles) => formatter
                .debug_tuple("Handles")
                .field(&handles.iter().map(Arc::as_ptr).collect::<Vec<_>>())
                .finish(),
        }
    }
}
