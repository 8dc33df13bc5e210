//! Validated connection identifiers for swarm members.

use super::SwarmDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Serial or radio port through which a drone is paired.
///
/// Port names are the stable identity of a drone inside the swarm, for
/// example `/dev/ttyACM0` or `COM3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortName(String);

impl PortName {
    /// Creates a validated port name.
    ///
    /// Surrounding whitespace is trimmed; case is preserved because device
    /// paths are case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`SwarmDomainError::EmptyPortName`] when nothing remains after
    /// trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, SwarmDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SwarmDomainError::EmptyPortName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the port name as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PortName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<&str> for PortName {
    type Error = SwarmDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for PortName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
