//! Error types for swarm domain validation.

use thiserror::Error;

/// Errors returned while constructing swarm domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SwarmDomainError {
    /// The port name is empty after trimming.
    #[error("port name must not be empty")]
    EmptyPortName,

    /// A target selection combines port names and drone handles.
    #[error("target selection mixes port names and drone handles")]
    MixedSelector,

    /// A flattened pairing stream does not contain whole port/drone pairs.
    #[error("pairing stream has odd length {0}; expected port/drone pairs")]
    OddPairingStream(usize),

    /// A flattened pairing stream has an entry of the wrong kind at `index`.
    #[error("pairing stream entry {index} must be a {expected}")]
    MisplacedPairingEntry {
        /// Zero-based position of the offending entry.
        index: usize,
        /// Kind of entry expected at that position.
        expected: &'static str,
    },
}
