//! Hivemind: coordinated control of drone swarms.
//!
//! This crate lets a fleet of independently paired drones be commanded as a
//! single unit. Any drone capability can be broadcast by name to a selected
//! subset of the fleet, and take-off and landing are coordinated concurrently
//! with per-drone confirmation polling.
//!
//! # Architecture
//!
//! Hivemind follows hexagonal architecture principles:
//!
//! - **Domain**: Pure values with no driver or runtime dependencies
//! - **Ports**: The abstract drone driver contract
//! - **Adapters**: Concrete drivers (an in-memory simulator ships here)
//! - **Services**: Membership, broadcast dispatch, and flight coordination
//!
//! # Modules
//!
//! - [`swarm`]: Swarm membership, broadcast dispatch, and coordinated flight

pub mod swarm;
