//! Swarm coordination for fleets of independently paired drones.
//!
//! The module lets a fleet be commanded as one unit: any registered drone
//! capability can be broadcast by name to a selected subset, and take-off and
//! landing are coordinated concurrently with per-drone confirmation polling.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - The drone driver contract in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
