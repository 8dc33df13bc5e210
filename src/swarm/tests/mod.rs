//! Unit tests for swarm coordination.

mod support;
