//! Timing and outcome types for coordinated take-off and landing.

use super::{FlightMode, PortName};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Fixed timing used when coordinating take-off and landing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlightTiming {
    poll_interval: Duration,
    poll_budget: Duration,
    settle_delay: Duration,
}

impl FlightTiming {
    /// Polls every 10 ms for up to 4 s, then settles for 4 s.
    pub const STANDARD: Self = Self {
        poll_interval: Duration::from_millis(10),
        poll_budget: Duration::from_secs(4),
        settle_delay: Duration::from_secs(4),
    };

    /// Returns the pause between flight-mode reads.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Returns how long to wait for the target mode before giving up.
    #[must_use]
    pub const fn poll_budget(&self) -> Duration {
        self.poll_budget
    }

    /// Returns the pause after the polling loop ends.
    #[must_use]
    pub const fn settle_delay(&self) -> Duration {
        self.settle_delay
    }
}

impl Default for FlightTiming {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Coordinated lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightPhase {
    /// Synchronized take-off.
    TakeOff,
    /// Synchronized landing.
    Landing,
}

impl FlightPhase {
    /// Returns the flight mode that confirms this phase.
    #[must_use]
    pub const fn target_mode(self) -> FlightMode {
        match self {
            Self::TakeOff => FlightMode::TakeOff,
            Self::Landing => FlightMode::Landing,
        }
    }

    /// Returns `true` when the command is re-sent on every unconfirmed poll.
    ///
    /// Drone firmware latches landing less reliably than take-off, so landing
    /// is asserted repeatedly while take-off is sent once.
    #[must_use]
    pub const fn resends_command(self) -> bool {
        matches!(self, Self::Landing)
    }

    /// Returns the canonical lowercase representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TakeOff => "take_off",
            Self::Landing => "landing",
        }
    }
}

impl fmt::Display for FlightPhase {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Identifier shared by every report produced by one coordinated call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoordinationId(Uuid);

impl CoordinationId {
    /// Creates a new random coordination identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for CoordinationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CoordinationId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Outcome of one drone's coordinated take-off or landing.
///
/// An unconfirmed report is not a failure: the drone simply did not report
/// the target mode within the polling budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightReport {
    coordination_id: CoordinationId,
    port: PortName,
    phase: FlightPhase,
    confirmed: bool,
    polls: u32,
    commands_sent: u32,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
}

/// Parameter object for assembling a [`FlightReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightReportData {
    /// Call the report belongs to.
    pub coordination_id: CoordinationId,
    /// Port of the reporting drone.
    pub port: PortName,
    /// Transition that was coordinated.
    pub phase: FlightPhase,
    /// Whether the target mode was observed.
    pub confirmed: bool,
    /// Number of flight-mode reads.
    pub polls: u32,
    /// Number of phase commands sent.
    pub commands_sent: u32,
    /// When the drone's sequence began.
    pub started_at: DateTime<Utc>,
    /// When the drone's sequence ended, settle delay included.
    pub finished_at: DateTime<Utc>,
}

impl FlightReport {
    /// Creates a report.
    #[must_use]
    pub fn new(data: FlightReportData) -> Self {
        Self {
            coordination_id: data.coordination_id,
            port: data.port,
            phase: data.phase,
            confirmed: data.confirmed,
            polls: data.polls,
            commands_sent: data.commands_sent,
            started_at: data.started_at,
            finished_at: data.finished_at,
        }
    }

    /// Returns the coordinated call identifier.
    #[must_use]
    pub const fn coordination_id(&self) -> CoordinationId {
        self.coordination_id
    }

    /// Returns the drone's port.
    #[must_use]
    pub const fn port(&self) -> &PortName {
        &self.port
    }

    /// Returns the coordinated transition.
    #[must_use]
    pub const fn phase(&self) -> FlightPhase {
        self.phase
    }

    /// Returns `true` when the target mode was observed before the budget ran
    /// out.
    #[must_use]
    pub const fn confirmed(&self) -> bool {
        self.confirmed
    }

    /// Returns the number of flight-mode reads.
    #[must_use]
    pub const fn polls(&self) -> u32 {
        self.polls
    }

    /// Returns the number of phase commands sent.
    #[must_use]
    pub const fn commands_sent(&self) -> u32 {
        self.commands_sent
    }

    /// Returns when the drone's sequence began, read from the dispatcher's
    /// wall clock.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Returns when the drone's sequence ended.
    #[must_use]
    pub const fn finished_at(&self) -> DateTime<Utc> {
        self.finished_at
    }
}
