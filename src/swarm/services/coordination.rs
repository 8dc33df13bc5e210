//! Per-drone take-off and landing sequences.
//!
//! A sequence resets move values, sends the phase command, polls the flight
//! mode until the target mode appears or the budget runs out, then waits for
//! the settle delay. Running out of budget is not an error. Sequences only
//! suspend while sleeping, so many of them can share one task.

use crate::swarm::{
    domain::{CoordinationId, FlightPhase, FlightReportData, FlightTiming, PortName},
    ports::{Drone, DroneResult},
};
use chrono::{DateTime, Utc};
use tokio::time::{Instant, sleep};

/// State owned by one drone's sequence for the duration of a coordinated
/// call.
#[derive(Debug)]
pub(crate) struct CoordinationState {
    phase: FlightPhase,
    timing: FlightTiming,
    started: Instant,
    polls: u32,
    commands_sent: u32,
    confirmed: bool,
}

impl CoordinationState {
    fn begin(phase: FlightPhase, timing: FlightTiming) -> Self {
        Self {
            phase,
            timing,
            started: Instant::now(),
            polls: 0,
            commands_sent: 0,
            confirmed: false,
        }
    }

    fn within_budget(&self) -> bool {
        self.started.elapsed() < self.timing.poll_budget()
    }

    fn send_command<D: Drone + ?Sized>(&mut self, drone: &D) -> DroneResult<()> {
        match self.phase {
            FlightPhase::TakeOff => drone.send_takeoff()?,
            FlightPhase::Landing => drone.send_landing()?,
        }
        self.commands_sent = self.commands_sent.saturating_add(1);
        Ok(())
    }

    fn observe<D: Drone + ?Sized>(&mut self, drone: &D) -> DroneResult<bool> {
        self.polls = self.polls.saturating_add(1);
        let reached = drone.flight_state()?.mode() == self.phase.target_mode();
        if reached {
            self.confirmed = true;
        }
        Ok(reached)
    }

    pub(crate) const fn confirmed(&self) -> bool {
        self.confirmed
    }

    pub(crate) fn into_report_data(
        self,
        coordination_id: CoordinationId,
        port: PortName,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> FlightReportData {
        FlightReportData {
            coordination_id,
            port,
            phase: self.phase,
            confirmed: self.confirmed,
            polls: self.polls,
            commands_sent: self.commands_sent,
            started_at,
            finished_at,
        }
    }
}

/// Runs one drone's sequence for `phase`.
///
/// Landing first adds the current horizontal position to the drone's
/// accumulated landing offset and re-sends the landing command on every
/// poll that has not yet observed `Landing`. Take-off sends its command once.
pub(crate) async fn run_sequence<D: Drone + ?Sized>(
    drone: &D,
    phase: FlightPhase,
    timing: FlightTiming,
) -> DroneResult<CoordinationState> {
    drone.reset_move_values()?;
    if phase == FlightPhase::Landing {
        let position = drone.position()?;
        let offset = drone.previous_landing()?.accumulate(position);
        drone.set_previous_landing(offset)?;
    }

    let mut state = CoordinationState::begin(phase, timing);
    state.send_command(drone)?;

    while state.within_budget() {
        if state.observe(drone)? {
            break;
        }
        if phase.resends_command() {
            state.send_command(drone)?;
        }
        sleep(timing.poll_interval()).await;
    }

    sleep(timing.settle_delay()).await;
    Ok(state)
}
