//! In-memory drone driver for deterministic swarm flows.

use crate::swarm::{
    domain::{ControlVector, FlightMode, FlightState, LandingOffset, PortName, Position},
    ports::{Drone, DroneError, DroneResult},
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Battery level reported when none is configured.
const DEFAULT_BATTERY_PERCENT: u8 = 100;

/// Command observed by a [`SimulatedDrone`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulatedCommand {
    /// Pairing through a port.
    Pair(PortName),
    /// Take-off command.
    TakeOff,
    /// Landing command.
    Landing,
    /// Motor stop.
    Stop,
    /// Hover hold.
    Hover(Duration),
    /// Move value reset.
    ResetMoveValues,
    /// Raw control command.
    Control(ControlVector),
}

/// In-memory drone driver.
///
/// The simulated controller reports a scripted flight mode: after a take-off
/// or landing command it keeps reporting the previous mode until the
/// configured number of flight-state reads has happened, then reports the
/// new mode. Without a configured confirmation the mode never changes. Every
/// command is recorded for inspection.
#[derive(Debug, Default)]
pub struct SimulatedDrone {
    state: Arc<Mutex<SimulatedState>>,
}

#[derive(Debug)]
struct SimulatedState {
    paired_port: Option<PortName>,
    mode: FlightMode,
    battery_percent: u8,
    takeoff_confirmation: Option<u32>,
    landing_confirmation: Option<u32>,
    pending: Option<PendingTransition>,
    positions: VecDeque<Position>,
    previous_landing: LandingOffset,
    pairing_failure: Option<String>,
    telemetry_failure: Option<String>,
    flight_state_reads: u32,
    commands: Vec<SimulatedCommand>,
}

#[derive(Debug, Clone, Copy)]
struct PendingTransition {
    target: FlightMode,
    reads_remaining: u32,
}

impl Default for SimulatedState {
    fn default() -> Self {
        Self {
            paired_port: None,
            mode: FlightMode::Ready,
            battery_percent: DEFAULT_BATTERY_PERCENT,
            takeoff_confirmation: None,
            landing_confirmation: None,
            pending: None,
            positions: VecDeque::new(),
            previous_landing: LandingOffset::default(),
            pairing_failure: None,
            telemetry_failure: None,
            flight_state_reads: 0,
            commands: Vec::new(),
        }
    }
}

impl SimulatedState {
    fn ensure_paired(&self) -> DroneResult<()> {
        if self.paired_port.is_none() {
            return Err(DroneError::NotPaired);
        }
        Ok(())
    }

    fn arm_transition(&mut self, target: FlightMode, confirmation: Option<u32>) {
        if self
            .pending
            .is_some_and(|pending| pending.target == target)
        {
            return;
        }
        self.pending = None;
        match confirmation {
            Some(0) => self.mode = target,
            Some(reads) => {
                self.pending = Some(PendingTransition {
                    target,
                    reads_remaining: reads,
                });
            }
            None => {}
        }
    }

    fn observe_mode(&mut self) -> FlightMode {
        self.flight_state_reads = self.flight_state_reads.saturating_add(1);
        if let Some(mut pending) = self.pending {
            pending.reads_remaining = pending.reads_remaining.saturating_sub(1);
            if pending.reads_remaining == 0 {
                self.mode = pending.target;
                self.pending = None;
            } else {
                self.pending = Some(pending);
            }
        }
        self.mode
    }
}

impl SimulatedDrone {
    /// Creates a grounded drone that never confirms transitions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports `TakeOff` on the `reads`-th flight-state read after a take-off
    /// command. Zero confirms immediately.
    #[must_use]
    pub fn with_takeoff_confirmation_after(self, reads: u32) -> Self {
        self.configure(|state| state.takeoff_confirmation = Some(reads))
    }

    /// Reports `Landing` on the `reads`-th flight-state read after the first
    /// landing command. Repeated landing commands do not restart the count.
    #[must_use]
    pub fn with_landing_confirmation_after(self, reads: u32) -> Self {
        self.configure(|state| state.landing_confirmation = Some(reads))
    }

    /// Sets the mode reported before any transition.
    #[must_use]
    pub fn with_mode(self, mode: FlightMode) -> Self {
        self.configure(|state| state.mode = mode)
    }

    /// Sets the reported battery charge.
    #[must_use]
    pub fn with_battery_percent(self, battery_percent: u8) -> Self {
        self.configure(|state| state.battery_percent = battery_percent)
    }

    /// Scripts position readings. Each read consumes one reading; the last
    /// one repeats.
    #[must_use]
    pub fn with_positions(self, positions: impl IntoIterator<Item = Position>) -> Self {
        self.configure(|state| state.positions = positions.into_iter().collect())
    }

    /// Makes pairing fail with the given reason.
    #[must_use]
    pub fn with_pairing_failure(self, reason: impl Into<String>) -> Self {
        let reason_text = reason.into();
        self.configure(|state| state.pairing_failure = Some(reason_text))
    }

    /// Makes flight-state reads fail with a link error.
    #[must_use]
    pub fn with_telemetry_failure(self, reason: impl Into<String>) -> Self {
        let reason_text = reason.into();
        self.configure(|state| state.telemetry_failure = Some(reason_text))
    }

    fn configure(self, update: impl FnOnce(&mut SimulatedState)) -> Self {
        if let Ok(mut state) = self.state.lock() {
            update(&mut state);
        }
        self
    }

    fn lock(&self) -> DroneResult<MutexGuard<'_, SimulatedState>> {
        self.state
            .lock()
            .map_err(|err| DroneError::link(std::io::Error::other(err.to_string())))
    }

    fn record(&self, command: SimulatedCommand) -> DroneResult<MutexGuard<'_, SimulatedState>> {
        let mut state = self.lock()?;
        state.ensure_paired()?;
        state.commands.push(command);
        Ok(state)
    }

    /// Returns the port the drone was last paired through.
    ///
    /// # Errors
    ///
    /// Returns [`DroneError::Link`] when lock acquisition fails.
    pub fn paired_port(&self) -> DroneResult<Option<PortName>> {
        Ok(self.lock()?.paired_port.clone())
    }

    /// Returns every recorded command in order.
    ///
    /// # Errors
    ///
    /// Returns [`DroneError::Link`] when lock acquisition fails.
    pub fn commands(&self) -> DroneResult<Vec<SimulatedCommand>> {
        Ok(self.lock()?.commands.clone())
    }

    /// Returns how many recorded commands match `predicate`.
    ///
    /// # Errors
    ///
    /// Returns [`DroneError::Link`] when lock acquisition fails.
    pub fn count_commands(
        &self,
        predicate: impl Fn(&SimulatedCommand) -> bool,
    ) -> DroneResult<usize> {
        Ok(self
            .lock()?
            .commands
            .iter()
            .filter(|command| predicate(command))
            .count())
    }

    /// Returns every control command sent, in order.
    ///
    /// # Errors
    ///
    /// Returns [`DroneError::Link`] when lock acquisition fails.
    pub fn control_commands(&self) -> DroneResult<Vec<ControlVector>> {
        Ok(self
            .lock()?
            .commands
            .iter()
            .filter_map(|command| match command {
                SimulatedCommand::Control(control) => Some(*control),
                _ => None,
            })
            .collect())
    }

    /// Returns how many times the flight state has been read.
    ///
    /// # Errors
    ///
    /// Returns [`DroneError::Link`] when lock acquisition fails.
    pub fn flight_state_reads(&self) -> DroneResult<u32> {
        Ok(self.lock()?.flight_state_reads)
    }
}

impl Drone for SimulatedDrone {
    fn pair(&self, port: &PortName) -> DroneResult<()> {
        let mut state = self.lock()?;
        if let Some(reason) = state.pairing_failure.clone() {
            return Err(DroneError::Pairing {
                port: port.clone(),
                reason,
            });
        }
        state.paired_port = Some(port.clone());
        state.commands.push(SimulatedCommand::Pair(port.clone()));
        Ok(())
    }

    fn send_takeoff(&self) -> DroneResult<()> {
        let mut state = self.record(SimulatedCommand::TakeOff)?;
        let confirmation = state.takeoff_confirmation;
        state.arm_transition(FlightMode::TakeOff, confirmation);
        Ok(())
    }

    fn send_landing(&self) -> DroneResult<()> {
        let mut state = self.record(SimulatedCommand::Landing)?;
        let confirmation = state.landing_confirmation;
        state.arm_transition(FlightMode::Landing, confirmation);
        Ok(())
    }

    fn send_stop(&self) -> DroneResult<()> {
        let mut state = self.record(SimulatedCommand::Stop)?;
        state.pending = None;
        state.mode = FlightMode::Stop;
        Ok(())
    }

    fn send_hover(&self, duration: Duration) -> DroneResult<()> {
        drop(self.record(SimulatedCommand::Hover(duration))?);
        Ok(())
    }

    fn reset_move_values(&self) -> DroneResult<()> {
        drop(self.record(SimulatedCommand::ResetMoveValues)?);
        Ok(())
    }

    fn send_control(&self, control: ControlVector) -> DroneResult<()> {
        drop(self.record(SimulatedCommand::Control(control))?);
        Ok(())
    }

    fn flight_state(&self) -> DroneResult<FlightState> {
        let mut state = self.lock()?;
        state.ensure_paired()?;
        if let Some(reason) = state.telemetry_failure.clone() {
            return Err(DroneError::link(std::io::Error::other(reason)));
        }
        let mode = state.observe_mode();
        Ok(FlightState::new(mode, state.battery_percent))
    }

    fn position(&self) -> DroneResult<Position> {
        let mut state = self.lock()?;
        state.ensure_paired()?;
        if state.positions.len() > 1 {
            return Ok(state.positions.pop_front().unwrap_or_default());
        }
        Ok(state.positions.front().copied().unwrap_or_default())
    }

    fn previous_landing(&self) -> DroneResult<LandingOffset> {
        Ok(self.lock()?.previous_landing)
    }

    fn set_previous_landing(&self, offset: LandingOffset) -> DroneResult<()> {
        self.lock()?.previous_landing = offset;
        Ok(())
    }
}
