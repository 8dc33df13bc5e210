//! Broadcast dispatch and coordinated flight over a swarm.
//!
//! Provides [`SwarmDispatcher`], which owns the swarm registry and the
//! capability registry. Generic broadcasts run synchronously, one drone after
//! another. Take-off and landing drive every drone concurrently on the
//! calling task and return once every drone's sequence has finished.

use super::{
    DroneFailure, OperationRegistry, SwarmError, SwarmRegistry, SwarmResult,
    coordination::run_sequence,
    operations::{Capability, InvocationError, names},
};
use crate::swarm::{
    domain::{
        BroadcastOutcome, CoordinationId, FlightPhase, FlightReport, FlightTiming, OperationArgs,
        PortName, SpiralManeuver, SwarmMember, TargetSelector,
    },
    ports::Drone,
};
use futures::future::join_all;
use mockable::Clock;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Swarm-wide dispatch and coordination service.
///
/// Registry changes need `&mut self` while dispatch and coordination borrow
/// `&self`, so membership cannot change while a coordinated call is in
/// flight.
///
/// The clock only stamps [`FlightReport`] start and finish times. Poll
/// intervals, budgets and settle delays run on tokio time.
pub struct SwarmDispatcher<D, C>
where
    C: Clock + Send + Sync,
{
    registry: SwarmRegistry<D>,
    operations: OperationRegistry<D>,
    clock: Arc<C>,
    timing: FlightTiming,
}

impl<D, C> SwarmDispatcher<D, C>
where
    D: Drone + 'static,
    C: Clock + Send + Sync,
{
    /// Creates an empty swarm exposing the standard drone capabilities.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self::with_operations(OperationRegistry::standard(), clock)
    }

    /// Creates an empty swarm exposing the given capabilities.
    #[must_use]
    pub fn with_operations(operations: OperationRegistry<D>, clock: Arc<C>) -> Self {
        Self {
            registry: SwarmRegistry::new(),
            operations,
            clock,
            timing: FlightTiming::STANDARD,
        }
    }

    /// Returns the membership registry.
    #[must_use]
    pub const fn registry(&self) -> &SwarmRegistry<D> {
        &self.registry
    }

    /// Returns the capability registry.
    #[must_use]
    pub const fn operations(&self) -> &OperationRegistry<D> {
        &self.operations
    }

    /// Returns `true` when no drone is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Returns the number of registered drones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Pairs and registers drones. See [`SwarmRegistry::add_and_pair`].
    ///
    /// # Errors
    ///
    /// Returns [`SwarmError::Pairing`] when a driver fails to pair.
    pub fn add_and_pair(
        &mut self,
        pairs: impl IntoIterator<Item = (PortName, Arc<D>)>,
    ) -> SwarmResult<()> {
        self.registry.add_and_pair(pairs)
    }

    /// Pairs and registers drones from a flattened stream. See
    /// [`SwarmRegistry::add_and_pair_flat`].
    ///
    /// # Errors
    ///
    /// Returns [`SwarmError::MalformedInput`] or [`SwarmError::Pairing`].
    pub fn add_and_pair_flat(&mut self, entries: Vec<SwarmMember<D>>) -> SwarmResult<()> {
        self.registry.add_and_pair_flat(entries)
    }

    /// Removes drones without landing or disconnecting them. See
    /// [`SwarmRegistry::remove`].
    ///
    /// # Errors
    ///
    /// Returns [`SwarmError::MalformedInput`] when ports and handles are
    /// mixed.
    pub fn remove(
        &mut self,
        members: impl IntoIterator<Item = SwarmMember<D>>,
    ) -> SwarmResult<usize> {
        self.registry.remove(members)
    }

    /// Invokes a named capability across the swarm.
    ///
    /// Operations run on the selected drones in resolution order and stop at
    /// the first failure. Attributes ignore the selector and read every
    /// registered drone.
    ///
    /// # Errors
    ///
    /// Returns [`SwarmError::EmptySwarm`] or [`SwarmError::UnknownOperation`]
    /// before any drone is touched, [`SwarmError::UnknownPort`] for an
    /// unregistered port in the selector, and [`SwarmError::InvalidArguments`]
    /// or [`SwarmError::Drone`] from the first failing drone.
    pub fn invoke(
        &self,
        operation: &str,
        args: &OperationArgs,
        selector: &TargetSelector<D>,
    ) -> SwarmResult<BroadcastOutcome> {
        self.ensure_not_empty()?;
        let capability = self
            .operations
            .lookup(operation)
            .ok_or_else(|| SwarmError::UnknownOperation(operation.to_owned()))?;

        match capability {
            Capability::Operation(call) => {
                let targets = self.registry.resolve(selector)?;
                debug!(operation, targets = targets.len(), "broadcasting operation");
                let mut results = Vec::with_capacity(targets.len());
                for (port, drone) in targets {
                    let value = call(drone.as_ref(), args)
                        .map_err(|err| invocation_failure(operation, port, err))?;
                    results.push(value);
                }
                Ok(BroadcastOutcome::from_results(results))
            }
            Capability::Attribute(read) => {
                debug!(operation, drones = self.registry.len(), "reading attribute");
                let values = self
                    .registry
                    .iter()
                    .map(|(port, drone)| {
                        read(drone.as_ref()).map_err(|source| SwarmError::Drone {
                            port: port.clone(),
                            source,
                        })
                    })
                    .collect::<SwarmResult<Vec<Value>>>()?;
                Ok(BroadcastOutcome::from_attribute_values(values))
            }
        }
    }

    /// Stops every drone's motors through the broadcast path.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::invoke`].
    pub fn emergency_stop(&self) -> SwarmResult<BroadcastOutcome> {
        warn!(drones = self.registry.len(), "emergency stop");
        self.invoke(
            names::SEND_STOP,
            &OperationArgs::none(),
            &TargetSelector::All,
        )
    }

    /// Tells every drone to hover for `duration` through the broadcast path.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::invoke`].
    pub fn hover(&self, duration: Duration) -> SwarmResult<BroadcastOutcome> {
        self.invoke(
            names::SEND_HOVER,
            &OperationArgs::new(vec![Value::from(duration.as_secs_f64())]),
            &TargetSelector::All,
        )
    }

    /// Takes off the selected drones together.
    ///
    /// Each drone resets its move values, receives one take-off command, and
    /// is polled every 10 ms for up to 4 s until it reports `TakeOff`; then
    /// it settles for 4 s. Drones run concurrently and the call returns when
    /// all have finished. A drone that never confirms is reported with
    /// `confirmed == false` rather than as an error.
    ///
    /// # Errors
    ///
    /// Returns [`SwarmError::EmptySwarm`] or [`SwarmError::UnknownPort`]
    /// before any drone is touched, and [`SwarmError::Coordination`] listing
    /// every drone whose sequence failed once all sequences have finished.
    pub async fn takeoff(&self, selector: &TargetSelector<D>) -> SwarmResult<Vec<FlightReport>> {
        self.ensure_not_empty()?;
        let targets = self.registry.resolve(selector)?;
        self.coordinate(FlightPhase::TakeOff, targets).await
    }

    /// Lands every drone together.
    ///
    /// Each drone resets its move values, adds its current position to its
    /// accumulated landing offset, and receives a landing command that is
    /// re-sent on every 10 ms poll until it reports `Landing` or 4 s pass;
    /// then it settles for 4 s.
    ///
    /// # Errors
    ///
    /// Returns [`SwarmError::EmptySwarm`] before any drone is touched and
    /// [`SwarmError::Coordination`] once all sequences have finished if any
    /// failed.
    pub async fn land(&self) -> SwarmResult<Vec<FlightReport>> {
        self.ensure_not_empty()?;
        let targets = self.registry.resolve(&TargetSelector::All)?;
        self.coordinate(FlightPhase::Landing, targets).await
    }

    /// Flies a spiral: broadcasts one control command to every drone, then
    /// holds for the manoeuvre's duration.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::invoke`]; the hold is skipped on error.
    pub async fn spiral(&self, maneuver: SpiralManeuver) -> SwarmResult<()> {
        let control = maneuver.control_vector();
        debug!(?control, duration = ?maneuver.duration(), "spiral");
        self.invoke(names::SEND_CONTROL, &control.into(), &TargetSelector::All)?;
        tokio::time::sleep(maneuver.duration()).await;
        Ok(())
    }

    fn ensure_not_empty(&self) -> SwarmResult<()> {
        if self.registry.is_empty() {
            return Err(SwarmError::EmptySwarm);
        }
        Ok(())
    }

    async fn coordinate(
        &self,
        phase: FlightPhase,
        targets: Vec<(&PortName, &Arc<D>)>,
    ) -> SwarmResult<Vec<FlightReport>> {
        let coordination_id = CoordinationId::new();
        info!(%coordination_id, %phase, drones = targets.len(), "coordinating swarm");

        let sequences = targets
            .into_iter()
            .map(|(port, drone)| self.coordinate_one(coordination_id, phase, port, drone));
        let outcomes = join_all(sequences).await;

        let mut reports = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(report) => reports.push(report),
                Err(failure) => failures.push(failure),
            }
        }

        if failures.is_empty() {
            Ok(reports)
        } else {
            Err(SwarmError::Coordination { phase, failures })
        }
    }

    async fn coordinate_one(
        &self,
        coordination_id: CoordinationId,
        phase: FlightPhase,
        port: &PortName,
        drone: &Arc<D>,
    ) -> Result<FlightReport, DroneFailure> {
        let started_at = self.clock.utc();
        match run_sequence(&**drone, phase, self.timing).await {
            Ok(state) => {
                if state.confirmed() {
                    info!(%coordination_id, %port, %phase, "drone confirmed");
                } else {
                    warn!(%coordination_id, %port, %phase, "drone did not confirm within budget");
                }
                let data =
                    state.into_report_data(coordination_id, port.clone(), started_at, self.clock.utc());
                Ok(FlightReport::new(data))
            }
            Err(error) => {
                warn!(%coordination_id, %port, %phase, %error, "drone sequence failed");
                Err(DroneFailure {
                    port: port.clone(),
                    error,
                })
            }
        }
    }
}

fn invocation_failure(operation: &str, port: &PortName, err: InvocationError) -> SwarmError {
    match err {
        InvocationError::InvalidArguments(reason) => SwarmError::InvalidArguments {
            operation: operation.to_owned(),
            reason,
        },
        InvocationError::Drone(source) => SwarmError::Drone {
            port: port.clone(),
            source,
        },
    }
}
