//! Membership registry mapping ports to paired drones.

use super::{SwarmError, SwarmResult};
use crate::swarm::{
    domain::{PortName, SwarmDomainError, SwarmMember, TargetSelector},
    ports::Drone,
};
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::debug;

/// Ports and drones currently in the swarm.
///
/// Iteration follows insertion order. A port is present only if its drone
/// paired successfully through it. Removing a drone never lands or
/// disconnects it; that stays with the caller.
pub struct SwarmRegistry<D> {
    drones: IndexMap<PortName, Arc<D>>,
}

impl<D> SwarmRegistry<D> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            drones: IndexMap::new(),
        }
    }

    /// Returns `true` when no drone is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drones.is_empty()
    }

    /// Returns the number of registered drones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.drones.len()
    }

    /// Returns `true` when a drone is registered on `port`.
    #[must_use]
    pub fn contains(&self, port: &PortName) -> bool {
        self.drones.contains_key(port)
    }

    /// Returns the drone registered on `port`.
    #[must_use]
    pub fn get(&self, port: &PortName) -> Option<&Arc<D>> {
        self.drones.get(port)
    }

    /// Returns registered ports in registry order.
    pub fn ports(&self) -> impl Iterator<Item = &PortName> {
        self.drones.keys()
    }

    /// Returns registered port/drone pairs in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (&PortName, &Arc<D>)> {
        self.drones.iter()
    }

    /// Removes drones by port. Absent ports are ignored.
    ///
    /// Returns how many drones were removed.
    pub fn remove_ports(&mut self, ports: &[PortName]) -> usize {
        let before = self.drones.len();
        self.drones.retain(|port, _| !ports.contains(port));
        let removed = before.saturating_sub(self.drones.len());
        debug!(removed, "removed drones by port");
        removed
    }

    /// Removes drones by handle. Handles not in the swarm are ignored.
    ///
    /// Returns how many drones were removed.
    pub fn remove_handles(&mut self, handles: &[Arc<D>]) -> usize {
        let before = self.drones.len();
        self.drones
            .retain(|_, drone| !handles.iter().any(|handle| Arc::ptr_eq(handle, drone)));
        let removed = before.saturating_sub(self.drones.len());
        debug!(removed, "removed drones by handle");
        removed
    }

    /// Removes drones named by `members`, which must be all ports or all
    /// handles. An empty list removes nothing.
    ///
    /// Returns how many drones were removed.
    ///
    /// # Errors
    ///
    /// Returns [`SwarmError::MalformedInput`] when ports and handles are
    /// mixed; nothing is removed in that case.
    pub fn remove(
        &mut self,
        members: impl IntoIterator<Item = SwarmMember<D>>,
    ) -> SwarmResult<usize> {
        let removed = match TargetSelector::from_members(members)? {
            TargetSelector::All => 0,
            TargetSelector::Ports(ports) => self.remove_ports(&ports),
            TargetSelector::Handles(handles) => self.remove_handles(&handles),
        };
        Ok(removed)
    }

    /// Resolves a selector to port/drone pairs.
    ///
    /// `All` yields every drone in registry order. `Ports` yields drones in
    /// the order the ports were given. `Handles` yields registered drones in
    /// registry order whose handle is among those given. An empty port or
    /// handle list is treated as `All`.
    ///
    /// # Errors
    ///
    /// Returns [`SwarmError::UnknownPort`] for the first selected port with
    /// no registered drone.
    pub fn resolve(
        &self,
        selector: &TargetSelector<D>,
    ) -> SwarmResult<Vec<(&PortName, &Arc<D>)>> {
        match selector {
            TargetSelector::All => Ok(self.drones.iter().collect()),
            TargetSelector::Ports(ports) if ports.is_empty() => Ok(self.drones.iter().collect()),
            TargetSelector::Handles(handles) if handles.is_empty() => {
                Ok(self.drones.iter().collect())
            }
            TargetSelector::Ports(ports) => ports
                .iter()
                .map(|port| {
                    self.drones
                        .get_key_value(port)
                        .ok_or_else(|| SwarmError::UnknownPort(port.clone()))
                })
                .collect(),
            TargetSelector::Handles(handles) => Ok(self
                .drones
                .iter()
                .filter(|(_, drone)| handles.iter().any(|handle| Arc::ptr_eq(handle, drone)))
                .collect()),
        }
    }
}

impl<D: Drone> SwarmRegistry<D> {
    /// Pairs each drone through its port and registers it, replacing any
    /// drone already registered on that port.
    ///
    /// Pairs are processed in order; when one fails, earlier pairs stay
    /// registered and later pairs are not attempted.
    ///
    /// # Errors
    ///
    /// Returns [`SwarmError::Pairing`] with the driver error unchanged.
    pub fn add_and_pair(
        &mut self,
        pairs: impl IntoIterator<Item = (PortName, Arc<D>)>,
    ) -> SwarmResult<()> {
        for (port, drone) in pairs {
            if let Err(source) = drone.pair(&port) {
                return Err(SwarmError::Pairing { port, source });
            }
            debug!(%port, "paired drone");
            self.drones.insert(port, drone);
        }
        Ok(())
    }

    /// Pairs drones given as a flattened `port, drone, port, drone, …`
    /// stream.
    ///
    /// # Errors
    ///
    /// Returns [`SwarmError::MalformedInput`] before any pairing when the
    /// stream has odd length or an entry is out of place, and
    /// [`SwarmError::Pairing`] as for [`Self::add_and_pair`].
    pub fn add_and_pair_flat(&mut self, entries: Vec<SwarmMember<D>>) -> SwarmResult<()> {
        let pairs = pair_up(entries)?;
        self.add_and_pair(pairs)
    }
}

impl<D> Default for SwarmRegistry<D> {
    fn default() -> Self {
        Self::new()
    }
}

fn pair_up<D>(entries: Vec<SwarmMember<D>>) -> Result<Vec<(PortName, Arc<D>)>, SwarmDomainError> {
    if !entries.len().is_multiple_of(2) {
        return Err(SwarmDomainError::OddPairingStream(entries.len()));
    }
    let mut pairs = Vec::new();
    let mut stream = entries.into_iter().enumerate();
    while let Some((port_index, port_entry)) = stream.next() {
        let SwarmMember::Port(port) = port_entry else {
            return Err(SwarmDomainError::MisplacedPairingEntry {
                index: port_index,
                expected: "port",
            });
        };
        let drone_index = port_index.saturating_add(1);
        let Some((_, SwarmMember::Drone(drone))) = stream.next() else {
            return Err(SwarmDomainError::MisplacedPairingEntry {
                index: drone_index,
                expected: "drone",
            });
        };
        pairs.push((port, drone));
    }
    Ok(pairs)
}
