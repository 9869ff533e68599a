//! # gridlink-network: Network Facade and Topology Views
//!
//! A [`Network`] wraps an engine-side network handle together with the
//! backend that reaches the engine. It exposes:
//!
//! - per-voltage-level topology views ([`BusBreakerTopology`],
//!   [`NodeBreakerTopology`]) with petgraph graph construction
//! - the extension store (schema introspection plus CRUD)
//!
//! The facade owns the handle: `close()` releases the engine-side state
//! explicitly, there is no finalizer.

pub mod extensions;
pub mod topology;

pub use topology::{
    BusBreakerTopology, NodeBreakerTopology, TopologyEdge, TopologyElement, TopologyNode,
};

use gridlink_core::GridResult;
use gridlink_engine::{EngineBackend, NetworkHandle};
use std::sync::Arc;
use tracing::debug;

/// A handle-backed view of one engine-side network.
pub struct Network {
    handle: NetworkHandle,
    backend: Arc<dyn EngineBackend>,
}

impl Network {
    /// Wrap an already-created engine network.
    pub fn new(backend: Arc<dyn EngineBackend>, handle: NetworkHandle) -> Self {
        Self { handle, backend }
    }

    /// The opaque engine-side id of this network.
    pub fn handle(&self) -> NetworkHandle {
        self.handle
    }

    pub(crate) fn backend(&self) -> &Arc<dyn EngineBackend> {
        &self.backend
    }

    /// Bus-breaker topology snapshot of one voltage level.
    pub fn bus_breaker_topology(&self, voltage_level_id: &str) -> GridResult<BusBreakerTopology> {
        debug!(voltage_level_id, "fetching bus-breaker topology");
        BusBreakerTopology::fetch(self.backend.as_ref(), self.handle, voltage_level_id)
    }

    /// Node-breaker topology snapshot of one voltage level.
    pub fn node_breaker_topology(&self, voltage_level_id: &str) -> GridResult<NodeBreakerTopology> {
        debug!(voltage_level_id, "fetching node-breaker topology");
        NodeBreakerTopology::fetch(self.backend.as_ref(), self.handle, voltage_level_id)
    }

    /// Release the engine-side network state. The handle is invalid
    /// afterwards.
    pub fn close(self) -> GridResult<()> {
        self.backend.release_network(self.handle)
    }
}
