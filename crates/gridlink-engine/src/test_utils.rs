//! In-memory fixture backend for tests.
//!
//! [`StaticBackend`] implements [`EngineBackend`] against seeded tables and
//! scripted analysis results, so the marshaling layers can be exercised
//! without the real engine. It is compiled into the library (not behind
//! `cfg(test)`) because the integration suites of the other workspace
//! crates drive it.

use crate::backend::{EngineBackend, NetworkHandle, SessionHandle};
use crate::extension::{AttributeSpec, AttributeType, ExtensionSchema};
use crate::table::{Column, Table, Value};
use gridlink_core::{
    AnalysisResult, AnalysisStatus, Contingency, GridError, GridResult,
    SecurityAnalysisParameters,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::debug;

#[derive(Clone)]
struct BusBreakerTables {
    elements: Table,
    switches: Table,
    buses: Table,
}

#[derive(Clone)]
struct NodeBreakerTables {
    nodes: Table,
    switches: Table,
    internal_connections: Table,
}

#[derive(Default)]
struct VoltageLevel {
    bus_breaker: Option<BusBreakerTables>,
    node_breaker: Option<NodeBreakerTables>,
}

#[derive(Default)]
struct NetworkState {
    voltage_levels: HashMap<String, VoltageLevel>,
    // extension name -> rows in insertion order (element id, cells by column)
    extensions: HashMap<String, Vec<(String, HashMap<String, Value>)>>,
}

struct SessionState {
    contingencies: Vec<Contingency>,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    networks: HashMap<u64, NetworkState>,
    sessions: HashMap<u64, SessionState>,
    schemas: Vec<ExtensionSchema>,
    scripted_results: Vec<AnalysisResult>,
}

/// Fixture engine holding everything in memory behind a single lock.
#[derive(Default)]
pub struct StaticBackend {
    inner: Mutex<Inner>,
}

impl StaticBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canned two-voltage-level network used across the workspace tests:
    /// a bus-breaker level `VLGEN` (buses A/B/C, two switches) and a
    /// node-breaker level `VL380` (nodes 1/2/3, one switch, one internal
    /// connection), plus two registered extension types with no rows.
    pub fn small_grid() -> (Self, NetworkHandle) {
        let backend = Self::new();
        let network = backend.seed_network();

        backend.seed_bus_breaker(
            network,
            "VLGEN",
            Table::new(
                "elements",
                Column::str("id", &["GEN", "LOAD"]),
                vec![
                    Column::str("type", &["GENERATOR", "LOAD"]),
                    Column::str("bus_id", &["A", "C"]),
                ],
            )
            .unwrap(),
            Table::new(
                "switches",
                Column::str("id", &["BR1", "BR2"]),
                vec![
                    Column::str("kind", &["BREAKER", "BREAKER"]),
                    Column::bool("open", &[false, true]),
                    Column::str("bus1_id", &["A", "B"]),
                    Column::str("bus2_id", &["B", "C"]),
                ],
            )
            .unwrap(),
            Table::index_only("buses", Column::str("id", &["A", "B", "C"])),
        );

        backend.seed_node_breaker(
            network,
            "VL380",
            Table::new(
                "nodes",
                Column::int("node", &[1, 2, 3]),
                vec![Column::str("connectable_id", &["BBS1", "", "LINE1"])],
            )
            .unwrap(),
            Table::new(
                "switches",
                Column::str("id", &["DISC1"]),
                vec![
                    Column::str("kind", &["DISCONNECTOR"]),
                    Column::bool("open", &[false]),
                    Column::int("node1", &[1]),
                    Column::int("node2", &[2]),
                ],
            )
            .unwrap(),
            Table::new(
                "internal_connections",
                Column::int("id", &[0]),
                vec![Column::int("node1", &[2]), Column::int("node2", &[3])],
            )
            .unwrap(),
        );

        backend.register_extension(ExtensionSchema::new(
            "activePowerControl",
            "Active power control mode of a generator",
            vec![
                AttributeSpec::new("droop", AttributeType::Float),
                AttributeSpec::new("participate", AttributeType::Bool),
            ],
        ));
        backend.register_extension(ExtensionSchema::new(
            "xnode",
            "Boundary-node code attached to a dangling line",
            vec![AttributeSpec::new("code", AttributeType::String)],
        ));

        (backend, network)
    }

    /// Allocate a new engine-side network.
    pub fn seed_network(&self) -> NetworkHandle {
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.networks.insert(id, NetworkState::default());
        NetworkHandle(id)
    }

    /// Attach bus-breaker tables to a voltage level.
    pub fn seed_bus_breaker(
        &self,
        network: NetworkHandle,
        voltage_level_id: &str,
        elements: Table,
        switches: Table,
        buses: Table,
    ) {
        let mut inner = self.inner.lock();
        let state = inner.networks.get_mut(&network.0).expect("seeded network");
        state
            .voltage_levels
            .entry(voltage_level_id.to_string())
            .or_default()
            .bus_breaker = Some(BusBreakerTables {
            elements,
            switches,
            buses,
        });
    }

    /// Attach node-breaker tables to a voltage level.
    pub fn seed_node_breaker(
        &self,
        network: NetworkHandle,
        voltage_level_id: &str,
        nodes: Table,
        switches: Table,
        internal_connections: Table,
    ) {
        let mut inner = self.inner.lock();
        let state = inner.networks.get_mut(&network.0).expect("seeded network");
        state
            .voltage_levels
            .entry(voltage_level_id.to_string())
            .or_default()
            .node_breaker = Some(NodeBreakerTables {
            nodes,
            switches,
            internal_connections,
        });
    }

    /// Register an extension type in the schema registry.
    pub fn register_extension(&self, schema: ExtensionSchema) {
        self.inner.lock().schemas.push(schema);
    }

    /// Replace the synthesized analysis output with an explicit record
    /// sequence, in the order the engine would report it.
    pub fn script_results(&self, results: Vec<AnalysisResult>) {
        self.inner.lock().scripted_results = results;
    }

    fn with_voltage_level<T>(
        &self,
        network: NetworkHandle,
        voltage_level_id: &str,
        f: impl FnOnce(&VoltageLevel) -> GridResult<T>,
    ) -> GridResult<T> {
        let inner = self.inner.lock();
        let state = inner
            .networks
            .get(&network.0)
            .ok_or_else(|| GridError::Engine(format!("unknown network handle {}", network.0)))?;
        let vl = state
            .voltage_levels
            .get(voltage_level_id)
            .ok_or_else(|| GridError::not_found("voltage level", voltage_level_id))?;
        f(vl)
    }

    fn bus_breaker(
        &self,
        network: NetworkHandle,
        voltage_level_id: &str,
        pick: impl FnOnce(&BusBreakerTables) -> Table,
    ) -> GridResult<Table> {
        self.with_voltage_level(network, voltage_level_id, |vl| {
            vl.bus_breaker
                .as_ref()
                .map(pick)
                .ok_or_else(|| GridError::not_found("bus-breaker view", voltage_level_id))
        })
    }

    fn node_breaker(
        &self,
        network: NetworkHandle,
        voltage_level_id: &str,
        pick: impl FnOnce(&NodeBreakerTables) -> Table,
    ) -> GridResult<Table> {
        self.with_voltage_level(network, voltage_level_id, |vl| {
            vl.node_breaker
                .as_ref()
                .map(pick)
                .ok_or_else(|| GridError::not_found("node-breaker view", voltage_level_id))
        })
    }

    fn schema(inner: &Inner, name: &str) -> GridResult<ExtensionSchema> {
        inner
            .schemas
            .iter()
            .find(|s| s.name == name)
            .cloned()
            .ok_or_else(|| GridError::not_found("extension type", name))
    }
}

impl EngineBackend for StaticBackend {
    fn bus_breaker_view_elements(
        &self,
        network: NetworkHandle,
        voltage_level_id: &str,
    ) -> GridResult<Table> {
        self.bus_breaker(network, voltage_level_id, |t| t.elements.clone())
    }

    fn bus_breaker_view_switches(
        &self,
        network: NetworkHandle,
        voltage_level_id: &str,
    ) -> GridResult<Table> {
        self.bus_breaker(network, voltage_level_id, |t| t.switches.clone())
    }

    fn bus_breaker_view_buses(
        &self,
        network: NetworkHandle,
        voltage_level_id: &str,
    ) -> GridResult<Table> {
        self.bus_breaker(network, voltage_level_id, |t| t.buses.clone())
    }

    fn node_breaker_view_nodes(
        &self,
        network: NetworkHandle,
        voltage_level_id: &str,
    ) -> GridResult<Table> {
        self.node_breaker(network, voltage_level_id, |t| t.nodes.clone())
    }

    fn node_breaker_view_switches(
        &self,
        network: NetworkHandle,
        voltage_level_id: &str,
    ) -> GridResult<Table> {
        self.node_breaker(network, voltage_level_id, |t| t.switches.clone())
    }

    fn node_breaker_view_internal_connections(
        &self,
        network: NetworkHandle,
        voltage_level_id: &str,
    ) -> GridResult<Table> {
        self.node_breaker(network, voltage_level_id, |t| t.internal_connections.clone())
    }

    fn release_network(&self, network: NetworkHandle) -> GridResult<()> {
        let mut inner = self.inner.lock();
        inner
            .networks
            .remove(&network.0)
            .ok_or_else(|| GridError::Engine(format!("unknown network handle {}", network.0)))?;
        debug!(handle = network.0, "released network");
        Ok(())
    }

    fn create_security_analysis(&self) -> GridResult<SessionHandle> {
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.sessions.insert(
            id,
            SessionState {
                contingencies: Vec::new(),
            },
        );
        debug!(session = id, "created security-analysis session");
        Ok(SessionHandle(id))
    }

    fn add_contingency(
        &self,
        session: SessionHandle,
        contingency: &Contingency,
    ) -> GridResult<()> {
        let mut inner = self.inner.lock();
        let state = inner
            .sessions
            .get_mut(&session.0)
            .ok_or_else(|| GridError::Engine(format!("unknown session handle {}", session.0)))?;
        state.contingencies.push(contingency.clone());
        Ok(())
    }

    fn run_security_analysis(
        &self,
        session: SessionHandle,
        network: NetworkHandle,
        _parameters: &SecurityAnalysisParameters,
    ) -> GridResult<Vec<AnalysisResult>> {
        let inner = self.inner.lock();
        if !inner.networks.contains_key(&network.0) {
            return Err(GridError::Engine(format!(
                "unknown network handle {}",
                network.0
            )));
        }
        let state = inner
            .sessions
            .get(&session.0)
            .ok_or_else(|| GridError::Engine(format!("unknown session handle {}", session.0)))?;

        if !inner.scripted_results.is_empty() {
            return Ok(inner.scripted_results.clone());
        }
        // Default script: everything converges, no violations.
        let mut results = vec![AnalysisResult::base_case(AnalysisStatus::Converged, vec![])];
        for contingency in &state.contingencies {
            results.push(AnalysisResult::post_contingency(
                contingency.id.clone(),
                AnalysisStatus::Converged,
                vec![],
            ));
        }
        debug!(session = session.0, scenarios = results.len(), "ran security analysis");
        Ok(results)
    }

    fn close_security_analysis(&self, session: SessionHandle) -> GridResult<()> {
        let mut inner = self.inner.lock();
        inner
            .sessions
            .remove(&session.0)
            .ok_or_else(|| GridError::Engine(format!("unknown session handle {}", session.0)))?;
        debug!(session = session.0, "closed security-analysis session");
        Ok(())
    }

    fn extension_schemas(&self) -> GridResult<Vec<ExtensionSchema>> {
        Ok(self.inner.lock().schemas.clone())
    }

    fn get_extensions(&self, network: NetworkHandle, name: &str) -> GridResult<Table> {
        let inner = self.inner.lock();
        let schema = Self::schema(&inner, name)?;
        let state = inner
            .networks
            .get(&network.0)
            .ok_or_else(|| GridError::Engine(format!("unknown network handle {}", network.0)))?;
        let rows = state.extensions.get(name).map(Vec::as_slice).unwrap_or(&[]);

        let index = Column::new(
            "id",
            rows.iter().map(|(id, _)| Value::Str(id.clone())).collect(),
        );
        let columns = schema
            .attributes
            .iter()
            .map(|attr| {
                let values = rows
                    .iter()
                    .map(|(id, cells)| {
                        cells.get(&attr.name).cloned().ok_or_else(|| {
                            GridError::malformed(
                                name,
                                format!("row '{id}' missing attribute '{}'", attr.name),
                            )
                        })
                    })
                    .collect::<GridResult<Vec<Value>>>()?;
                Ok(Column::new(attr.name.clone(), values))
            })
            .collect::<GridResult<Vec<Column>>>()?;
        Table::new(name, index, columns)
    }

    fn create_extensions(
        &self,
        network: NetworkHandle,
        name: &str,
        rows: &Table,
    ) -> GridResult<()> {
        let mut inner = self.inner.lock();
        Self::schema(&inner, name)?;
        let ids: Vec<String> = rows.str_index()?.iter().map(|s| s.to_string()).collect();
        let state = inner
            .networks
            .get_mut(&network.0)
            .ok_or_else(|| GridError::Engine(format!("unknown network handle {}", network.0)))?;
        let stored = state.extensions.entry(name.to_string()).or_default();
        for (row, id) in ids.into_iter().enumerate() {
            let cells: HashMap<String, Value> = rows
                .columns()
                .iter()
                .map(|c| (c.name().to_string(), c.values()[row].clone()))
                .collect();
            match stored.iter_mut().find(|(existing, _)| *existing == id) {
                Some((_, existing_cells)) => *existing_cells = cells,
                None => stored.push((id, cells)),
            }
        }
        Ok(())
    }

    fn update_extensions(
        &self,
        network: NetworkHandle,
        name: &str,
        rows: &Table,
    ) -> GridResult<()> {
        let mut inner = self.inner.lock();
        Self::schema(&inner, name)?;
        let ids: Vec<String> = rows.str_index()?.iter().map(|s| s.to_string()).collect();
        let state = inner
            .networks
            .get_mut(&network.0)
            .ok_or_else(|| GridError::Engine(format!("unknown network handle {}", network.0)))?;
        let stored = state.extensions.entry(name.to_string()).or_default();
        for (row, id) in ids.into_iter().enumerate() {
            let (_, cells) = stored
                .iter_mut()
                .find(|(existing, _)| *existing == id)
                .ok_or_else(|| GridError::not_found("extension", id.clone()))?;
            for column in rows.columns() {
                cells.insert(column.name().to_string(), column.values()[row].clone());
            }
        }
        Ok(())
    }

    fn remove_extensions(
        &self,
        network: NetworkHandle,
        name: &str,
        element_ids: &[String],
    ) -> GridResult<()> {
        let mut inner = self.inner.lock();
        Self::schema(&inner, name)?;
        let state = inner
            .networks
            .get_mut(&network.0)
            .ok_or_else(|| GridError::Engine(format!("unknown network handle {}", network.0)))?;
        if let Some(stored) = state.extensions.get_mut(name) {
            stored.retain(|(id, _)| !element_ids.contains(id));
        }
        Ok(())
    }
}
