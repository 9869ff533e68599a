//! Per-voltage-level topology views and their graph representation.
//!
//! The engine describes a voltage level's electrical topology as flat
//! tables. Two views exist:
//!
//! - **Bus-breaker**: buses are graph vertices, switches are edges.
//! - **Node-breaker**: individual connection nodes are vertices; edges are
//!   switches plus fixed internal connections (plain "wires").
//!
//! Both views hold their tables as fetched: a *snapshot*. The graph built
//! by `create_graph` does not track later network changes; fetch the view
//! again to see new state. Repeated `create_graph` calls build independent
//! graphs.

use gridlink_core::{GridError, GridResult};
use gridlink_engine::{EngineBackend, NetworkHandle, Table};
use petgraph::graph::UnGraph;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Equipment of a voltage level and the bus-breaker bus it attaches to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologyElement {
    pub id: String,
    /// Element kind as reported by the engine (GENERATOR, LOAD, LINE...)
    pub element_type: String,
    /// Bus of the bus-breaker view the element connects to
    pub bus_id: String,
}

/// A node of the node-breaker view and its connected element, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologyNode {
    pub node: i64,
    /// Connected network element; busbar sections and plain junction nodes
    /// may have none
    pub connectable_id: Option<String>,
}

/// Edge payload of a topology graph: where the edge came from.
///
/// Switches carry their id and open/closed status; an edge is present
/// regardless of status (connectivity queries that care about open switches
/// filter on the payload).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologyEdge {
    Switch { id: String, open: bool },
    InternalConnection,
}

/// Build an undirected graph from a vertex key list and an edge list.
///
/// One vertex per key, one edge per entry, duplicates kept. Every endpoint
/// must be a declared vertex: an unknown endpoint means the engine handed
/// out inconsistent tables, reported as [`GridError::Topology`] rather than
/// trusted.
fn graph_from_edges<K>(
    vertices: Vec<K>,
    edges: Vec<(K, K, TopologyEdge)>,
) -> GridResult<UnGraph<K, TopologyEdge>>
where
    K: Eq + Hash + Clone + fmt::Display,
{
    let mut graph = UnGraph::with_capacity(vertices.len(), edges.len());
    let mut lookup = HashMap::with_capacity(vertices.len());
    for key in vertices {
        let node = graph.add_node(key.clone());
        lookup.insert(key, node);
    }
    for (a, b, payload) in edges {
        let find = |key: &K| {
            lookup.get(key).copied().ok_or_else(|| {
                GridError::Topology(format!("edge endpoint '{key}' is not a declared vertex"))
            })
        };
        let (a, b) = (find(&a)?, find(&b)?);
        graph.add_edge(a, b, payload);
    }
    Ok(graph)
}

/// Switch edges from a switches table, endpoints taken from the two
/// designated columns.
fn switch_edges<K>(
    switches: &Table,
    endpoints: impl Fn(&Table) -> GridResult<(Vec<K>, Vec<K>)>,
) -> GridResult<Vec<(K, K, TopologyEdge)>> {
    let ids = switches.index().values();
    let open = switches.bool_column("open")?;
    let (from, to) = endpoints(switches)?;
    Ok(from
        .into_iter()
        .zip(to)
        .zip(ids.iter().zip(open))
        .map(|((a, b), (id, open))| {
            (
                a,
                b,
                TopologyEdge::Switch {
                    id: id.to_string(),
                    open,
                },
            )
        })
        .collect())
}

/// Bus-breaker representation of the topology of a voltage level.
///
/// Vertices are buses, edges are switches (breakers and disconnectors).
/// For each element of the voltage level the elements table also gives the
/// bus-breaker bus it is connected to.
#[derive(Debug, Clone)]
pub struct BusBreakerTopology {
    elements: Table,
    switches: Table,
    buses: Table,
}

impl BusBreakerTopology {
    pub(crate) fn fetch(
        backend: &dyn EngineBackend,
        network: NetworkHandle,
        voltage_level_id: &str,
    ) -> GridResult<Self> {
        Ok(Self {
            elements: backend.bus_breaker_view_elements(network, voltage_level_id)?,
            switches: backend.bus_breaker_view_switches(network, voltage_level_id)?,
            buses: backend.bus_breaker_view_buses(network, voltage_level_id)?,
        })
    }

    /// Elements (lines, generators...) of the voltage level, with the bus
    /// each connects to.
    pub fn elements(&self) -> &Table {
        &self.elements
    }

    /// Switches of the bus-breaker view, with their connection status.
    pub fn switches(&self) -> &Table {
        &self.switches
    }

    /// Buses of the bus-breaker view.
    pub fn buses(&self) -> &Table {
        &self.buses
    }

    /// Typed rows of the elements table.
    pub fn element_list(&self) -> GridResult<Vec<TopologyElement>> {
        let ids = self.elements.str_index()?;
        let types = self.elements.str_column("type")?;
        let buses = self.elements.str_column("bus_id")?;
        Ok(ids
            .into_iter()
            .zip(types)
            .zip(buses)
            .map(|((id, element_type), bus_id)| TopologyElement {
                id: id.to_string(),
                element_type: element_type.to_string(),
                bus_id: bus_id.to_string(),
            })
            .collect())
    }

    /// The topology as an undirected graph: one vertex per bus, one edge
    /// per switch (endpoint columns `bus1_id`/`bus2_id`).
    pub fn create_graph(&self) -> GridResult<UnGraph<String, TopologyEdge>> {
        let vertices = self
            .buses
            .str_index()?
            .into_iter()
            .map(str::to_string)
            .collect();
        let edges = switch_edges(&self.switches, |t| {
            let from = t.str_column("bus1_id")?.into_iter().map(str::to_string);
            let to = t.str_column("bus2_id")?.into_iter().map(str::to_string);
            Ok((from.collect(), to.collect()))
        })?;
        graph_from_edges(vertices, edges)
    }
}

/// Node-breaker representation of the topology of a voltage level.
///
/// Vertices are connection nodes, identified by a number unique within the
/// voltage level; edges are switches and fixed internal connections.
#[derive(Debug, Clone)]
pub struct NodeBreakerTopology {
    internal_connections: Table,
    switches: Table,
    nodes: Table,
}

impl NodeBreakerTopology {
    pub(crate) fn fetch(
        backend: &dyn EngineBackend,
        network: NetworkHandle,
        voltage_level_id: &str,
    ) -> GridResult<Self> {
        Ok(Self {
            internal_connections: backend
                .node_breaker_view_internal_connections(network, voltage_level_id)?,
            switches: backend.node_breaker_view_switches(network, voltage_level_id)?,
            nodes: backend.node_breaker_view_nodes(network, voltage_level_id)?,
        })
    }

    /// Switches of the voltage level, with their connection status.
    pub fn switches(&self) -> &Table {
        &self.switches
    }

    /// Nodes of the voltage level, with their connected network element
    /// (if any).
    pub fn nodes(&self) -> &Table {
        &self.nodes
    }

    /// Internal connections of the voltage level, with the nodes they
    /// connect.
    pub fn internal_connections(&self) -> &Table {
        &self.internal_connections
    }

    /// Typed rows of the nodes table; an empty connectable id means the
    /// node has no attached element.
    pub fn node_list(&self) -> GridResult<Vec<TopologyNode>> {
        let nodes = self.nodes.int_index()?;
        let connectables = self.nodes.str_column("connectable_id")?;
        Ok(nodes
            .into_iter()
            .zip(connectables)
            .map(|(node, connectable_id)| TopologyNode {
                node,
                connectable_id: (!connectable_id.is_empty())
                    .then(|| connectable_id.to_string()),
            })
            .collect())
    }

    /// The topology as an undirected graph: one vertex per node, one edge
    /// per switch plus one per internal connection (endpoint columns
    /// `node1`/`node2` in both tables).
    pub fn create_graph(&self) -> GridResult<UnGraph<i64, TopologyEdge>> {
        let vertices = self.nodes.int_index()?;
        let mut edges = switch_edges(&self.switches, |t| {
            Ok((t.int_column("node1")?, t.int_column("node2")?))
        })?;
        let ic_from = self.internal_connections.int_column("node1")?;
        let ic_to = self.internal_connections.int_column("node2")?;
        edges.extend(
            ic_from
                .into_iter()
                .zip(ic_to)
                .map(|(a, b)| (a, b, TopologyEdge::InternalConnection)),
        );
        graph_from_edges(vertices, edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertices_only_from_vertex_table() {
        // An isolated bus stays a vertex; nothing is auto-created from edges.
        let graph =
            graph_from_edges::<String>(vec!["A".into(), "B".into(), "ISOLATED".into()], vec![])
                .unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_duplicate_edges_kept() {
        let edge = |open| TopologyEdge::Switch {
            id: "BR".into(),
            open,
        };
        let graph = graph_from_edges(
            vec![1_i64, 2],
            vec![(1, 2, edge(false)), (1, 2, edge(true))],
        )
        .unwrap();
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_unknown_endpoint_rejected() {
        let err = graph_from_edges(
            vec!["A".to_string()],
            vec![("A".to_string(), "GHOST".to_string(), TopologyEdge::InternalConnection)],
        )
        .unwrap_err();
        assert!(err.to_string().contains("GHOST"));
    }
}
