//! Topology-view integration tests against the in-memory fixture backend.

use gridlink_engine::test_utils::StaticBackend;
use gridlink_engine::{Column, Table};
use gridlink_network::{Network, TopologyEdge};
use petgraph::graph::UnGraph;
use std::sync::Arc;

fn small_grid() -> Network {
    let (backend, handle) = StaticBackend::small_grid();
    Network::new(Arc::new(backend), handle)
}

fn vertex<K: PartialEq>(graph: &UnGraph<K, TopologyEdge>, key: K) -> petgraph::graph::NodeIndex {
    graph
        .node_indices()
        .find(|&i| graph[i] == key)
        .expect("vertex present")
}

#[test]
fn bus_breaker_graph_has_one_vertex_per_bus_and_one_edge_per_switch() {
    let network = small_grid();
    let topology = network.bus_breaker_topology("VLGEN").unwrap();
    let graph = topology.create_graph().unwrap();

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);

    let (a, b, c) = (
        vertex(&graph, "A".to_string()),
        vertex(&graph, "B".to_string()),
        vertex(&graph, "C".to_string()),
    );
    assert!(graph.find_edge(a, b).is_some());
    assert!(graph.find_edge(b, c).is_some());
    assert!(graph.find_edge(a, c).is_none());
}

#[test]
fn bus_breaker_edges_carry_switch_status() {
    let network = small_grid();
    let graph = network
        .bus_breaker_topology("VLGEN")
        .unwrap()
        .create_graph()
        .unwrap();

    let mut switches: Vec<_> = graph
        .edge_weights()
        .map(|w| match w {
            TopologyEdge::Switch { id, open } => (id.as_str(), *open),
            TopologyEdge::InternalConnection => panic!("no internal connections in bus-breaker"),
        })
        .collect();
    switches.sort();
    assert_eq!(switches, [("BR1", false), ("BR2", true)]);
}

#[test]
fn node_breaker_graph_includes_internal_connections() {
    let network = small_grid();
    let topology = network.node_breaker_topology("VL380").unwrap();
    let graph = topology.create_graph().unwrap();

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);

    let (n1, n2, n3) = (
        vertex(&graph, 1_i64),
        vertex(&graph, 2_i64),
        vertex(&graph, 3_i64),
    );
    let switch_edge = graph.find_edge(n1, n2).expect("switch edge");
    assert!(matches!(graph[switch_edge], TopologyEdge::Switch { .. }));
    let ic_edge = graph.find_edge(n2, n3).expect("internal connection edge");
    assert_eq!(graph[ic_edge], TopologyEdge::InternalConnection);
}

#[test]
fn raw_tables_are_exposed() {
    let network = small_grid();
    let topology = network.bus_breaker_topology("VLGEN").unwrap();
    assert_eq!(topology.buses().len(), 3);
    assert_eq!(topology.switches().len(), 2);
    assert_eq!(
        topology.elements().str_column("bus_id").unwrap(),
        ["A", "C"]
    );

    let node_breaker = network.node_breaker_topology("VL380").unwrap();
    assert_eq!(node_breaker.nodes().len(), 3);
    assert_eq!(node_breaker.internal_connections().len(), 1);
}

#[test]
fn typed_rows_mirror_the_tables() {
    let network = small_grid();

    let elements = network
        .bus_breaker_topology("VLGEN")
        .unwrap()
        .element_list()
        .unwrap();
    assert_eq!(elements.len(), 2);
    assert_eq!(elements[0].id, "GEN");
    assert_eq!(elements[0].element_type, "GENERATOR");
    assert_eq!(elements[0].bus_id, "A");

    let nodes = network
        .node_breaker_topology("VL380")
        .unwrap()
        .node_list()
        .unwrap();
    assert_eq!(nodes.len(), 3);
    assert_eq!(nodes[0].connectable_id.as_deref(), Some("BBS1"));
    assert_eq!(nodes[1].connectable_id, None);
}

#[test]
fn graphs_are_independent_snapshots() {
    let network = small_grid();
    let topology = network.bus_breaker_topology("VLGEN").unwrap();
    let mut first = topology.create_graph().unwrap();
    let second = topology.create_graph().unwrap();

    first.add_node("SCRATCH".to_string());
    assert_eq!(first.node_count(), 4);
    assert_eq!(second.node_count(), 3);
}

#[test]
fn switches_table_missing_endpoint_column_fails_fast() {
    let backend = StaticBackend::new();
    let handle = backend.seed_network();
    backend.seed_bus_breaker(
        handle,
        "BROKEN",
        Table::index_only("elements", Column::str("id", &[])),
        // endpoint column bus2_id missing
        Table::new(
            "switches",
            Column::str("id", &["BR1"]),
            vec![
                Column::bool("open", &[false]),
                Column::str("bus1_id", &["A"]),
            ],
        )
        .unwrap(),
        Table::index_only("buses", Column::str("id", &["A", "B"])),
    );
    let network = Network::new(Arc::new(backend), handle);

    let err = network
        .bus_breaker_topology("BROKEN")
        .unwrap()
        .create_graph()
        .unwrap_err();
    assert!(err.to_string().contains("bus2_id"));
}

#[test]
fn switch_endpoint_outside_vertex_set_is_a_topology_error() {
    let backend = StaticBackend::new();
    let handle = backend.seed_network();
    backend.seed_bus_breaker(
        handle,
        "CORRUPT",
        Table::index_only("elements", Column::str("id", &[])),
        Table::new(
            "switches",
            Column::str("id", &["BR1"]),
            vec![
                Column::bool("open", &[false]),
                Column::str("bus1_id", &["A"]),
                Column::str("bus2_id", &["GHOST"]),
            ],
        )
        .unwrap(),
        Table::index_only("buses", Column::str("id", &["A", "B"])),
    );
    let network = Network::new(Arc::new(backend), handle);

    let err = network
        .bus_breaker_topology("CORRUPT")
        .unwrap()
        .create_graph()
        .unwrap_err();
    assert!(err.to_string().contains("GHOST"));
}

#[test]
fn closed_network_rejects_further_queries() {
    let (backend, handle) = StaticBackend::small_grid();
    let backend = Arc::new(backend);
    let network = Network::new(backend.clone(), handle);
    network.close().unwrap();

    let reopened = Network::new(backend, handle);
    assert!(reopened.bus_breaker_topology("VLGEN").is_err());
}
