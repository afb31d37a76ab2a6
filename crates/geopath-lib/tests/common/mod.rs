//! Common test utilities and fixture helpers.
//!
//! Provides the checked-in CSV road network, a hand-built square graph, and a
//! seeded generator for small random graphs used by the optimality tests.
#![allow(dead_code)]

use std::path::PathBuf;

use geopath_lib::{load_graph, GeoPoint, Graph, GraphKind, NodeId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Path to fixtures directory used by tests.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Paths to the node and edge tables of the fixture road network.
pub fn fixture_tables() -> (PathBuf, PathBuf) {
    let dir = fixtures_dir();
    (dir.join("road_nodes.csv"), dir.join("road_edges.csv"))
}

/// Load the fixture road network as an undirected graph.
pub fn fixture_graph() -> Graph {
    let (nodes, edges) = fixture_tables();
    load_graph(&nodes, &edges, GraphKind::Undirected).expect("fixture graph loads")
}

pub const A: NodeId = 1;
pub const B: NodeId = 2;
pub const C: NodeId = 3;
pub const D: NodeId = 4;

/// Square A(0,0) B(0,1) C(1,1) D(1,0) with unit sides and a 1.5 diagonal A-C.
pub fn square_graph() -> Graph {
    let mut builder = Graph::builder(GraphKind::Undirected);
    for (id, lat, lon) in [(A, 0.0, 0.0), (B, 0.0, 1.0), (C, 1.0, 1.0), (D, 1.0, 0.0)] {
        builder
            .add_node(id, GeoPoint::new(lat, lon).unwrap())
            .unwrap();
    }
    for (from, to, length) in [(A, B, 1.0), (B, C, 1.0), (C, D, 1.0), (D, A, 1.0), (A, C, 1.5)] {
        builder.add_edge(from, to, Some(length)).unwrap();
    }
    builder.build()
}

/// Random directed graph whose edge lengths are never shorter than the
/// straight-line distance between their endpoints, so A* stays exact.
///
/// Returns the graph with its edge list for brute-force checks.
pub fn random_graph(seed: u64, nodes: usize, edges: usize) -> (Graph, Vec<(NodeId, NodeId, f64)>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = Graph::builder(GraphKind::Directed);
    let mut positions = Vec::with_capacity(nodes);
    for id in 0..nodes {
        let point = GeoPoint::new(
            20.98 + rng.random::<f64>() * 0.02,
            105.84 + rng.random::<f64>() * 0.02,
        )
        .unwrap();
        builder.add_node(id as NodeId, point).unwrap();
        positions.push(point);
    }

    let mut edge_list = Vec::with_capacity(edges);
    for _ in 0..edges {
        let from = rng.random_range(0..nodes);
        let to = rng.random_range(0..nodes);
        let straight = positions[from].distance_to(&positions[to]);
        let length = straight * (1.0 + rng.random::<f64>());
        builder
            .add_edge(from as NodeId, to as NodeId, Some(length))
            .unwrap();
        edge_list.push((from as NodeId, to as NodeId, length));
    }
    (builder.build(), edge_list)
}
