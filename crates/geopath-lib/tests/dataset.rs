mod common;

use std::fs;

use geopath_lib::{load_graph, load_graph_from_readers, Error, GraphKind};
use tempfile::tempdir;

use common::fixture_tables;

#[test]
fn fixture_tables_load_as_directed_graph() {
    let (nodes, edges) = fixture_tables();
    let graph = load_graph(&nodes, &edges, GraphKind::Directed).expect("fixture loads");

    assert_eq!(graph.node_count(), 9);
    assert_eq!(graph.edge_count(), 11);
    assert_eq!(graph.edge_weight(101, 102), Some(103.8));
    assert_eq!(graph.edge_weight(102, 101), None);
}

#[test]
fn empty_length_cells_become_implicit() {
    let (nodes, edges) = fixture_tables();
    let graph = load_graph(&nodes, &edges, GraphKind::Directed).unwrap();

    let edge = graph.edge_between(102, 107).expect("edge present");
    assert_eq!(edge.length, None);
    let fallback = graph.edge_weight(102, 107).unwrap();
    assert!((fallback - 117.77).abs() < 0.5, "got {fallback}");
}

#[test]
fn header_synonyms_are_accepted() {
    let nodes = "id,Latitude,Longitude\n1,10.0,20.0\n2,10.001,20.0\n";
    let edges = "source,target,length_m\n1,2,\n2,1,115.5\n";
    let graph =
        load_graph_from_readers(nodes.as_bytes(), edges.as_bytes(), GraphKind::Directed).unwrap();

    assert_eq!(graph.edge_between(1, 2).unwrap().length, None);
    assert_eq!(graph.edge_weight(2, 1), Some(115.5));
}

#[test]
fn missing_coordinate_column_is_reported() {
    let nodes = "osmid,y\n1,10.0\n";
    let err = load_graph_from_readers(nodes.as_bytes(), "u,v\n".as_bytes(), GraphKind::Directed)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::MissingColumn {
            table: "nodes",
            column: "longitude"
        }
    ));
}

#[test]
fn out_of_range_coordinates_are_rejected() {
    let nodes = "osmid,y,x\n1,95.0,20.0\n";
    let err = load_graph_from_readers(nodes.as_bytes(), "u,v\n".as_bytes(), GraphKind::Directed)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidCoordinate { .. }));
}

#[test]
fn edges_to_unknown_nodes_are_rejected() {
    let nodes = "osmid,y,x\n1,10.0,20.0\n";
    let edges = "u,v,length\n1,2,10\n";
    let err = load_graph_from_readers(nodes.as_bytes(), edges.as_bytes(), GraphKind::Undirected)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::UnknownEdgeEndpoint { missing: 2, .. }
    ));
}

#[test]
fn unparsable_length_reports_line() {
    let nodes = "osmid,y,x\n1,10.0,20.0\n2,10.0,20.001\n";
    let edges = "u,v,length\n1,2,10\n2,1,far\n";
    let err = load_graph_from_readers(nodes.as_bytes(), edges.as_bytes(), GraphKind::Directed)
        .unwrap_err();
    match err {
        Error::InvalidRecord { table, line, .. } => {
            assert_eq!(table, "edges");
            assert_eq!(line, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_files_surface_io_errors() {
    let dir = tempdir().expect("create temp dir");
    let nodes = dir.path().join("nodes.csv");
    fs::write(&nodes, "osmid,y,x\n").unwrap();

    let err = load_graph(&nodes, &dir.path().join("absent.csv"), GraphKind::Directed).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
