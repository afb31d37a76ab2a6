//! Loading road-network graphs from node and edge CSV tables.
//!
//! The expected layout matches what map exporters typically write for a
//! routable network: a nodes table keyed by node id with `y`/`x` (latitude
//! and longitude) columns, and an edges table with `u`/`v` endpoints and an
//! optional `length` column in metres. Common header synonyms are accepted.

use std::fs;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::info;

use crate::error::{Error, Result};
use crate::geo::GeoPoint;
use crate::graph::{Graph, GraphBuilder, GraphKind, NodeId};

const NODES_TABLE: &str = "nodes";
const EDGES_TABLE: &str = "edges";

const NODE_ID_HEADERS: &[&str] = &["osmid", "id", "node", "node_id"];
const LATITUDE_HEADERS: &[&str] = &["y", "lat", "latitude"];
const LONGITUDE_HEADERS: &[&str] = &["x", "lon", "lng", "longitude"];
const SOURCE_HEADERS: &[&str] = &["u", "from", "source"];
const TARGET_HEADERS: &[&str] = &["v", "to", "target"];
const LENGTH_HEADERS: &[&str] = &["length", "length_m", "distance"];

/// Load a graph from a nodes CSV file and an edges CSV file.
pub fn load_graph(nodes_path: &Path, edges_path: &Path, kind: GraphKind) -> Result<Graph> {
    let nodes = fs::File::open(nodes_path)?;
    let edges = fs::File::open(edges_path)?;
    let graph = load_graph_from_readers(nodes, edges, kind)?;
    info!(
        nodes_path = %nodes_path.display(),
        edges_path = %edges_path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded road network"
    );
    Ok(graph)
}

/// Load a graph from in-memory or streamed CSV tables.
pub fn load_graph_from_readers<N: Read, E: Read>(
    nodes: N,
    edges: E,
    kind: GraphKind,
) -> Result<Graph> {
    let mut builder = Graph::builder(kind);
    read_nodes(nodes, &mut builder)?;
    read_edges(edges, &mut builder)?;
    Ok(builder.build())
}

fn read_nodes<R: Read>(reader: R, builder: &mut GraphBuilder) -> Result<()> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::Fields).from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let id_col = require_column(&headers, NODES_TABLE, "id", NODE_ID_HEADERS)?;
    let lat_col = require_column(&headers, NODES_TABLE, "latitude", LATITUDE_HEADERS)?;
    let lon_col = require_column(&headers, NODES_TABLE, "longitude", LONGITUDE_HEADERS)?;

    for record in csv_reader.records() {
        let record = record?;
        let line = line_of(&record);
        let id = parse_field::<NodeId>(&record, id_col, NODES_TABLE, line)?;
        let lat = parse_field::<f64>(&record, lat_col, NODES_TABLE, line)?;
        let lon = parse_field::<f64>(&record, lon_col, NODES_TABLE, line)?;
        builder.add_node(id, GeoPoint::new(lat, lon)?)?;
    }
    Ok(())
}

fn read_edges<R: Read>(reader: R, builder: &mut GraphBuilder) -> Result<()> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::Fields).from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let source_col = require_column(&headers, EDGES_TABLE, "source", SOURCE_HEADERS)?;
    let target_col = require_column(&headers, EDGES_TABLE, "target", TARGET_HEADERS)?;
    let length_col = find_column(&headers, LENGTH_HEADERS);

    for record in csv_reader.records() {
        let record = record?;
        let line = line_of(&record);
        let source = parse_field::<NodeId>(&record, source_col, EDGES_TABLE, line)?;
        let target = parse_field::<NodeId>(&record, target_col, EDGES_TABLE, line)?;
        let length = match length_col {
            Some(col) if !field(&record, col).is_empty() => {
                Some(parse_field::<f64>(&record, col, EDGES_TABLE, line)?)
            }
            _ => None,
        };
        builder.add_edge(source, target, length)?;
    }
    Ok(())
}

fn normalize(header: &str) -> String {
    header
        .to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

fn find_column(headers: &StringRecord, synonyms: &[&str]) -> Option<usize> {
    let normalized: Vec<String> = headers.iter().map(normalize).collect();
    synonyms
        .iter()
        .find_map(|alt| normalized.iter().position(|header| header == alt))
}

fn require_column(
    headers: &StringRecord,
    table: &'static str,
    column: &'static str,
    synonyms: &[&str],
) -> Result<usize> {
    find_column(headers, synonyms).ok_or(Error::MissingColumn { table, column })
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|pos| pos.line()).unwrap_or_default()
}

fn field(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or_default()
}

fn parse_field<T>(record: &StringRecord, index: usize, table: &'static str, line: u64) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = field(record, index);
    raw.parse::<T>().map_err(|err| Error::InvalidRecord {
        table,
        line,
        message: format!("column {}: {err} ({raw:?})", index + 1),
    })
}
