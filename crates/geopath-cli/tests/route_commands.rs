use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures")
        .join(name)
        .canonicalize()
        .expect("fixture table present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("geopath");
    cmd.env("RUST_LOG", "error")
        .env_remove("GEOPATH_NODES")
        .env_remove("GEOPATH_EDGES");
    cmd
}

fn route_command() -> Command {
    let mut cmd = cli();
    cmd.arg("route")
        .arg("--nodes")
        .arg(fixture("road_nodes.csv"))
        .arg("--edges")
        .arg(fixture("road_edges.csv"))
        .arg("--undirected");
    cmd
}

#[test]
fn compact_format_prints_arrow_joined_path() {
    let mut cmd = route_command();
    cmd.args(["--from", "101", "--to", "106", "--format", "compact"]);

    cmd.assert()
        .success()
        .stdout("101 → 103 → 105 → 106\n");
}

#[test]
fn text_format_reports_hops_and_approximation() {
    let mut cmd = route_command();
    cmd.args(["--from", "101", "--to", "106"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Route: 101 -> 106 (3 hops, 375.0 m"))
        .stdout(predicate::str::contains("algorithm: a-star, approximate"));
}

#[test]
fn dijkstra_algorithm_is_supported() {
    let mut cmd = route_command();
    cmd.args(["--from", "104", "--to", "105", "--algorithm", "dijkstra"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("algorithm: dijkstra)"));
}

#[test]
fn json_format_outputs_structured_summary() {
    let mut cmd = route_command();
    cmd.args(["--from", "101", "--to", "106", "--format", "json"]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid json");
    assert_eq!(value["hops"], 3);
    assert_eq!(value["approximate"], true);
    let ids: Vec<_> = value["steps"]
        .as_array()
        .expect("steps array")
        .iter()
        .map(|step| step["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![101, 103, 105, 106]);
}

#[test]
fn unreachable_goal_is_reported_without_failing() {
    let mut cmd = route_command();
    cmd.args(["--from", "101", "--to", "202"]);

    cmd.assert()
        .success()
        .stdout("No path found between 101 and 202.\n");
}

#[test]
fn unknown_node_fails_with_message() {
    let mut cmd = route_command();
    cmd.args(["--from", "999", "--to", "106"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("node 999 not found in graph"));
}

#[test]
fn expansion_limit_aborts_route() {
    let mut cmd = route_command();
    cmd.args(["--from", "101", "--to", "106", "--max-expansions", "1"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("expansion limit"));
}

#[test]
fn generous_timeout_still_finds_route() {
    let mut cmd = route_command();
    cmd.args([
        "--from", "101", "--to", "106", "--timeout-ms", "60000", "--format", "compact",
    ]);

    cmd.assert()
        .success()
        .stdout("101 → 103 → 105 → 106\n");
}

#[test]
fn zero_timeout_reports_deadline() {
    let mut cmd = route_command();
    cmd.args(["--from", "101", "--to", "106", "--timeout-ms", "0"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("search deadline exceeded"));
}

#[test]
fn non_numeric_timeout_is_rejected() {
    let mut cmd = route_command();
    cmd.args(["--from", "101", "--to", "106", "--timeout-ms", "soon"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--timeout-ms"));
}

#[test]
fn directed_graph_respects_edge_direction() {
    let mut cmd = cli();
    cmd.arg("route")
        .arg("--nodes")
        .arg(fixture("road_nodes.csv"))
        .arg("--edges")
        .arg(fixture("road_edges.csv"))
        .args(["--from", "106", "--to", "101", "--format", "compact"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("No path found"));
}

#[test]
fn tables_can_come_from_environment() {
    let mut cmd = cli();
    cmd.env("GEOPATH_NODES", fixture("road_nodes.csv"))
        .env("GEOPATH_EDGES", fixture("road_edges.csv"))
        .args(["--format", "compact", "route", "--undirected", "--from", "104", "--to", "105"]);

    cmd.assert().success().stdout("104 → 103 → 105\n");
}

#[test]
fn nearest_snaps_coordinate_to_node() {
    let mut cmd = cli();
    cmd.arg("nearest")
        .arg("--nodes")
        .arg(fixture("road_nodes.csv"))
        .arg("--edges")
        .arg(fixture("road_edges.csv"))
        .args(["--lat", "20.98702", "--lon", "105.85195", "--format", "compact"]);

    cmd.assert().success().stdout("106\n");
}

#[test]
fn nearest_rejects_invalid_coordinate() {
    let mut cmd = cli();
    cmd.arg("nearest")
        .arg("--nodes")
        .arg(fixture("road_nodes.csv"))
        .arg("--edges")
        .arg(fixture("road_edges.csv"))
        .args(["--lat", "123.0", "--lon", "0.0"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid coordinate"));
}

#[test]
fn info_reports_graph_size() {
    let mut cmd = cli();
    cmd.arg("info")
        .arg("--nodes")
        .arg(fixture("road_nodes.csv"))
        .arg("--edges")
        .arg(fixture("road_edges.csv"))
        .arg("--undirected");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Graph: undirected"))
        .stdout(predicate::str::contains("Nodes: 9"))
        .stdout(predicate::str::contains("Edges: 22"))
        .stdout(predicate::str::contains("approximate"));
}

#[test]
fn malformed_tables_fail_with_context() {
    let temp_dir = tempdir().expect("create temp dir");
    let nodes = temp_dir.path().join("nodes.csv");
    let edges = temp_dir.path().join("edges.csv");
    fs::write(&nodes, "osmid,y\n1,20.0\n").expect("write nodes");
    fs::write(&edges, "u,v\n").expect("write edges");

    let mut cmd = cli();
    cmd.arg("info").arg("--nodes").arg(&nodes).arg("--edges").arg(&edges);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to load road network"))
        .stderr(predicate::str::contains("missing a longitude column"));
}
