//! Output formatting for command results.

use std::fmt::Write;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use geopath_lib::{NodeId, RouteRenderMode, RouteSummary};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Header plus one line per step.
    #[default]
    Text,
    /// Node identifiers joined by arrows.
    Compact,
    /// Pretty-printed JSON.
    Json,
}

/// Render a found route.
pub fn render_route(summary: &RouteSummary, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(summary.render(RouteRenderMode::Plain)),
        OutputFormat::Compact => Ok(summary.render(RouteRenderMode::Compact)),
        OutputFormat::Json => to_json(summary),
    }
}

#[derive(Debug, Serialize)]
struct NoRoute {
    start: NodeId,
    goal: NodeId,
    found: bool,
}

/// Render the outcome of a search whose goal was unreachable.
pub fn render_no_route(start: NodeId, goal: NodeId, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text | OutputFormat::Compact => {
            Ok(format!("No path found between {start} and {goal}.\n"))
        }
        OutputFormat::Json => to_json(&NoRoute {
            start,
            goal,
            found: false,
        }),
    }
}

/// Result of snapping a coordinate to the closest node.
#[derive(Debug, Serialize)]
pub struct NearestNode {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
    pub distance_m: f64,
}

pub fn render_nearest(nearest: &NearestNode, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(nearest),
        OutputFormat::Compact => Ok(format!("{}\n", nearest.id)),
        OutputFormat::Text => Ok(format!(
            "Nearest node: {} ({:.6}, {:.6}), {:.1} m away\n",
            nearest.id, nearest.lat, nearest.lon, nearest.distance_m
        )),
    }
}

/// Size and weighting facts about a loaded graph.
#[derive(Debug, Serialize)]
pub struct GraphInfo {
    pub kind: &'static str,
    pub nodes: usize,
    pub edges: usize,
    pub implicit_lengths: bool,
}

pub fn render_info(info: &GraphInfo, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(info);
    }
    let mut buffer = String::new();
    let _ = writeln!(buffer, "Graph: {}", info.kind);
    let _ = writeln!(buffer, "Nodes: {}", info.nodes);
    let _ = writeln!(buffer, "Edges: {}", info.edges);
    if info.implicit_lengths {
        let _ = writeln!(
            buffer,
            "Some edges lack a recorded length; A* routes are approximate."
        );
    }
    Ok(buffer)
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}
