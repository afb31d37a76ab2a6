//! Nearest command handler for snapping a coordinate to the network.

use anyhow::{anyhow, Result};

use geopath_lib::GeoPoint;

use geopath_cli::output::{render_nearest, NearestNode, OutputFormat};

use crate::GraphArgs;

pub fn handle_nearest_command(
    graph_args: &GraphArgs,
    lat: f64,
    lon: f64,
    format: OutputFormat,
) -> Result<()> {
    let point = GeoPoint::new(lat, lon)?;
    let graph = super::load(graph_args)?;

    let (id, distance_m) = graph
        .nearest_node(&point)
        .ok_or_else(|| anyhow!("road network contains no nodes"))?;
    let position = graph.position(id).unwrap_or(point);

    let nearest = NearestNode {
        id,
        lat: position.lat(),
        lon: position.lon(),
        distance_m,
    };
    print!("{}", render_nearest(&nearest, format)?);
    Ok(())
}
