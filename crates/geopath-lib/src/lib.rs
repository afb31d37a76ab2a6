//! geopath library entry points.
//!
//! This crate exposes the road-network graph model, the haversine distance
//! oracle, and the A* pathfinder built on top of them, together with helpers
//! to load a graph from CSV tables and summarise a planned route. Higher-level
//! consumers (the CLI, map renderers) should only depend on the functions
//! exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod dataset;
pub mod error;
pub mod geo;
pub mod graph;
pub mod output;
pub mod path;
pub mod routing;

pub use dataset::{load_graph, load_graph_from_readers};
pub use error::{Error, Result};
pub use geo::{haversine_distance, GeoPoint, EARTH_RADIUS_METERS};
pub use graph::{Edge, Graph, GraphBuilder, GraphKind, Node, NodeId};
pub use output::{RouteEndpoint, RouteRenderMode, RouteStep, RouteSummary};
pub use path::{
    find_path, find_path_dijkstra, find_path_dijkstra_with, find_path_with, CancellationToken,
    SearchLimits,
};
pub use routing::{plan_route, RouteAlgorithm, RoutePlan, RouteRequest};
