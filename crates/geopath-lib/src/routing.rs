use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::path::{find_path_dijkstra_with, find_path_with, SearchLimits};

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// A* search guided by great-circle distance.
    #[default]
    #[serde(rename = "a-star")]
    AStar,
    /// Dijkstra's algorithm (no heuristic).
    Dijkstra,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::AStar => "a-star",
            RouteAlgorithm::Dijkstra => "dijkstra",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteAlgorithm {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "a-star" | "astar" | "a_star" => Ok(RouteAlgorithm::AStar),
            "dijkstra" => Ok(RouteAlgorithm::Dijkstra),
            other => Err(format!("unknown routing algorithm: {other}")),
        }
    }
}

/// High-level route planning request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub start: NodeId,
    pub goal: NodeId,
    pub algorithm: RouteAlgorithm,
    pub limits: SearchLimits,
}

impl RouteRequest {
    /// Convenience constructor for unbounded A* routes.
    pub fn a_star(start: NodeId, goal: NodeId) -> Self {
        Self {
            start,
            goal,
            algorithm: RouteAlgorithm::AStar,
            limits: SearchLimits::default(),
        }
    }

    pub fn with_algorithm(mut self, algorithm: RouteAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    pub start: NodeId,
    pub goal: NodeId,
    pub steps: Vec<NodeId>,
    /// Sum of edge weights along `steps`, in metres.
    pub total_length: f64,
    /// Set when A* ran over edges without recorded length, so the route may
    /// be slightly longer than the true shortest path.
    pub approximate: bool,
}

impl RoutePlan {
    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Compute a route using the requested algorithm and limits.
///
/// `Ok(None)` means the goal cannot be reached from the start.
pub fn plan_route(graph: &Graph, request: &RouteRequest) -> Result<Option<RoutePlan>> {
    let found = match request.algorithm {
        RouteAlgorithm::AStar => {
            find_path_with(graph, request.start, request.goal, &request.limits)?
        }
        RouteAlgorithm::Dijkstra => {
            find_path_dijkstra_with(graph, request.start, request.goal, &request.limits)?
        }
    };
    let Some(steps) = found else {
        return Ok(None);
    };
    let total_length = graph
        .path_length(&steps)
        .ok_or(Error::DisconnectedRoute {
            start: request.start,
            goal: request.goal,
        })?;
    Ok(Some(RoutePlan {
        algorithm: request.algorithm,
        start: request.start,
        goal: request.goal,
        steps,
        total_length,
        approximate: request.algorithm == RouteAlgorithm::AStar && graph.has_implicit_lengths(),
    }))
}
