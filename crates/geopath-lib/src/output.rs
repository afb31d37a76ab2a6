use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::routing::{RouteAlgorithm, RoutePlan};

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteRenderMode {
    /// Header line followed by one line per step.
    #[default]
    Plain,
    /// Node identifiers joined by arrows on a single line.
    Compact,
}

/// Endpoint within a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteEndpoint {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
}

/// Step taken during traversal of a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
    /// Length of the edge that led to this step; absent for the first step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_length_m: Option<f64>,
}

/// Structured representation of a planned route that presentation layers
/// (map renderers, spreadsheet writers, JSON consumers) can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub algorithm: RouteAlgorithm,
    pub hops: usize,
    pub total_length_m: f64,
    pub approximate: bool,
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a summary with resolved coordinates.
    pub fn from_plan(graph: &Graph, plan: &RoutePlan) -> Result<Self> {
        let mut steps = Vec::with_capacity(plan.steps.len());
        let mut previous: Option<NodeId> = None;
        for (index, &id) in plan.steps.iter().enumerate() {
            let position = graph.position(id).ok_or(Error::NodeNotFound { id })?;
            steps.push(RouteStep {
                index,
                id,
                lat: position.lat(),
                lon: position.lon(),
                segment_length_m: previous.and_then(|prev| graph.edge_weight(prev, id)),
            });
            previous = Some(id);
        }

        let (Some(first), Some(last)) = (steps.first(), steps.last()) else {
            return Err(Error::EmptyRoutePlan);
        };
        let start = RouteEndpoint {
            id: first.id,
            lat: first.lat,
            lon: first.lon,
        };
        let goal = RouteEndpoint {
            id: last.id,
            lat: last.lat,
            lon: last.lon,
        };

        Ok(Self {
            algorithm: plan.algorithm,
            hops: plan.hop_count(),
            total_length_m: plan.total_length,
            approximate: plan.approximate,
            start,
            goal,
            steps,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::Plain => self.render_plain(),
            RouteRenderMode::Compact => self.render_compact(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops, {:.1} m, algorithm: {}{})",
            self.start.id,
            self.goal.id,
            self.hops,
            self.total_length_m,
            self.algorithm,
            if self.approximate { ", approximate" } else { "" }
        );
        for step in &self.steps {
            let _ = write!(
                buffer,
                "{:>3}: {} ({:.6}, {:.6})",
                step.index, step.id, step.lat, step.lon
            );
            match step.segment_length_m {
                Some(length) => {
                    let _ = writeln!(buffer, " +{length:.1} m");
                }
                None => buffer.push('\n'),
            }
        }
        buffer
    }

    fn render_compact(&self) -> String {
        let joined = self
            .steps
            .iter()
            .map(|step| step.id.to_string())
            .collect::<Vec<_>>()
            .join(" → ");
        format!("{joined}\n")
    }
}
