//! Route command handler for computing paths between nodes.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use geopath_lib::{plan_route, NodeId, RouteAlgorithm, RouteRequest, RouteSummary, SearchLimits};

use geopath_cli::output::{render_no_route, render_route, OutputFormat};

use crate::GraphArgs;

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting node identifier.
    pub from: NodeId,
    /// Destination node identifier.
    pub to: NodeId,
    /// Algorithm to use when planning the route.
    pub algorithm: RouteAlgorithm,
    /// Search time budget in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Maximum number of node expansions.
    pub max_expansions: Option<usize>,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        let limits = SearchLimits {
            deadline: self
                .timeout_ms
                .map(|ms| Instant::now() + Duration::from_millis(ms)),
            cancellation: None,
            max_expansions: self.max_expansions,
        };
        RouteRequest::a_star(self.from, self.to)
            .with_algorithm(self.algorithm)
            .with_limits(limits)
    }
}

/// Handle the route subcommand.
pub fn handle_route_command(
    graph_args: &GraphArgs,
    args: &RouteCommandArgs,
    format: OutputFormat,
) -> Result<()> {
    let graph = super::load(graph_args)?;
    let request = args.to_request();

    let plan = plan_route(&graph, &request)
        .with_context(|| format!("failed to plan route from {} to {}", args.from, args.to))?;

    let rendered = match plan {
        Some(plan) => {
            let summary = RouteSummary::from_plan(&graph, &plan)?;
            render_route(&summary, format)?
        }
        None => render_no_route(args.from, args.to, format)?,
    };
    print!("{rendered}");
    Ok(())
}
