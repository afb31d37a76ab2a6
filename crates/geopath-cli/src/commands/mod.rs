// Module exports for CLI subcommands
//
// Each module handles one subcommand; main.rs only parses arguments and
// dispatches here.

pub mod info;
pub mod nearest;
pub mod route;

use anyhow::{Context, Result};
use tracing::debug;

use geopath_lib::{load_graph, Graph};

use crate::GraphArgs;

/// Load the graph named by the shared `--nodes`/`--edges` arguments.
pub fn load(args: &GraphArgs) -> Result<Graph> {
    debug!(kind = ?args.kind(), "loading graph tables");
    load_graph(&args.nodes, &args.edges, args.kind()).with_context(|| {
        format!(
            "failed to load road network from {} and {}",
            args.nodes.display(),
            args.edges.display()
        )
    })
}
