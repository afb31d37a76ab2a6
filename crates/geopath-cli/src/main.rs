use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use geopath_cli::output::OutputFormat;
use geopath_lib::{GraphKind, NodeId, RouteAlgorithm};

mod commands;

#[derive(Parser, Debug)]
#[command(author, version, about = "Shortest paths over geographic road networks")]
struct Cli {
    /// Output format for command results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

/// Location of the node and edge tables describing the road network.
#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    /// CSV file with one row per node (id, latitude, longitude).
    #[arg(long, env = "GEOPATH_NODES")]
    pub nodes: PathBuf,
    /// CSV file with one row per edge (source, target, optional length).
    #[arg(long, env = "GEOPATH_EDGES")]
    pub edges: PathBuf,
    /// Treat every edge as traversable in both directions.
    #[arg(long)]
    pub undirected: bool,
}

impl GraphArgs {
    pub fn kind(&self) -> GraphKind {
        if self.undirected {
            GraphKind::Undirected
        } else {
            GraphKind::Directed
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a route between two node identifiers.
    Route {
        #[command(flatten)]
        graph: GraphArgs,
        /// Starting node identifier.
        #[arg(long = "from", allow_hyphen_values = true)]
        from: NodeId,
        /// Destination node identifier.
        #[arg(long = "to", allow_hyphen_values = true)]
        to: NodeId,
        /// Algorithm to use (a-star or dijkstra).
        #[arg(long, default_value_t = RouteAlgorithm::AStar)]
        algorithm: RouteAlgorithm,
        /// Abort the search after this many milliseconds.
        #[arg(long)]
        timeout_ms: Option<u64>,
        /// Abort the search after expanding this many nodes.
        #[arg(long)]
        max_expansions: Option<usize>,
    },
    /// Find the node closest to a coordinate.
    Nearest {
        #[command(flatten)]
        graph: GraphArgs,
        /// Latitude in degrees.
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in degrees.
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
    /// Report the size of the road network.
    Info {
        #[command(flatten)]
        graph: GraphArgs,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Route {
            graph,
            from,
            to,
            algorithm,
            timeout_ms,
            max_expansions,
        } => commands::route::handle_route_command(
            &graph,
            &commands::route::RouteCommandArgs {
                from,
                to,
                algorithm,
                timeout_ms,
                max_expansions,
            },
            cli.format,
        ),
        Command::Nearest { graph, lat, lon } => {
            commands::nearest::handle_nearest_command(&graph, lat, lon, cli.format)
        }
        Command::Info { graph } => commands::info::handle_info_command(&graph, cli.format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
