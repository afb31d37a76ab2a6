use anyhow::Result;

use geopath_lib::GraphKind;

use geopath_cli::output::{render_info, GraphInfo, OutputFormat};

use crate::GraphArgs;

pub fn handle_info_command(graph_args: &GraphArgs, format: OutputFormat) -> Result<()> {
    let graph = super::load(graph_args)?;
    let info = GraphInfo {
        kind: match graph.kind() {
            GraphKind::Directed => "directed",
            GraphKind::Undirected => "undirected",
        },
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        implicit_lengths: graph.has_implicit_lengths(),
    };
    print!("{}", render_info(&info, format)?);
    Ok(())
}
