//! Route command handler for computing a path between two nodes.

use anyhow::{Context, Result};

use freightpath_lib::{ensure_connected, RouteSearcher, RouteSummary};

use freightpath_cli::args::{InputArgs, SearchArgs};
use freightpath_cli::output::{emit_route, OutputFormat};

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting node identifier.
    pub from: String,
    /// Destination node identifier.
    pub to: String,
}

/// Handle the route subcommand.
pub fn handle_route_command(
    input: &InputArgs,
    search: &SearchArgs,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let data = super::load(input)?;
    ensure_connected(&data.graph).context("connectivity check failed")?;

    let options = search.search_options();
    let outcome = RouteSearcher::with_options(&data.graph, options)
        .search(&args.from, &args.to)
        .with_context(|| format!("failed to route from {} to {}", args.from, args.to))?;

    let summary = RouteSummary::from_outcome(&data.graph, options.mode, &outcome)?;
    emit_route(&summary, format)
}
