//! Consolidate command handler: route every package and group the routes
//! into truck loads.

use anyhow::{Context, Result};

use freightpath_lib::{plan_deliveries, ConsolidationSummary};

use freightpath_cli::args::{InputArgs, SearchArgs};
use freightpath_cli::output::{emit_consolidation, OutputFormat};

/// Handle the consolidate subcommand.
pub fn handle_consolidate_command(
    input: &InputArgs,
    search: &SearchArgs,
    format: OutputFormat,
) -> Result<()> {
    let data = super::load(input)?;
    let options = search.consolidation_options();

    let consolidation = plan_deliveries(&data.graph, &data.manifest, &options)
        .context("failed to consolidate deliveries")?;
    let summary = ConsolidationSummary::from_consolidation(&data.graph, &consolidation)?;

    emit_consolidation(&summary, format)
}
