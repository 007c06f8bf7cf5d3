//! Check command handler: load input and run the connectivity gate.

use anyhow::{Context, Result};
use serde::Serialize;

use freightpath_lib::ensure_connected;

use freightpath_cli::args::InputArgs;
use freightpath_cli::output::{emit_json, OutputFormat};
use freightpath_cli::terminal::{format_with_separators, ColorPalette};

#[derive(Debug, Serialize)]
struct CheckReport {
    connected: bool,
    nodes: usize,
    edges: usize,
    package_types: usize,
    packages: usize,
    capacity: u64,
}

/// Handle the check subcommand.
pub fn handle_check_command(input: &InputArgs, format: OutputFormat) -> Result<()> {
    let data = super::load(input)?;
    ensure_connected(&data.graph).context("connectivity check failed")?;

    let report = CheckReport {
        connected: true,
        nodes: data.graph.node_count(),
        edges: data.graph.edge_count(),
        package_types: data.manifest.package_type_count(),
        packages: data.manifest.packages().len(),
        capacity: data.manifest.truck_capacity(),
    };

    if format == OutputFormat::Json {
        return emit_json(&report);
    }

    let palette = ColorPalette::detect();
    println!("{}", palette.emphasize("Graph is connected"));
    println!(
        "  nodes: {}, edges: {}",
        format_with_separators(report.nodes as u64),
        format_with_separators(report.edges as u64)
    );
    println!(
        "  packages: {} across {} types, truck capacity {}",
        format_with_separators(report.packages as u64),
        report.package_types,
        format_with_separators(report.capacity)
    );
    Ok(())
}
