// Module exports for CLI subcommands
//
// Each module handles a specific CLI subcommand. main.rs dispatches to these
// handlers, keeping the entry point focused on parsing and coordination.

pub mod check;
pub mod consolidate;
pub mod route;

use anyhow::{Context, Result};

use freightpath_lib::{load_input, DeliveryInput};

use freightpath_cli::args::InputArgs;

/// Load every input file named by `args`.
pub(crate) fn load(args: &InputArgs) -> Result<DeliveryInput> {
    let paths = args.resolve();
    load_input(&paths).with_context(|| {
        format!(
            "failed to load delivery input (nodes: {})",
            paths.nodes.display()
        )
    })
}
