mod commands;

use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use freightpath_cli::args::{InputArgs, SearchArgs};
use freightpath_cli::output::{print_footer, print_logo, OutputFormat};

use crate::commands::check::handle_check_command;
use crate::commands::consolidate::handle_consolidate_command;
use crate::commands::route::{handle_route_command, RouteCommandArgs};

#[derive(Parser, Debug)]
#[command(author, version, about = "Delivery route search and truck load consolidation")]
struct Cli {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    search: SearchArgs,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Suppress the banner.
    #[arg(long, global = true)]
    no_logo: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the input files and verify the graph is connected.
    Check,
    /// Compute a route between two nodes.
    Route {
        /// Starting node.
        #[arg(long = "from")]
        from: String,
        /// Destination node.
        #[arg(long = "to")]
        to: String,
    },
    /// Route every package from the depot and group routes into truck loads.
    Consolidate,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    let started = Instant::now();

    if cli.format.is_decorated() && !cli.no_logo {
        print_logo();
    }

    match run(&cli) {
        Ok(()) => {
            if cli.format.is_decorated() {
                print_footer(started.elapsed());
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Check => handle_check_command(&cli.input, cli.format),
        Command::Route { from, to } => handle_route_command(
            &cli.input,
            &cli.search,
            cli.format,
            &RouteCommandArgs {
                from: from.clone(),
                to: to.clone(),
            },
        ),
        Command::Consolidate => handle_consolidate_command(&cli.input, &cli.search, cli.format),
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
