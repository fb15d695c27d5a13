use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use passio_cli::commands::lookup::{handle_lookup, LookupCommand};
use passio_cli::commands::mcp::run_mcp_server;
use passio_cli::commands::resolve::handle_resolve;
use passio_cli::commands::systems::handle_systems;
use passio_cli::{configure_tracing, GlobalOptions};

#[derive(Parser, Debug)]
#[command(author, version, about = "PassioGo transit lookups and MCP server")]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the transit tools over stdio using the Model Context Protocol.
    Mcp,
    /// List the transportation systems, or export them as a catalog file.
    Systems {
        /// Write the catalog as JSON to this path instead of printing it.
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Show which transportation system a name resolves to.
    Resolve {
        /// Approximate system name.
        query: String,
    },
    #[command(flatten)]
    Lookup(LookupCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    configure_tracing(cli.global.log_level.as_deref())?;

    match &cli.command {
        Command::Mcp => run_mcp_server(&cli.global).await,
        Command::Systems { output } => handle_systems(&cli.global, output.as_deref()).await,
        Command::Resolve { query } => handle_resolve(&cli.global, query).await,
        Command::Lookup(command) => handle_lookup(&cli.global, command).await,
    }
}
