//! Tool subcommands: the seven MCP lookups, run once from the shell.

use anyhow::{Context, Result};
use clap::Subcommand;
use passio_lib::TransitTools;

use crate::output::{emit, render_list, render_one};
use crate::terminal::ColorPalette;
use crate::GlobalOptions;

#[derive(Subcommand, Debug, Clone)]
pub enum LookupCommand {
    /// List all routes of a transportation system.
    Routes {
        /// Transportation system name (approximate names are matched).
        system: String,
    },
    /// Show one route of a transportation system.
    Route {
        /// Transportation system name.
        system: String,
        /// Route name within the system.
        route: String,
    },
    /// List all stops of a transportation system.
    Stops {
        /// Transportation system name.
        system: String,
    },
    /// Show one stop of a transportation system.
    Stop {
        /// Transportation system name.
        system: String,
        /// Stop name within the system.
        stop: String,
    },
    /// List the stops served by one route.
    RouteStops {
        /// Transportation system name.
        system: String,
        /// Route name within the system.
        route: String,
    },
    /// List the current alerts of a transportation system.
    Alerts {
        /// Transportation system name.
        system: String,
    },
    /// List the vehicles a transportation system reports.
    Vehicles {
        /// Transportation system name.
        system: String,
    },
}

/// Handle one of the lookup subcommands.
pub async fn handle_lookup(global: &GlobalOptions, command: &LookupCommand) -> Result<()> {
    let config = global.config()?;
    let tools = TransitTools::connect(&config)
        .await
        .context("failed to load the transportation system catalog")?;
    let rendered = run(&tools, command, global, &ColorPalette::detect()).await?;
    emit(&rendered)
}

async fn run(
    tools: &TransitTools,
    command: &LookupCommand,
    global: &GlobalOptions,
    palette: &ColorPalette,
) -> Result<String> {
    let format = global.format;
    match command {
        LookupCommand::Routes { system } => {
            render_list(&tools.routes_for_system(system).await?, format, palette)
        }
        LookupCommand::Route { system, route } => {
            render_one(&tools.route_for_system(system, route).await?, format, palette)
        }
        LookupCommand::Stops { system } => {
            render_list(&tools.stops_for_system(system).await?, format, palette)
        }
        LookupCommand::Stop { system, stop } => {
            render_one(&tools.stop_for_system(stop, system).await?, format, palette)
        }
        LookupCommand::RouteStops { system, route } => {
            render_list(&tools.stops_for_route(route, system).await?, format, palette)
        }
        LookupCommand::Alerts { system } => {
            render_list(&tools.alerts_for_system(system).await?, format, palette)
        }
        LookupCommand::Vehicles { system } => {
            render_list(&tools.vehicles_for_system(system).await?, format, palette)
        }
    }
}
