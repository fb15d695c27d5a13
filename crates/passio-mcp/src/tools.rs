//! MCP tool implementations for transit lookups
//!
//! This module defines the seven tools exposed by the MCP server:
//! - get_routes_from_transportation_system: All routes of a system
//! - get_route_from_transportation_system: One route of a system by name
//! - get_stops_from_transportation_system: All stops of a system
//! - get_stop_from_transportation_system: One stop of a system by name
//! - get_stops_from_route: Stops served by one route
//! - get_alerts_from_transportation_system: Current alerts of a system
//! - get_vehicles_from_transportation_system: Vehicles reported by a system
//!
//! Handlers validate their input, run the lookup and serialize the records.
//! They know nothing about the protocol; `server` wraps them as MCP tools.

use passio_lib::TransitTools;
use serde::Serialize;
use tracing::info;

use crate::types::*;
use crate::Error;

/// Serialize a tool result as pretty JSON text
fn render<T: Serialize>(value: &T) -> crate::Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::internal(e.to_string()))
}

pub async fn get_routes_from_transportation_system(
    tools: &TransitTools,
    input: SystemInput,
) -> crate::Result<String> {
    input.validate()?;
    info!("Routes for system '{}'", input.transportation_system_name);
    let routes = tools
        .routes_for_system(&input.transportation_system_name)
        .await?;
    render(&routes)
}

pub async fn get_route_from_transportation_system(
    tools: &TransitTools,
    input: RouteInput,
) -> crate::Result<String> {
    input.validate()?;
    info!(
        "Route '{}' in system '{}'",
        input.route_name, input.transportation_system_name
    );
    let route = tools
        .route_for_system(&input.transportation_system_name, &input.route_name)
        .await?;
    render(&route)
}

pub async fn get_stops_from_transportation_system(
    tools: &TransitTools,
    input: SystemInput,
) -> crate::Result<String> {
    input.validate()?;
    info!("Stops for system '{}'", input.transportation_system_name);
    let stops = tools
        .stops_for_system(&input.transportation_system_name)
        .await?;
    render(&stops)
}

pub async fn get_stop_from_transportation_system(
    tools: &TransitTools,
    input: StopInput,
) -> crate::Result<String> {
    input.validate()?;
    info!(
        "Stop '{}' in system '{}'",
        input.stop_name, input.transportation_system_name
    );
    let stop = tools
        .stop_for_system(&input.stop_name, &input.transportation_system_name)
        .await?;
    render(&stop)
}

pub async fn get_stops_from_route(
    tools: &TransitTools,
    input: RouteStopsInput,
) -> crate::Result<String> {
    input.validate()?;
    info!(
        "Stops for route '{}' in system '{}'",
        input.route_name, input.transportation_system_name
    );
    let stops = tools
        .stops_for_route(&input.route_name, &input.transportation_system_name)
        .await?;
    render(&stops)
}

pub async fn get_alerts_from_transportation_system(
    tools: &TransitTools,
    input: SystemInput,
) -> crate::Result<String> {
    input.validate()?;
    info!("Alerts for system '{}'", input.transportation_system_name);
    let alerts = tools
        .alerts_for_system(&input.transportation_system_name)
        .await?;
    render(&alerts)
}

pub async fn get_vehicles_from_transportation_system(
    tools: &TransitTools,
    input: SystemInput,
) -> crate::Result<String> {
    input.validate()?;
    info!("Vehicles for system '{}'", input.transportation_system_name);
    let vehicles = tools
        .vehicles_for_system(&input.transportation_system_name)
        .await?;
    render(&vehicles)
}
