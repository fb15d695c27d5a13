//! HTTP client for the PassioGo API.
//!
//! PassioGo answers with loosely typed JSON: ids arrive as strings or
//! numbers, flags as booleans, integers or strings, and empty collections
//! as `null`, `[]` or `{}`. Responses are decoded into [`serde_json::Value`]
//! first and then mapped field by field onto the crate's records.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::client::TransitClient;
use crate::config::PassioConfig;
use crate::error::{Error, Result};
use crate::models::{Alert, Route, RouteId, Stop, StopId, SystemId, TransportationSystem, Vehicle};

const SYSTEMS_PATH: &str = "mapGetData.php?getSystems=2&appVersion=2&sortMode=1&credentials=1";
const ROUTES_PATH: &str = "mapGetData.php?getRoutes=2";
const STOPS_PATH: &str = "mapGetData.php?getStops=2";
const ALERTS_PATH: &str = "goServices.php?getAlertMessages=1";
const VEHICLES_PATH: &str = "mapGetData.php?getBuses=2";

/// Key PassioGo uses for a placeholder entry in vehicle listings.
const PLACEHOLDER_VEHICLE: &str = "-1";

/// [`TransitClient`] backed by the public PassioGo endpoints.
#[derive(Debug, Clone)]
pub struct PassioClient {
    http: Client,
    base_url: String,
}

impl PassioClient {
    pub fn new(config: &PassioConfig) -> Result<Self> {
        let http = Client::builder().user_agent(&config.user_agent).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get(&self, operation: &str, path: &str) -> Result<Value> {
        let url = self.url(path);
        debug!("GET {} ({})", url, operation);
        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()?;
        let body: Value = response.json().await?;
        check_payload(operation, body)
    }

    async fn post(&self, operation: &str, path: &str, body: Value) -> Result<Value> {
        let url = self.url(path);
        debug!("POST {} ({}) json={}", url, operation, body);
        let response = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .form(&[("json", body.to_string())])
            .send()
            .await?
            .error_for_status()?;
        let body: Value = response.json().await?;
        check_payload(operation, body)
    }
}

#[async_trait]
impl TransitClient for PassioClient {
    async fn list_systems(&self) -> Result<Vec<TransportationSystem>> {
        let body = self.get("getSystems", SYSTEMS_PATH).await?;
        Ok(parse_systems(&body))
    }

    async fn get_routes(&self, system: &SystemId) -> Result<Vec<Route>> {
        let body = self
            .post(
                "getRoutes",
                ROUTES_PATH,
                json!({ "systemSelected0": system.as_str(), "amount": 1 }),
            )
            .await?;
        Ok(parse_routes(&body, system))
    }

    async fn get_stops(&self, system: &SystemId) -> Result<Vec<Stop>> {
        let body = self
            .post(
                "getStops",
                STOPS_PATH,
                json!({ "s0": system.as_str(), "sA": 1 }),
            )
            .await?;
        Ok(parse_stops(&body, system))
    }

    async fn get_alerts(&self, system: &SystemId) -> Result<Vec<Alert>> {
        let body = self
            .post(
                "getAlertMessages",
                ALERTS_PATH,
                json!({ "systemSelected0": system.as_str(), "amount": 1, "routesAmount": 0 }),
            )
            .await?;
        Ok(parse_alerts(&body, system))
    }

    async fn get_vehicles(&self, system: &SystemId) -> Result<Vec<Vehicle>> {
        let body = self
            .post(
                "getBuses",
                VEHICLES_PATH,
                json!({ "s0": system.as_str(), "sA": 1 }),
            )
            .await?;
        Ok(parse_vehicles(&body, system))
    }
}

/// Reject payloads that carry an `error` field.
fn check_payload(operation: &str, body: Value) -> Result<Value> {
    if let Some(error) = body.get("error") {
        let message = match error {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        };
        if let Some(message) = message {
            warn!("PassioGo {} returned an error: {}", operation, message);
            return Err(Error::Upstream {
                operation: operation.to_string(),
                message,
            });
        }
    }
    Ok(body)
}

// =============================================================================
// Field helpers
// =============================================================================

fn text(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number(value: &Value, key: &str) -> Option<f64> {
    match value.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn flag(value: &Value, key: &str) -> bool {
    match value.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => matches!(s.trim(), "1" | "true" | "True"),
        _ => false,
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Items of a listing that may be a bare array or wrapped under `key`.
fn listing<'a>(body: &'a Value, key: &str) -> Vec<&'a Value> {
    let inner = match body {
        Value::Array(_) => Some(body),
        _ => body.get(key),
    };
    match inner {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(Value::Object(map)) => map.values().collect(),
        _ => Vec::new(),
    }
}

fn owner(item: &Value, requested: &SystemId) -> SystemId {
    text(item, "userId")
        .map(SystemId::new)
        .unwrap_or_else(|| requested.clone())
}

// =============================================================================
// Response decoding
// =============================================================================

pub(crate) fn parse_systems(body: &Value) -> Vec<TransportationSystem> {
    listing(body, "all")
        .into_iter()
        .filter_map(|item| {
            let Some(id) = text(item, "id") else {
                debug!("skipping system without id");
                return None;
            };
            let name = text(item, "fullname").or_else(|| text(item, "name"))?;
            Some(TransportationSystem {
                id: SystemId::new(id),
                name,
                username: text(item, "username"),
                agency_name: text(item, "goAgencyName"),
                email: text(item, "email"),
                homepage: text(item, "homepage"),
                logo: flag(item, "logo"),
                color: text(item, "goColor"),
            })
        })
        .collect()
}

pub(crate) fn parse_routes(body: &Value, system: &SystemId) -> Vec<Route> {
    listing(body, "all")
        .into_iter()
        .filter_map(|item| {
            let id = text(item, "id")?;
            Some(Route {
                id: RouteId::new(id),
                my_id: text(item, "myid").map(RouteId::new),
                name: text(item, "name").unwrap_or_default(),
                short_name: text(item, "shortName"),
                group_id: text(item, "groupId"),
                group_color: text(item, "groupColor"),
                color: text(item, "color"),
                distance: number(item, "distance"),
                latitude: number(item, "latitude"),
                longitude: number(item, "longitude"),
                timezone: text(item, "timezone"),
                service_time: text(item, "serviceTime"),
                archived: flag(item, "archive"),
                system_id: owner(item, system),
            })
        })
        .collect()
}

pub(crate) fn parse_stops(body: &Value, system: &SystemId) -> Vec<Stop> {
    // routes: { routeId: [name, color, [position, stopId, ...], ...] }
    let mut served: HashMap<String, BTreeMap<RouteId, Vec<i64>>> = HashMap::new();
    if let Some(routes) = body.get("routes").and_then(Value::as_object) {
        for (route_id, entries) in routes {
            let Some(entries) = entries.as_array() else {
                continue;
            };
            for entry in entries {
                let Some(pair) = entry.as_array().filter(|pair| pair.len() >= 2) else {
                    continue;
                };
                let Some(stop_id) = scalar(&pair[1]) else {
                    continue;
                };
                let position = scalar(&pair[0]).and_then(|p| p.parse::<i64>().ok());
                let positions = served
                    .entry(stop_id)
                    .or_default()
                    .entry(RouteId::new(route_id.as_str()))
                    .or_default();
                if let Some(position) = position {
                    positions.push(position);
                }
            }
        }
    }

    listing(body, "stops")
        .into_iter()
        .filter_map(|item| {
            let id = text(item, "id")?;
            let routes_and_positions = served.get(&id).cloned().unwrap_or_default();
            Some(Stop {
                id: StopId::new(id),
                name: text(item, "name").unwrap_or_default(),
                latitude: number(item, "latitude"),
                longitude: number(item, "longitude"),
                radius: number(item, "radius"),
                routes_and_positions,
                system_id: owner(item, system),
            })
        })
        .collect()
}

pub(crate) fn parse_alerts(body: &Value, system: &SystemId) -> Vec<Alert> {
    listing(body, "msgs")
        .into_iter()
        .filter_map(|item| {
            let id = text(item, "id")?;
            Some(Alert {
                id,
                route_id: text(item, "routeId").map(RouteId::new),
                name: text(item, "name").unwrap_or_default(),
                html: text(item, "html"),
                important: flag(item, "important"),
                archived: flag(item, "archive"),
                created: text(item, "created"),
                updated: text(item, "updated"),
                from: text(item, "from"),
                to: text(item, "to"),
                author: text(item, "author"),
                system_id: owner(item, system),
            })
        })
        .collect()
}

pub(crate) fn parse_vehicles(body: &Value, system: &SystemId) -> Vec<Vehicle> {
    let Some(buses) = body.get("buses").and_then(Value::as_object) else {
        return Vec::new();
    };

    buses
        .iter()
        .filter(|(key, _)| key.as_str() != PLACEHOLDER_VEHICLE)
        .filter_map(|(key, entry)| {
            let item = match entry {
                Value::Array(items) => items.first()?,
                other => other,
            };
            let id = text(item, "busId").unwrap_or_else(|| key.clone());
            Some(Vehicle {
                name: text(item, "busName")
                    .or_else(|| text(item, "bus"))
                    .unwrap_or_else(|| id.clone()),
                id,
                vehicle_type: text(item, "busType"),
                route_id: text(item, "routeId").map(RouteId::new),
                route_name: text(item, "route"),
                color: text(item, "color"),
                created: text(item, "created"),
                latitude: number(item, "latitude"),
                longitude: number(item, "longitude"),
                speed: number(item, "speed"),
                calculated_course: number(item, "calculatedCourse"),
                pax_load: number(item, "paxLoad"),
                out_of_service: flag(item, "outOfService"),
                trip_id: text(item, "tripId"),
                system_id: owner(item, system),
            })
        })
        .collect()
}
