//! Transit records returned to callers.
//!
//! Every record serializes a fixed list of fields. The id of the owning
//! transportation system is kept in memory as `system_id` but is never
//! serialized, so responses carry no back-reference to their system.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Opaque identifier of a transportation system.
    SystemId
);
string_id!(
    /// Opaque identifier of a route within a system.
    RouteId
);
string_id!(
    /// Opaque identifier of a stop within a system.
    StopId
);

/// The kinds of entity the provider exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    System,
    Route,
    Stop,
    Alert,
    Vehicle,
}

impl EntityKind {
    /// Singular label used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::System => "transportation system",
            EntityKind::Route => "route",
            EntityKind::Stop => "stop",
            EntityKind::Alert => "alert",
            EntityKind::Vehicle => "vehicle",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            EntityKind::System => "transportation systems",
            EntityKind::Route => "routes",
            EntityKind::Stop => "stops",
            EntityKind::Alert => "alerts",
            EntityKind::Vehicle => "vehicles",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A record with a display name that callers may refer to.
pub trait Named {
    const KIND: EntityKind;

    fn name(&self) -> &str;
}

/// A transit operator as listed by the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransportationSystem {
    pub id: SystemId,
    pub name: String,
    pub username: Option<String>,
    pub agency_name: Option<String>,
    pub email: Option<String>,
    pub homepage: Option<String>,
    pub logo: bool,
    pub color: Option<String>,
}

impl TransportationSystem {
    pub fn new(id: impl Into<SystemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Named for TransportationSystem {
    const KIND: EntityKind = EntityKind::System;

    fn name(&self) -> &str {
        &self.name
    }
}

/// A named path served by vehicles within a system.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Route {
    pub id: RouteId,
    /// Key the provider uses for this route in stop listings.
    pub my_id: Option<RouteId>,
    pub name: String,
    pub short_name: Option<String>,
    pub group_id: Option<String>,
    pub group_color: Option<String>,
    pub color: Option<String>,
    pub distance: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timezone: Option<String>,
    pub service_time: Option<String>,
    pub archived: bool,
    #[serde(skip_serializing)]
    pub system_id: SystemId,
}

impl Route {
    pub fn new(id: impl Into<RouteId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Key under which stop listings reference this route.
    pub fn stop_key(&self) -> &RouteId {
        self.my_id.as_ref().unwrap_or(&self.id)
    }
}

impl Named for Route {
    const KIND: EntityKind = EntityKind::Route;

    fn name(&self) -> &str {
        &self.name
    }
}

/// A named waypoint on one or more routes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius: Option<f64>,
    /// Position of this stop along each route that serves it.
    pub routes_and_positions: BTreeMap<RouteId, Vec<i64>>,
    #[serde(skip_serializing)]
    pub system_id: SystemId,
}

impl Stop {
    pub fn new(id: impl Into<StopId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn serves(&self, route: &RouteId) -> bool {
        self.routes_and_positions.contains_key(route)
    }
}

impl Named for Stop {
    const KIND: EntityKind = EntityKind::Stop;

    fn name(&self) -> &str {
        &self.name
    }
}

/// A service alert published by a system.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Alert {
    pub id: String,
    pub route_id: Option<RouteId>,
    pub name: String,
    pub html: Option<String>,
    pub important: bool,
    pub archived: bool,
    pub created: Option<String>,
    pub updated: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub author: Option<String>,
    #[serde(skip_serializing)]
    pub system_id: SystemId,
}

impl Alert {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Named for Alert {
    const KIND: EntityKind = EntityKind::Alert;

    fn name(&self) -> &str {
        &self.name
    }
}

/// A vehicle currently reported by a system.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Vehicle {
    pub id: String,
    pub name: String,
    pub vehicle_type: Option<String>,
    pub route_id: Option<RouteId>,
    pub route_name: Option<String>,
    pub color: Option<String>,
    pub created: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub speed: Option<f64>,
    pub calculated_course: Option<f64>,
    pub pax_load: Option<f64>,
    pub out_of_service: bool,
    pub trip_id: Option<String>,
    #[serde(skip_serializing)]
    pub system_id: SystemId,
}

impl Vehicle {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Named for Vehicle {
    const KIND: EntityKind = EntityKind::Vehicle;

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn keys(value: &Value) -> Vec<String> {
        let mut keys: Vec<String> = value
            .as_object()
            .expect("record serializes as an object")
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    #[test]
    fn records_never_serialize_owning_system() {
        let owner = SystemId::new("1068");
        let mut route = Route::new("1", "Tech Trolley");
        route.system_id = owner.clone();
        let mut stop = Stop::new("10", "Student Center");
        stop.system_id = owner.clone();
        let mut alert = Alert::new("5", "Detour");
        alert.system_id = owner.clone();
        let mut vehicle = Vehicle::new("7", "Bus 7");
        vehicle.system_id = owner;

        for value in [
            serde_json::to_value(&route).unwrap(),
            serde_json::to_value(&stop).unwrap(),
            serde_json::to_value(&alert).unwrap(),
            serde_json::to_value(&vehicle).unwrap(),
        ] {
            let keys = keys(&value);
            assert!(keys.iter().all(|k| !k.contains("system")), "{keys:?}");
            assert!(!value.to_string().contains("1068"));
        }
    }

    #[test]
    fn route_serializes_explicit_fields() {
        let value = serde_json::to_value(Route::new("3", "Red Route")).unwrap();
        assert_eq!(value["id"], "3");
        assert_eq!(value["name"], "Red Route");
        assert_eq!(
            keys(&value),
            vec![
                "archived",
                "color",
                "distance",
                "group_color",
                "group_id",
                "id",
                "latitude",
                "longitude",
                "my_id",
                "name",
                "service_time",
                "short_name",
                "timezone",
            ]
        );
    }

    #[test]
    fn stop_key_prefers_my_id() {
        let mut route = Route::new("3", "Red Route");
        assert_eq!(route.stop_key().as_str(), "3");
        route.my_id = Some(RouteId::new("42"));
        assert_eq!(route.stop_key().as_str(), "42");
    }

    #[test]
    fn stop_serves_listed_routes() {
        let mut stop = Stop::new("10", "Student Center");
        stop.routes_and_positions.insert(RouteId::new("42"), vec![3]);
        assert!(stop.serves(&RouteId::new("42")));
        assert!(!stop.serves(&RouteId::new("3")));
    }
}
