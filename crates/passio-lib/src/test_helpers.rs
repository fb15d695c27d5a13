// Test-only helpers for `passio-lib` consumers

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::catalog::SystemCatalog;
use crate::client::TransitClient;
use crate::error::{Error, Result};
use crate::models::{Alert, Route, RouteId, Stop, SystemId, TransportationSystem, Vehicle};

/// In-memory [`TransitClient`] with canned responses.
#[derive(Debug, Default)]
pub struct StaticClient {
    systems: Vec<TransportationSystem>,
    routes: HashMap<SystemId, Vec<Route>>,
    stops: HashMap<SystemId, Vec<Stop>>,
    alerts: HashMap<SystemId, Vec<Alert>>,
    vehicles: HashMap<SystemId, Vec<Vehicle>>,
    delay: Option<Duration>,
    failure: Option<String>,
    calls: AtomicUsize,
}

impl StaticClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn system(mut self, id: &str, name: &str) -> Self {
        self.systems.push(TransportationSystem::new(id, name));
        self
    }

    pub fn route(mut self, system: &str, id: &str, name: &str) -> Self {
        let mut route = Route::new(id, name);
        route.system_id = SystemId::new(system);
        self.routes.entry(SystemId::new(system)).or_default().push(route);
        self
    }

    /// Add a stop served by `routes`, positioned in listing order.
    pub fn stop(mut self, system: &str, id: &str, name: &str, routes: &[&str]) -> Self {
        let mut stop = Stop::new(id, name);
        stop.system_id = SystemId::new(system);
        let existing = self.stops.get(&SystemId::new(system)).map_or(0, Vec::len);
        for route in routes {
            let position = existing as i64 + 1;
            stop.routes_and_positions.insert(RouteId::new(*route), vec![position]);
        }
        self.stops.entry(SystemId::new(system)).or_default().push(stop);
        self
    }

    pub fn alert(mut self, system: &str, id: &str, name: &str) -> Self {
        let mut alert = Alert::new(id, name);
        alert.system_id = SystemId::new(system);
        self.alerts.entry(SystemId::new(system)).or_default().push(alert);
        self
    }

    pub fn vehicle(mut self, system: &str, id: &str, name: &str) -> Self {
        let mut vehicle = Vehicle::new(id, name);
        vehicle.system_id = SystemId::new(system);
        self.vehicles
            .entry(SystemId::new(system))
            .or_default()
            .push(vehicle);
        self
    }

    /// Sleep before every answer.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fail every call with an upstream error.
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    /// Number of fetches served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Catalog built from the configured systems.
    pub fn catalog(&self) -> SystemCatalog {
        SystemCatalog::from_systems(&self.systems)
    }

    async fn answer<T: Clone>(
        &self,
        operation: &str,
        table: &HashMap<SystemId, Vec<T>>,
        system: &SystemId,
    ) -> Result<Vec<T>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = &self.failure {
            return Err(Error::Upstream {
                operation: operation.to_string(),
                message: message.clone(),
            });
        }
        Ok(table.get(system).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl TransitClient for StaticClient {
    async fn list_systems(&self) -> Result<Vec<TransportationSystem>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.failure {
            return Err(Error::Upstream {
                operation: "getSystems".to_string(),
                message: message.clone(),
            });
        }
        Ok(self.systems.clone())
    }

    async fn get_routes(&self, system: &SystemId) -> Result<Vec<Route>> {
        self.answer("getRoutes", &self.routes, system).await
    }

    async fn get_stops(&self, system: &SystemId) -> Result<Vec<Stop>> {
        self.answer("getStops", &self.stops, system).await
    }

    async fn get_alerts(&self, system: &SystemId) -> Result<Vec<Alert>> {
        self.answer("getAlertMessages", &self.alerts, system).await
    }

    async fn get_vehicles(&self, system: &SystemId) -> Result<Vec<Vehicle>> {
        self.answer("getBuses", &self.vehicles, system).await
    }
}

/// Fixture with two populated systems and two systems without entities.
pub fn campus_client() -> StaticClient {
    StaticClient::new()
        .system("1068", "University of Arkansas")
        .system("1083", "Georgia Tech")
        .system("480", "Georgia State University")
        .system("3", "Chapel Hill Transit")
        .route("1068", "21", "Route 21")
        .route("1068", "26", "Route 26")
        .route("1068", "40", "Blue Line")
        .stop("1068", "100", "Student Union", &["21", "26"])
        .stop("1068", "101", "Mullins Library", &["21"])
        .stop("1068", "102", "Razorback Stadium", &["40"])
        .alert("1068", "9", "Detour on Dickson Street")
        .vehicle("1068", "77", "Bus 77")
        .route("1083", "1", "Tech Trolley")
        .route("1083", "2", "Red Route")
        .stop("1083", "200", "Tech Square", &["1"])
        .stop("1083", "201", "North Avenue Apartments", &["2"])
        .vehicle("1083", "5", "Trolley 5")
}
