//! Capability interface to a transit data provider.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Alert, Route, Stop, SystemId, TransportationSystem, Vehicle};

/// Read-only access to a provider's systems and their entities.
///
/// Implementations return whatever the provider reports; an empty vector is
/// a valid answer and is interpreted by the caller.
#[async_trait]
pub trait TransitClient: Send + Sync {
    async fn list_systems(&self) -> Result<Vec<TransportationSystem>>;

    async fn get_routes(&self, system: &SystemId) -> Result<Vec<Route>>;

    async fn get_stops(&self, system: &SystemId) -> Result<Vec<Stop>>;

    async fn get_alerts(&self, system: &SystemId) -> Result<Vec<Alert>>;

    async fn get_vehicles(&self, system: &SystemId) -> Result<Vec<Vehicle>>;

    /// Stops served by `route`, in the order the system lists them.
    async fn get_route_stops(&self, system: &SystemId, route: &Route) -> Result<Vec<Stop>> {
        let key = route.stop_key();
        let stops = self.get_stops(system).await?;
        Ok(stops.into_iter().filter(|stop| stop.serves(key)).collect())
    }
}
