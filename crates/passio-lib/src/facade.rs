//! Tool operations over a [`TransitClient`].
//!
//! Every operation follows one of two shapes:
//!
//! - **single key**: resolve the system name, fetch one collection for the
//!   system, fail if it is empty;
//! - **two keys**: resolve the system name, fetch the system's routes or
//!   stops, then resolve a second name within them.
//!
//! Each call is independent. The catalog is shared read-only and every
//! upstream fetch is bounded by the configured timeout.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::catalog::{CatalogEntry, SystemCatalog};
use crate::client::TransitClient;
use crate::config::{PassioConfig, DEFAULT_TIMEOUT};
use crate::error::{Error, Result};
use crate::models::{Alert, EntityKind, Named, Route, Stop, Vehicle};
use crate::passio::PassioClient;
use crate::resolve::Resolver;

/// Number of "Did you mean" hints attached to not-found errors.
const SUGGESTION_LIMIT: usize = 3;

/// The transit lookups exposed to callers.
#[derive(Clone)]
pub struct TransitTools {
    client: Arc<dyn TransitClient>,
    catalog: Arc<SystemCatalog>,
    resolver: Resolver,
    timeout: Duration,
}

impl TransitTools {
    pub fn new(client: Arc<dyn TransitClient>, catalog: Arc<SystemCatalog>) -> Self {
        Self {
            client,
            catalog,
            resolver: Resolver::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Build with the similarity floor and timeout from `config`.
    pub fn from_config(
        client: Arc<dyn TransitClient>,
        catalog: Arc<SystemCatalog>,
        config: &PassioConfig,
    ) -> Self {
        Self::new(client, catalog)
            .with_resolver(Resolver::new(config.min_score))
            .with_timeout(config.timeout)
    }

    /// Connect to PassioGo and load the system catalog.
    pub async fn connect(config: &PassioConfig) -> Result<Self> {
        let client: Arc<dyn TransitClient> = Arc::new(PassioClient::new(config)?);
        let catalog = load_catalog(client.as_ref(), config).await?;
        Ok(Self::from_config(client, Arc::new(catalog), config))
    }

    pub fn with_resolver(mut self, resolver: Resolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn catalog(&self) -> &SystemCatalog {
        &self.catalog
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// All routes of a system.
    pub async fn routes_for_system(&self, system_name: &str) -> Result<Vec<Route>> {
        let system = self.resolve_system(system_name)?;
        self.system_collection(system, "getRoutes", self.client.get_routes(&system.id))
            .await
    }

    /// The route of a system whose name best matches `route_name`.
    pub async fn route_for_system(&self, system_name: &str, route_name: &str) -> Result<Route> {
        let system = self.resolve_system(system_name)?;
        let routes = self
            .bounded("getRoutes", self.client.get_routes(&system.id))
            .await?;
        self.pick(route_name, routes)
    }

    /// All stops of a system.
    pub async fn stops_for_system(&self, system_name: &str) -> Result<Vec<Stop>> {
        let system = self.resolve_system(system_name)?;
        self.system_collection(system, "getStops", self.client.get_stops(&system.id))
            .await
    }

    /// The stop of a system whose name best matches `stop_name`.
    pub async fn stop_for_system(&self, stop_name: &str, system_name: &str) -> Result<Stop> {
        let system = self.resolve_system(system_name)?;
        let stops = self
            .bounded("getStops", self.client.get_stops(&system.id))
            .await?;
        self.pick(stop_name, stops)
    }

    /// Stops served by the route whose name best matches `route_name`.
    pub async fn stops_for_route(&self, route_name: &str, system_name: &str) -> Result<Vec<Stop>> {
        let system = self.resolve_system(system_name)?;
        let routes = self
            .bounded("getRoutes", self.client.get_routes(&system.id))
            .await?;
        let route = self.pick(route_name, routes)?;

        let stops = self
            .bounded(
                "getStops",
                self.client.get_route_stops(&system.id, &route),
            )
            .await?;
        if stops.is_empty() {
            return Err(Error::not_found("stops for route", route_name));
        }
        Ok(stops)
    }

    /// Current alerts of a system.
    pub async fn alerts_for_system(&self, system_name: &str) -> Result<Vec<Alert>> {
        let system = self.resolve_system(system_name)?;
        self.system_collection(
            system,
            "getAlertMessages",
            self.client.get_alerts(&system.id),
        )
        .await
    }

    /// Vehicles currently reported by a system.
    pub async fn vehicles_for_system(&self, system_name: &str) -> Result<Vec<Vehicle>> {
        let system = self.resolve_system(system_name)?;
        self.system_collection(system, "getBuses", self.client.get_vehicles(&system.id))
            .await
    }

    /// Resolve a system name against the catalog.
    pub fn resolve_system(&self, system_name: &str) -> Result<&CatalogEntry> {
        self.catalog
            .resolve(&self.resolver, system_name)
            .into_item()
            .ok_or_else(|| Error::NotFound {
                kind: EntityKind::System.label().to_string(),
                query: system_name.to_string(),
                suggestions: self.resolver.suggest(
                    system_name,
                    self.catalog.names(),
                    SUGGESTION_LIMIT,
                ),
            })
    }

    /// Fetch a system-scoped collection, treating an empty answer as not found.
    async fn system_collection<T, F>(
        &self,
        system: &CatalogEntry,
        operation: &str,
        fetch: F,
    ) -> Result<Vec<T>>
    where
        T: Named,
        F: Future<Output = Result<Vec<T>>>,
    {
        let items = self.bounded(operation, fetch).await?;
        if items.is_empty() {
            return Err(Error::not_found(
                format!("{} for system", T::KIND.plural()),
                system.id.as_str(),
            ));
        }
        debug!(
            "{} returned {} {} for {} ({})",
            operation,
            items.len(),
            T::KIND.plural(),
            system.name,
            system.id
        );
        Ok(items)
    }

    /// Resolve `query` within `items` and take the match out of the list.
    fn pick<T: Named>(&self, query: &str, mut items: Vec<T>) -> Result<T> {
        let index = self
            .resolver
            .resolve(
                query,
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| (item.name(), index)),
            )
            .into_item();

        match index {
            Some(index) => Ok(items.swap_remove(index)),
            None => Err(Error::NotFound {
                kind: T::KIND.label().to_string(),
                query: query.to_string(),
                suggestions: self.resolver.suggest(
                    query,
                    items.iter().map(Named::name),
                    SUGGESTION_LIMIT,
                ),
            }),
        }
    }

    /// Await an upstream fetch under the configured timeout.
    async fn bounded<T, F>(&self, operation: &str, fetch: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match tokio::time::timeout(self.timeout, fetch).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => {
                warn!("upstream {} failed: {}", operation, err);
                Err(err)
            }
            Err(_) => {
                warn!("upstream {} timed out after {:?}", operation, self.timeout);
                Err(Error::Timeout {
                    operation: operation.to_string(),
                    after: self.timeout,
                })
            }
        }
    }
}

/// Load the system catalog named by `config`.
///
/// A catalog file wins when one is configured; otherwise the provider's
/// system listing is fetched once under the configured timeout.
pub async fn load_catalog(client: &dyn TransitClient, config: &PassioConfig) -> Result<SystemCatalog> {
    if let Some(path) = &config.catalog_path {
        info!("Loading system catalog from {}", path.display());
        return SystemCatalog::load_json(path);
    }

    let systems = match tokio::time::timeout(config.timeout, client.list_systems()).await {
        Ok(systems) => systems?,
        Err(_) => {
            return Err(Error::Timeout {
                operation: "getSystems".to_string(),
                after: config.timeout,
            })
        }
    };
    let catalog = SystemCatalog::from_systems(&systems);
    info!("Loaded {} transportation systems", catalog.len());
    Ok(catalog)
}
