//! PassioGo library entry points.
//!
//! This crate resolves approximate, human-typed names of transit systems,
//! routes and stops to the identifiers the PassioGo provider expects, and
//! exposes the lookups the MCP server and CLI offer. Higher-level consumers
//! should only depend on the items exported here instead of reimplementing
//! behavior.
//!

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod facade;
pub mod models;
pub mod passio;
pub mod resolve;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_helpers;

pub use catalog::{CatalogEntry, SystemCatalog};
pub use client::TransitClient;
pub use config::PassioConfig;
pub use error::{Error, Result};
pub use facade::{load_catalog, TransitTools};
pub use models::{
    Alert, EntityKind, Named, Route, RouteId, Stop, StopId, SystemId, TransportationSystem,
    Vehicle,
};
pub use passio::PassioClient;
pub use resolve::{similarity, Resolution, Resolver, DEFAULT_MIN_SCORE};
