//! Name → id catalog of transportation systems.
//!
//! The catalog is built once at startup and shared read-only afterwards.
//! It can come from the provider's system listing or from a JSON file, which
//! is either an object mapping display names to ids or an array of
//! `{"name": ..., "id": ...}` entries. Ids may be strings or numbers.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{SystemId, TransportationSystem};
use crate::resolve::{Resolution, Resolver};

/// One catalog row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub id: SystemId,
}

/// Immutable lookup table of known system names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemCatalog {
    entries: Vec<CatalogEntry>,
}

impl SystemCatalog {
    /// Build a catalog from `(name, id)` pairs.
    ///
    /// Order is preserved. When a name repeats, the first id wins.
    pub fn from_entries<I, N, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: Into<SystemId>,
    {
        let mut seen = HashSet::new();
        let mut rows = Vec::new();
        for (name, id) in entries {
            let name = name.into();
            if seen.insert(name.clone()) {
                rows.push(CatalogEntry {
                    name,
                    id: id.into(),
                });
            } else {
                debug!(name = %name, "duplicate catalog name ignored");
            }
        }
        Self { entries: rows }
    }

    /// Build a catalog from a provider system listing.
    pub fn from_systems(systems: &[TransportationSystem]) -> Self {
        Self::from_entries(
            systems
                .iter()
                .filter(|system| !system.name.trim().is_empty())
                .map(|system| (system.name.clone(), system.id.clone())),
        )
    }

    /// Load a catalog from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&contents).map_err(|message| Error::InvalidCatalog {
            path: path.to_path_buf(),
            message,
        })?;
        info!(
            "Loaded {} systems from catalog {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    fn from_json_str(contents: &str) -> std::result::Result<Self, String> {
        let value: Value = serde_json::from_str(contents).map_err(|e| e.to_string())?;
        let pairs = match value {
            Value::Object(map) => map
                .into_iter()
                .map(|(name, id)| Ok((name, id_from_value(&id)?)))
                .collect::<std::result::Result<Vec<_>, String>>()?,
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    let name = item
                        .get("name")
                        .and_then(Value::as_str)
                        .ok_or_else(|| "catalog entry is missing a string 'name'".to_string())?;
                    let id = item
                        .get("id")
                        .ok_or_else(|| format!("catalog entry '{}' is missing 'id'", name))?;
                    Ok((name.to_string(), id_from_value(id)?))
                })
                .collect::<std::result::Result<Vec<_>, String>>()?,
            _ => return Err("expected a JSON object or array".to_string()),
        };
        Ok(Self::from_entries(pairs))
    }

    /// Serialize as a JSON array that [`SystemCatalog::load_json`] accepts.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Exact-name lookup.
    pub fn id_of(&self, name: &str) -> Option<&SystemId> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.id)
    }

    /// Fuzzy lookup of a system by display name.
    pub fn resolve(&self, resolver: &Resolver, query: &str) -> Resolution<&CatalogEntry> {
        resolver.resolve(
            query,
            self.entries
                .iter()
                .map(|entry| (entry.name.as_str(), entry)),
        )
    }
}

fn id_from_value(value: &Value) -> std::result::Result<SystemId, String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Ok(SystemId::new(s.trim())),
        Value::Number(n) => Ok(SystemId::new(n.to_string())),
        other => Err(format!("invalid system id {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SystemCatalog {
        SystemCatalog::from_entries([
            ("University of Arkansas", "1068"),
            ("Georgia Tech", "1083"),
            ("Georgia State University", "480"),
        ])
    }

    #[test]
    fn duplicate_names_keep_first_id() {
        let catalog = SystemCatalog::from_entries([("Loop", "1"), ("Loop", "2"), ("Other", "3")]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.id_of("Loop"), Some(&SystemId::new("1")));
    }

    #[test]
    fn resolve_finds_near_miss() {
        let catalog = sample();
        let entry = catalog
            .resolve(&Resolver::default(), "Georgia Tec")
            .into_item()
            .expect("match");
        assert_eq!(entry.id.as_str(), "1083");
    }

    #[test]
    fn empty_catalog_never_matches() {
        let catalog = SystemCatalog::default();
        assert!(catalog.is_empty());
        assert_eq!(
            catalog.resolve(&Resolver::new(0.0), "anything"),
            Resolution::NoMatch
        );
    }

    #[test]
    fn parses_object_with_numeric_ids() {
        let catalog =
            SystemCatalog::from_json_str(r#"{"Georgia Tech": 1083, "Chapel Hill": "3"}"#).unwrap();
        assert_eq!(catalog.id_of("Georgia Tech"), Some(&SystemId::new("1083")));
        assert_eq!(catalog.id_of("Chapel Hill"), Some(&SystemId::new("3")));
    }

    #[test]
    fn parses_array_and_keeps_order() {
        let catalog = SystemCatalog::from_json_str(
            r#"[{"name": "Zeta", "id": 2}, {"name": "Alpha", "id": "1"}]"#,
        )
        .unwrap();
        let names: Vec<_> = catalog.names().collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn parses_object_and_keeps_file_order() {
        let catalog =
            SystemCatalog::from_json_str(r#"{"Zeta Loop": 1, "Alpha Loop": 2}"#).unwrap();
        let names: Vec<_> = catalog.names().collect();
        assert_eq!(names, vec!["Zeta Loop", "Alpha Loop"]);

        // Both names score the same for "Loop"; the earlier entry wins.
        let entry = catalog
            .resolve(&Resolver::new(0.0), "Loop")
            .into_item()
            .expect("match");
        assert_eq!(entry.name, "Zeta Loop");
    }

    #[test]
    fn rejects_bad_ids() {
        let err = SystemCatalog::from_json_str(r#"{"Broken": null}"#).unwrap_err();
        assert!(err.contains("invalid system id"));
        assert!(SystemCatalog::from_json_str("42").is_err());
    }

    #[test]
    fn round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let catalog = sample();
        fs::write(&path, catalog.to_json_string().unwrap()).unwrap();
        assert_eq!(SystemCatalog::load_json(&path).unwrap(), catalog);
    }

    #[test]
    fn invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, "not json").unwrap();
        let err = SystemCatalog::load_json(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidCatalog { .. }));
        assert!(err.to_string().contains("catalog.json"));
    }
}
