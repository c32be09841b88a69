//! Vehicle catalog loading.
//!
//! The inventory view-model never reads data on its own; a [`VehicleSource`]
//! materializes the full collection once at start-up and the result is handed
//! to [`crate::inventory::Inventory`] as an immutable slice. Swapping the JSON
//! file for a remote query means adding another source, nothing else.

use std::collections::HashSet;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::Vehicle;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate vehicle id '{0}'")]
    DuplicateId(String),

    #[error("vehicle '{id}' has an invalid price {price}")]
    InvalidPrice { id: String, price: f64 },
}

/// Supplies the full vehicle collection, in display order.
pub trait VehicleSource {
    fn load(&self) -> Result<Vec<Vehicle>, CatalogError>;
}

/// Reads a JSON array of vehicle records from disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl VehicleSource for JsonFileSource {
    fn load(&self) -> Result<Vec<Vehicle>, CatalogError> {
        tracing::debug!(path = %self.path.display(), "Reading vehicle catalog");
        let content = std::fs::read_to_string(&self.path).map_err(|source| CatalogError::Read {
            path: self.path.clone(),
            source,
        })?;
        let vehicles: Vec<Vehicle> =
            serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
                path: self.path.clone(),
                source,
            })?;

        validate(&vehicles)?;
        tracing::info!(path = %self.path.display(), count = vehicles.len(), "Loaded vehicle catalog");
        Ok(vehicles)
    }
}

/// An already materialized collection (seed data, tests).
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    vehicles: Vec<Vehicle>,
}

impl StaticSource {
    pub fn new(vehicles: Vec<Vehicle>) -> Self {
        Self { vehicles }
    }
}

impl VehicleSource for StaticSource {
    fn load(&self) -> Result<Vec<Vehicle>, CatalogError> {
        validate(&self.vehicles)?;
        Ok(self.vehicles.clone())
    }
}

fn validate(vehicles: &[Vehicle]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(vehicles.len());
    for vehicle in vehicles {
        if !seen.insert(vehicle.id.as_str()) {
            return Err(CatalogError::DuplicateId(vehicle.id.clone()));
        }
        if !vehicle.price.is_finite() || vehicle.price < 0.0 {
            return Err(CatalogError::InvalidPrice {
                id: vehicle.id.clone(),
                price: vehicle.price,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::vehicle;
    use std::io::Write;

    #[test]
    fn loads_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let records = vec![
            vehicle("a", "Toyota", "Corolla", 2020, 18000.0),
            vehicle("b", "Honda", "Civic", 2021, 21000.0),
        ];
        write!(file, "{}", serde_json::to_string(&records).unwrap()).unwrap();

        let loaded = JsonFileSource::new(file.path()).load().unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonFileSource::new(dir.path().join("nope.json")).load().unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[{{\"id\": 1}}]").unwrap();
        let err = JsonFileSource::new(file.path()).load().unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let source = StaticSource::new(vec![
            vehicle("a", "Toyota", "Corolla", 2020, 18000.0),
            vehicle("a", "Honda", "Civic", 2021, 21000.0),
        ]);
        assert!(matches!(source.load(), Err(CatalogError::DuplicateId(id)) if id == "a"));
    }

    #[test]
    fn rejects_negative_price() {
        let source = StaticSource::new(vec![vehicle("a", "Toyota", "Corolla", 2020, -1.0)]);
        assert!(matches!(source.load(), Err(CatalogError::InvalidPrice { .. })));
    }
}
