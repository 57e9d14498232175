//! Facade wiring configuration, persistence, store and engine together

use crate::config::RegistryConfig;
use crate::engine::DispatchEngine;
use crate::storage::{EntityStore, SnapshotStore};
use std::sync::Arc;

/// The in-process surface an HTTP adapter talks to: entity CRUD through the
/// store handle, aggregation queries through the engine.
///
/// # Examples
///
/// ```
/// use alertdb::{DispatchRegistry, RegistryConfig, Resident, StationMapping};
///
/// # fn main() -> alertdb::Result<()> {
/// let dir = tempfile::tempdir().unwrap();
/// let registry = DispatchRegistry::open(
///     RegistryConfig::new().snapshot_path(dir.path().join("registry.json")),
/// );
///
/// registry.store().add_mapping(StationMapping::new("1 Main St", "1"))?;
/// registry.store().add_resident(Resident::new(
///     "John", "Doe", "1 Main St", "Culver", "97451", "841-874-6512", "jdoe@email.com",
/// ))?;
///
/// let coverage = registry.engine().station_coverage("1")?;
/// assert!(coverage.persons.is_empty()); // no medical record yet
/// # Ok(())
/// # }
/// ```
pub struct DispatchRegistry {
    store: Arc<EntityStore>,
    engine: DispatchEngine,
}

impl DispatchRegistry {
    /// Open a registry over the configured snapshot file. A missing or
    /// corrupt snapshot starts the registry empty.
    pub fn open(config: RegistryConfig) -> Self {
        let store = Arc::new(EntityStore::open(SnapshotStore::new(&config.snapshot_path)));
        let engine = DispatchEngine::new(Arc::clone(&store)).with_adult_age(config.adult_age);
        Self { store, engine }
    }

    /// Entity CRUD and key lookups.
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Aggregation queries.
    pub fn engine(&self) -> &DispatchEngine {
        &self.engine
    }
}
