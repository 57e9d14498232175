//! In-memory entity containers for the registry

use crate::core::{MedicalRecord, RegistryError, Resident, Result, Snapshot, StationMapping};
use crate::storage::persistence::SnapshotStore;
use std::sync::RwLock;
use tracing::{error, info, warn};

/// Holds the three entity containers behind a single lock and flushes the
/// full snapshot to disk after every effective mutation.
///
/// Reads take the lock in shared mode; mutations take it exclusively and
/// keep it across the flush, so a concurrent reader never observes a
/// partially-applied change. Lookups are linear scans over containers that
/// hold a single municipality's worth of data.
///
/// Natural keys are unique by convention, not enforcement: `add` admits
/// duplicates, and `update`/`delete` operate on the first match in
/// container (insertion) order.
pub struct EntityStore {
    inner: RwLock<Snapshot>,
    persistence: SnapshotStore,
}

impl EntityStore {
    /// Open a store over the given snapshot file.
    ///
    /// A missing or corrupt file starts the store empty; the condition is
    /// logged and never propagated.
    pub fn open(persistence: SnapshotStore) -> Self {
        let snapshot = match persistence.load() {
            Ok(snapshot) => {
                info!(
                    residents = snapshot.residents.len(),
                    mappings = snapshot.station_mappings.len(),
                    records = snapshot.medical_records.len(),
                    "loaded registry snapshot"
                );
                snapshot
            }
            Err(e) => {
                warn!("starting with an empty snapshot: {}", e);
                Snapshot::default()
            }
        };
        Self {
            inner: RwLock::new(snapshot),
            persistence,
        }
    }

    /// Full copy of the current state, in container order.
    pub fn snapshot(&self) -> Result<Snapshot> {
        Ok(self.inner.read()?.clone())
    }

    // ========================================================================
    // Residents
    // ========================================================================

    pub fn residents(&self) -> Result<Vec<Resident>> {
        Ok(self.inner.read()?.residents.clone())
    }

    pub fn find_resident(&self, first_name: &str, last_name: &str) -> Result<Option<Resident>> {
        Ok(self
            .inner
            .read()?
            .residents
            .iter()
            .find(|r| r.matches_name(first_name, last_name))
            .cloned())
    }

    /// Everyone registered at the given address, household order preserved.
    pub fn residents_at_address(&self, address: &str) -> Result<Vec<Resident>> {
        Ok(self
            .inner
            .read()?
            .residents
            .iter()
            .filter(|r| r.address == address)
            .cloned()
            .collect())
    }

    pub fn add_resident(&self, resident: Resident) -> Result<()> {
        validate_name(&resident.first_name, &resident.last_name)?;
        let mut inner = self.inner.write()?;
        inner.residents.push(resident);
        self.flush(&inner)
    }

    /// Replace every field of the first resident matching the key.
    pub fn update_resident(
        &self,
        first_name: &str,
        last_name: &str,
        updated: Resident,
    ) -> Result<Option<Resident>> {
        validate_name(&updated.first_name, &updated.last_name)?;
        let mut inner = self.inner.write()?;
        let found = match inner
            .residents
            .iter_mut()
            .find(|r| r.matches_name(first_name, last_name))
        {
            Some(existing) => {
                *existing = updated.clone();
                true
            }
            None => false,
        };
        if !found {
            return Ok(None);
        }
        self.flush(&inner)?;
        Ok(Some(updated))
    }

    pub fn delete_resident(&self, first_name: &str, last_name: &str) -> Result<bool> {
        let mut inner = self.inner.write()?;
        let position = inner
            .residents
            .iter()
            .position(|r| r.matches_name(first_name, last_name));
        match position {
            Some(index) => {
                inner.residents.remove(index);
                self.flush(&inner)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // ========================================================================
    // Station mappings
    // ========================================================================

    pub fn station_mappings(&self) -> Result<Vec<StationMapping>> {
        Ok(self.inner.read()?.station_mappings.clone())
    }

    pub fn mapping_for_address(&self, address: &str) -> Result<Option<StationMapping>> {
        Ok(self
            .inner
            .read()?
            .station_mappings
            .iter()
            .find(|m| m.address == address)
            .cloned())
    }

    /// Every address served by the given station, in container order.
    pub fn addresses_for_station(&self, station: &str) -> Result<Vec<String>> {
        Ok(self
            .inner
            .read()?
            .station_mappings
            .iter()
            .filter(|m| m.station == station)
            .map(|m| m.address.clone())
            .collect())
    }

    pub fn add_mapping(&self, mapping: StationMapping) -> Result<()> {
        validate_mapping(&mapping)?;
        let mut inner = self.inner.write()?;
        inner.station_mappings.push(mapping);
        self.flush(&inner)
    }

    /// Re-point an address at a different station; last write wins.
    pub fn update_mapping(
        &self,
        address: &str,
        updated: StationMapping,
    ) -> Result<Option<StationMapping>> {
        validate_mapping(&updated)?;
        let mut inner = self.inner.write()?;
        let found = match inner
            .station_mappings
            .iter_mut()
            .find(|m| m.address == address)
        {
            Some(existing) => {
                *existing = updated.clone();
                true
            }
            None => false,
        };
        if !found {
            return Ok(None);
        }
        self.flush(&inner)?;
        Ok(Some(updated))
    }

    pub fn delete_mapping(&self, address: &str) -> Result<bool> {
        let mut inner = self.inner.write()?;
        let position = inner
            .station_mappings
            .iter()
            .position(|m| m.address == address);
        match position {
            Some(index) => {
                inner.station_mappings.remove(index);
                self.flush(&inner)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // ========================================================================
    // Medical records
    // ========================================================================

    pub fn medical_records(&self) -> Result<Vec<MedicalRecord>> {
        Ok(self.inner.read()?.medical_records.clone())
    }

    pub fn medical_record_for(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<MedicalRecord>> {
        Ok(self
            .inner
            .read()?
            .medical_records
            .iter()
            .find(|m| m.matches_name(first_name, last_name))
            .cloned())
    }

    pub fn add_medical_record(&self, record: MedicalRecord) -> Result<()> {
        validate_name(&record.first_name, &record.last_name)?;
        let mut inner = self.inner.write()?;
        inner.medical_records.push(record);
        self.flush(&inner)
    }

    pub fn update_medical_record(
        &self,
        first_name: &str,
        last_name: &str,
        updated: MedicalRecord,
    ) -> Result<Option<MedicalRecord>> {
        validate_name(&updated.first_name, &updated.last_name)?;
        let mut inner = self.inner.write()?;
        let found = match inner
            .medical_records
            .iter_mut()
            .find(|m| m.matches_name(first_name, last_name))
        {
            Some(existing) => {
                *existing = updated.clone();
                true
            }
            None => false,
        };
        if !found {
            return Ok(None);
        }
        self.flush(&inner)?;
        Ok(Some(updated))
    }

    pub fn delete_medical_record(&self, first_name: &str, last_name: &str) -> Result<bool> {
        let mut inner = self.inner.write()?;
        let position = inner
            .medical_records
            .iter()
            .position(|m| m.matches_name(first_name, last_name));
        match position {
            Some(index) => {
                inner.medical_records.remove(index);
                self.flush(&inner)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Flush the full state. On failure the in-memory mutation is kept; the
    /// error is surfaced so the caller can decide whether to retry.
    fn flush(&self, snapshot: &Snapshot) -> Result<()> {
        if let Err(e) = self.persistence.save(snapshot) {
            error!("snapshot flush failed, in-memory state retained: {}", e);
            return Err(e);
        }
        Ok(())
    }
}

fn validate_name(first_name: &str, last_name: &str) -> Result<()> {
    if first_name.trim().is_empty() || last_name.trim().is_empty() {
        return Err(RegistryError::Validation(
            "first name and last name are required".to_string(),
        ));
    }
    Ok(())
}

fn validate_mapping(mapping: &StationMapping) -> Result<()> {
    if mapping.address.trim().is_empty() || mapping.station.trim().is_empty() {
        return Err(RegistryError::Validation(
            "address and station are required".to_string(),
        ));
    }
    Ok(())
}
