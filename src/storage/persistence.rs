//! Snapshot persistence for the registry

use crate::core::{RegistryError, Result, Snapshot};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Reads and writes the registry snapshot file.
///
/// `save` serializes the complete in-memory state and renames it over the
/// previous file, so a crash mid-write leaves the old snapshot intact.
/// Loading the existing file and appending the in-memory containers onto it
/// is deliberately not supported: that strategy duplicates every
/// previously-saved record on each save.
pub struct SnapshotStore {
    snapshot_path: PathBuf,
}

impl SnapshotStore {
    pub fn new<P: AsRef<Path>>(snapshot_path: P) -> Self {
        Self {
            snapshot_path: snapshot_path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.snapshot_path
    }

    pub fn exists(&self) -> bool {
        self.snapshot_path.exists()
    }

    /// Load the snapshot from disk.
    ///
    /// An absent, unreadable or unparseable file is reported as
    /// `EmptySnapshot`. Callers bootstrapping a store substitute
    /// `Snapshot::default()` rather than propagating the failure.
    pub fn load(&self) -> Result<Snapshot> {
        if !self.snapshot_path.exists() {
            return Err(RegistryError::EmptySnapshot(format!(
                "snapshot file {} does not exist",
                self.snapshot_path.display()
            )));
        }
        let data = fs::read(&self.snapshot_path)
            .map_err(|e| RegistryError::EmptySnapshot(format!("failed to read snapshot: {}", e)))?;
        serde_json::from_slice(&data)
            .map_err(|e| RegistryError::EmptySnapshot(format!("failed to parse snapshot: {}", e)))
    }

    /// Write the complete snapshot, atomically replacing the previous file.
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let dir = match self.snapshot_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).map_err(|e| {
                    RegistryError::Persistence(format!(
                        "failed to create snapshot directory: {}",
                        e
                    ))
                })?;
                parent.to_path_buf()
            }
            _ => PathBuf::from("."),
        };

        let serialized = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| RegistryError::Persistence(format!("failed to serialize snapshot: {}", e)))?;

        // Temp file in the same directory so the final rename stays on one
        // filesystem.
        let mut temp = NamedTempFile::new_in(&dir)
            .map_err(|e| RegistryError::Persistence(format!("failed to create temp file: {}", e)))?;
        temp.write_all(&serialized)
            .map_err(|e| RegistryError::Persistence(format!("failed to write snapshot: {}", e)))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| RegistryError::Persistence(format!("failed to sync snapshot: {}", e)))?;
        temp.persist(&self.snapshot_path)
            .map_err(|e| RegistryError::Persistence(format!("failed to replace snapshot: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MedicalRecord, Resident, StationMapping};
    use tempfile::TempDir;

    fn sample_snapshot() -> Snapshot {
        Snapshot {
            residents: vec![Resident::new(
                "John",
                "Boyd",
                "1509 Culver St",
                "Culver",
                "97451",
                "841-874-6512",
                "jaboyd@email.com",
            )],
            station_mappings: vec![StationMapping::new("1509 Culver St", "3")],
            medical_records: vec![MedicalRecord::new(
                "John",
                "Boyd",
                "03/06/1984",
                vec!["aznol:350mg".to_string()],
                vec!["nillacilan".to_string()],
            )],
        }
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(temp_dir.path().join("registry.json"));

        let snapshot = sample_snapshot();
        store.save(&snapshot).unwrap();
        assert!(store.exists());

        let loaded = store.load().unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_load_missing_file_is_empty_snapshot_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(temp_dir.path().join("absent.json"));

        let err = store.load().unwrap_err();
        assert!(matches!(err, RegistryError::EmptySnapshot(_)));
    }

    #[test]
    fn test_load_corrupt_file_is_empty_snapshot_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("registry.json");
        fs::write(&path, b"{ not json").unwrap();

        let store = SnapshotStore::new(&path);
        let err = store.load().unwrap_err();
        assert!(matches!(err, RegistryError::EmptySnapshot(_)));
    }

    #[test]
    fn test_repeated_save_does_not_duplicate_records() {
        let temp_dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(temp_dir.path().join("registry.json"));

        let snapshot = sample_snapshot();
        store.save(&snapshot).unwrap();
        let first = store.load().unwrap();

        store.save(&snapshot).unwrap();
        let second = store.load().unwrap();

        assert_eq!(first.residents.len(), second.residents.len());
        assert_eq!(first, second);
    }

    #[test]
    fn test_save_leaves_no_temp_files_behind() {
        let temp_dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(temp_dir.path().join("registry.json"));

        store.save(&sample_snapshot()).unwrap();

        let entries: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec!["registry.json"]);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(temp_dir.path().join("nested/dir/registry.json"));

        store.save(&Snapshot::default()).unwrap();
        assert!(store.exists());
    }
}
