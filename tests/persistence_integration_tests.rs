//! Integration tests for snapshot persistence across store sessions

use alertdb::{EntityStore, MedicalRecord, Resident, Snapshot, SnapshotStore, StationMapping};
use tempfile::TempDir;

fn resident(first: &str, last: &str, address: &str) -> Resident {
    Resident::new(
        first,
        last,
        address,
        "Culver",
        "97451",
        "841-874-6512",
        format!("{}@email.com", first.to_lowercase()),
    )
}

#[test]
fn test_mutations_survive_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("registry.json");

    // Session 1: populate all three containers.
    {
        let store = EntityStore::open(SnapshotStore::new(&path));
        store
            .add_resident(resident("John", "Boyd", "1509 Culver St"))
            .unwrap();
        store
            .add_mapping(StationMapping::new("1509 Culver St", "3"))
            .unwrap();
        store
            .add_medical_record(MedicalRecord::new(
                "John",
                "Boyd",
                "03/06/1984",
                vec!["aznol:350mg".to_string()],
                vec![],
            ))
            .unwrap();
    }

    // Session 2: everything is back.
    {
        let store = EntityStore::open(SnapshotStore::new(&path));
        assert_eq!(store.residents().unwrap().len(), 1);
        assert_eq!(store.station_mappings().unwrap().len(), 1);
        assert_eq!(store.medical_records().unwrap().len(), 1);
        assert_eq!(
            store
                .medical_record_for("John", "Boyd")
                .unwrap()
                .unwrap()
                .birthdate,
            "03/06/1984"
        );
    }
}

#[test]
fn test_save_twice_keeps_resident_count_stable() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("registry.json");
    let snapshot_store = SnapshotStore::new(&path);

    let snapshot = Snapshot {
        residents: vec![
            resident("John", "Boyd", "1509 Culver St"),
            resident("Jacob", "Boyd", "1509 Culver St"),
        ],
        station_mappings: vec![StationMapping::new("1509 Culver St", "3")],
        medical_records: vec![],
    };

    snapshot_store.save(&snapshot).unwrap();
    let after_first = snapshot_store.load().unwrap().residents.len();

    snapshot_store.save(&snapshot).unwrap();
    let after_second = snapshot_store.load().unwrap().residents.len();

    assert_eq!(after_first, 2);
    assert_eq!(after_second, after_first);
}

#[test]
fn test_every_mutation_kind_flushes() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("registry.json");

    let store = EntityStore::open(SnapshotStore::new(&path));
    store
        .add_resident(resident("John", "Boyd", "1509 Culver St"))
        .unwrap();

    store
        .update_resident("John", "Boyd", resident("John", "Boyd", "29 15th St"))
        .unwrap();
    let on_disk = SnapshotStore::new(&path).load().unwrap();
    assert_eq!(on_disk.residents[0].address, "29 15th St");

    store.delete_resident("John", "Boyd").unwrap();
    let on_disk = SnapshotStore::new(&path).load().unwrap();
    assert!(on_disk.residents.is_empty());
}

#[test]
fn test_failed_delete_leaves_snapshot_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("registry.json");

    let store = EntityStore::open(SnapshotStore::new(&path));
    store
        .add_mapping(StationMapping::new("1509 Culver St", "3"))
        .unwrap();
    let before = std::fs::read(&path).unwrap();

    // Deleting a mapping for an unknown address reports not-found and
    // performs no flush.
    assert!(!store.delete_mapping("644 Gershwin Cir").unwrap());
    assert_eq!(store.station_mappings().unwrap().len(), 1);
    let after = std::fs::read(&path).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_reopen_after_corrupt_snapshot_starts_empty_and_recovers() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("registry.json");
    std::fs::write(&path, b"\x00\x01 definitely not json").unwrap();

    let store = EntityStore::open(SnapshotStore::new(&path));
    assert!(store.residents().unwrap().is_empty());

    // The first mutation rewrites a clean snapshot wholesale.
    store
        .add_resident(resident("John", "Boyd", "1509 Culver St"))
        .unwrap();
    let reloaded = SnapshotStore::new(&path).load().unwrap();
    assert_eq!(reloaded.residents.len(), 1);
}

#[test]
fn test_snapshot_round_trip_preserves_container_order() {
    let temp_dir = TempDir::new().unwrap();
    let snapshot_store = SnapshotStore::new(temp_dir.path().join("registry.json"));

    let snapshot = Snapshot {
        residents: vec![
            resident("Peter", "Duncan", "644 Gershwin Cir"),
            resident("John", "Boyd", "1509 Culver St"),
            resident("Jacob", "Boyd", "1509 Culver St"),
        ],
        station_mappings: vec![
            StationMapping::new("644 Gershwin Cir", "1"),
            StationMapping::new("1509 Culver St", "3"),
        ],
        medical_records: vec![MedicalRecord::new(
            "Peter",
            "Duncan",
            "09/06/2000",
            vec![],
            vec!["shellfish".to_string()],
        )],
    };

    snapshot_store.save(&snapshot).unwrap();
    assert_eq!(snapshot_store.load().unwrap(), snapshot);
}
