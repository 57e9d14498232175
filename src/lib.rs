// ============================================================================
// AlertDB Library
// ============================================================================

pub mod config;
pub mod core;
pub mod engine;
pub mod registry;
pub mod storage;

// Re-export main types for convenience
pub use config::RegistryConfig;
pub use core::{MedicalRecord, RegistryError, Resident, Result, Snapshot, StationMapping};
pub use engine::DispatchEngine;
pub use engine::report::{
    ChildAlert, ChildInfo, MedicalInfo, PersonRecordView, ResidentSummary, StationCoverage,
    StationHousehold,
};
pub use registry::DispatchRegistry;
pub use storage::{EntityStore, SnapshotStore};
