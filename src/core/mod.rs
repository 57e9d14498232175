pub mod error;
pub mod model;

pub use error::{RegistryError, Result};
pub use model::{MedicalRecord, Resident, Snapshot, StationMapping};
