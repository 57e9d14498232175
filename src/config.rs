use crate::engine::age::ADULT_AGE;
use std::path::PathBuf;

/// Registry configuration
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Snapshot file backing the store
    pub snapshot_path: PathBuf,

    /// Age at which a resident counts as an adult
    pub adult_age: i32,
}

impl RegistryConfig {
    /// Create a configuration with the default snapshot location
    pub fn new() -> Self {
        Self {
            snapshot_path: PathBuf::from("data/alertdb.json"),
            adult_age: ADULT_AGE,
        }
    }

    /// Set the snapshot file path
    pub fn snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = path.into();
        self
    }

    /// Set the adult classification threshold
    pub fn adult_age(mut self, adult_age: i32) -> Self {
        self.adult_age = adult_age;
        self
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new()
    }
}
