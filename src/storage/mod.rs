mod persistence;
mod store;

pub use persistence::SnapshotStore;
pub use store::EntityStore;
