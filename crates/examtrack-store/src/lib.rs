//! Storage backends for examtrack.
//!
//! [`MemoryStore`] implements all three core store traits behind one mutex.
//! The [`snapshot`] module persists a store's contents as a versioned JSON
//! file so the CLI can round-trip state between invocations.

pub mod memory;
pub mod snapshot;

pub use memory::MemoryStore;
pub use snapshot::{load_or_default, save, Snapshot, SnapshotError, SNAPSHOT_VERSION};
