//! Snapshot Store
//!
//! Holds the single in-memory [`DashboardSnapshot`] shared between the fetch
//! pipeline (the only writer) and the views (readers). Readers either poll
//! [`SnapshotStore::snapshot`] or subscribe to lifecycle events.

mod container;
mod types;

pub use container::{SnapshotEvent, SnapshotStore, SnapshotUpdate};
pub use types::{DashboardSnapshot, FetchStatus, StateEntry};
