//! Snapshot Container
//!
//! Single-writer, multi-reader state container. The fetch pipeline owns the
//! three mutation paths (loading / commit / failed); views clone the current
//! snapshot or listen on a broadcast channel for change notifications.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;

use super::types::{DashboardSnapshot, FetchStatus, StateEntry};

/// Payload committed by the pipeline after a successful fetch.
///
/// Exactly the normalizer's output: aggregate counters plus the ordered
/// per-state entries.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotUpdate {
    pub total_cases: i64,
    pub recovered: i64,
    pub deaths: i64,
    pub statewise: Vec<StateEntry>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Lifecycle notification emitted on every store mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotEvent {
    Loading,
    Committed,
    Failed,
}

/// Holds the one [`DashboardSnapshot`] for the process.
pub struct SnapshotStore {
    snapshot: RwLock<DashboardSnapshot>,
    events: broadcast::Sender<SnapshotEvent>,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore {
    /// Create a store with an idle, empty snapshot.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            snapshot: RwLock::new(DashboardSnapshot::default()),
            events,
        }
    }

    /// Current snapshot, cloned. Non-blocking from the reader's perspective:
    /// writers hold the lock only for a whole-field replace.
    pub fn snapshot(&self) -> DashboardSnapshot {
        self.read().clone()
    }

    /// Current lifecycle status without cloning the full snapshot.
    pub fn status(&self) -> FetchStatus {
        self.read().status
    }

    /// Subscribe to mutation notifications. Receivers that lag simply miss
    /// events and re-read the snapshot on the next one.
    pub fn subscribe(&self) -> broadcast::Receiver<SnapshotEvent> {
        self.events.subscribe()
    }

    /// Mark a fetch as in flight. Touches nothing but `status`.
    pub(crate) fn mark_loading(&self) {
        self.write().status = FetchStatus::Loading;
        self.notify(SnapshotEvent::Loading);
    }

    /// Commit a successful fetch: whole-field replace of counters and the
    /// statewise sequence. Last writer wins when fetches overlap.
    pub(crate) fn commit(&self, update: SnapshotUpdate) {
        {
            let mut snapshot = self.write();
            snapshot.total_cases = update.total_cases;
            snapshot.recovered = update.recovered;
            snapshot.deaths = update.deaths;
            snapshot.statewise = update.statewise;
            snapshot.last_updated = update.last_updated.or_else(|| Some(Utc::now()));
            snapshot.status = FetchStatus::Succeeded;
        }
        self.notify(SnapshotEvent::Committed);
    }

    /// Mark a fetch as failed. Data fields from the previous successful fetch
    /// stay untouched; `status` is the sole error signal for views.
    pub(crate) fn mark_failed(&self) {
        self.write().status = FetchStatus::Failed;
        self.notify(SnapshotEvent::Failed);
    }

    fn notify(&self, event: SnapshotEvent) {
        // No receivers is fine (e.g. one-shot CLI commands)
        let _ = self.events.send(event);
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, DashboardSnapshot> {
        self.snapshot.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, DashboardSnapshot> {
        self.snapshot
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
