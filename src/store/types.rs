//! Canonical Data Model
//!
//! The normalized shape the views consume. Raw wire types live in the feed
//! module; everything here is already renamed and coordinate-tagged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of the last fetch operation.
///
/// Transitions only along idle → loading → (succeeded | failed); a new fetch
/// re-enters loading from either terminal state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl FetchStatus {
    /// Whether the last fetch reached a terminal state.
    pub fn is_settled(self) -> bool {
        matches!(self, FetchStatus::Succeeded | FetchStatus::Failed)
    }
}

impl std::fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FetchStatus::Idle => "idle",
            FetchStatus::Loading => "loading",
            FetchStatus::Succeeded => "succeeded",
            FetchStatus::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// Per-state statistics with map coordinates.
///
/// Counters are signed: the endpoint occasionally publishes corrected
/// (negative) deltas and the pipeline passes them through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateEntry {
    /// Original region name as published by the endpoint. Display value and
    /// selection key for the detail view.
    pub state: String,
    pub total: i64,
    pub recovered: i64,
    pub deaths: i64,
    /// 0.0 when the state has no coordinate table entry.
    pub latitude: f64,
    pub longitude: f64,
}

impl StateEntry {
    /// Estimated active cases, floored at zero.
    pub fn active(&self) -> i64 {
        (self.total - self.recovered - self.deaths).max(0)
    }

    /// Whether this entry has usable map coordinates.
    pub fn has_coordinates(&self) -> bool {
        self.latitude != 0.0 || self.longitude != 0.0
    }
}

/// The single in-memory view of the fetched statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Country-wide aggregate counters.
    pub total_cases: i64,
    pub recovered: i64,
    pub deaths: i64,
    /// Per-state entries in endpoint order. Replaced wholesale on every
    /// successful fetch, never merged.
    pub statewise: Vec<StateEntry>,
    pub status: FetchStatus,
    /// Endpoint refresh timestamp when available, otherwise commit time.
    pub last_updated: Option<DateTime<Utc>>,
}

impl DashboardSnapshot {
    /// Find a state entry by exact name match.
    pub fn find_state(&self, name: &str) -> Option<&StateEntry> {
        self.statewise.iter().find(|entry| entry.state == name)
    }

    /// Estimated active cases country-wide, floored at zero.
    pub fn active(&self) -> i64 {
        (self.total_cases - self.recovered - self.deaths).max(0)
    }
}
