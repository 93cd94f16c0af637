//! Payload Normalizer
//!
//! Maps the raw wire payload onto the store's canonical shape: field renames
//! plus a coordinate lookup per region. No arithmetic, no deduplication, no
//! sorting, no range validation; region order is preserved exactly.

use crate::geo;
use crate::store::{SnapshotUpdate, StateEntry};

use super::client::StatsResponse;

/// Normalize a raw response into the commit payload for the store.
///
/// Infallible: shape violations are caught earlier, at JSON decode time.
pub fn normalize(raw: &StatsResponse) -> SnapshotUpdate {
    let summary = &raw.data.summary;

    let statewise = raw
        .data
        .regional
        .iter()
        .map(|region| {
            let coord = geo::lookup(&geo::normalize_name(&region.loc));
            StateEntry {
                state: region.loc.clone(),
                total: region.total_confirmed,
                recovered: region.discharged,
                deaths: region.deaths,
                latitude: coord.latitude,
                longitude: coord.longitude,
            }
        })
        .collect();

    SnapshotUpdate {
        total_cases: summary.total,
        recovered: summary.discharged,
        deaths: summary.deaths,
        statewise,
        last_updated: raw.last_refreshed,
    }
}
