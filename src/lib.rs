//! # Covid Dash
//!
//! India COVID-19 dashboard: fetches live case statistics from the public
//! rootnet endpoint, normalizes them into a single in-memory snapshot, and
//! renders summary, map, and per-state views in the terminal.
//!
//! ## Modules
//!
//! - [`geo`]: state name normalization and the coordinate table
//! - [`feed`]: HTTP client, payload normalizer, and fetch pipeline
//! - [`store`]: the shared snapshot container views read from
//! - [`ui`]: terminal dashboard (ratatui)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use covid_dash::feed::{FeedConfig, FetchPipeline, StatsClient};
//! use covid_dash::store::{FetchStatus, SnapshotStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = StatsClient::new(FeedConfig::default());
//!     let store = Arc::new(SnapshotStore::new());
//!     let pipeline = FetchPipeline::new(Arc::new(client), store);
//!
//!     let snapshot = pipeline.refresh().await;
//!     if snapshot.status == FetchStatus::Succeeded {
//!         println!("{} total cases across {} states",
//!             snapshot.total_cases, snapshot.statewise.len());
//!     }
//! }
//! ```

pub mod config;
pub mod feed;
pub mod geo;
pub mod store;
pub mod ui;

// Re-export top-level types for convenience
pub use config::{Config, ConfigError, FeedSettings, LoggingConfig, UiSettings};
pub use feed::{FeedConfig, FeedError, FetchPipeline, StatsClient, StatsSource};
pub use geo::{lookup, normalize_name, Coordinate};
pub use store::{DashboardSnapshot, FetchStatus, SnapshotEvent, SnapshotStore, StateEntry};
