//! Statistics Feed
//!
//! Everything between the wire and the store: the HTTP client for the rootnet
//! endpoint, the normalizer that maps its payload onto the canonical model,
//! and the pipeline that drives the store through the fetch lifecycle.

mod client;
mod normalize;
mod pipeline;

pub use client::{
    FeedConfig, RawRegion, RawSummary, StatsClient, StatsPayload, StatsResponse, StatsSource,
    DEFAULT_ENDPOINT,
};
pub use normalize::normalize;
pub use pipeline::FetchPipeline;

use thiserror::Error;

/// Errors produced while fetching or decoding the feed.
///
/// All variants collapse to `FetchStatus::Failed` at the store boundary; the
/// distinction only feeds the logs.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request timed out")]
    Timeout,

    #[error("transport failure: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("endpoint returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("unexpected payload: {0}")]
    Payload(String),
}
