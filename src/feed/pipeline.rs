//! Fetch Pipeline
//!
//! Drives the store through the three-phase fetch lifecycle: mark loading,
//! fetch and normalize, commit or mark failed. Errors never escape to the
//! caller; views observe them only as `FetchStatus::Failed`.

use std::sync::Arc;

use crate::store::{DashboardSnapshot, SnapshotStore};

use super::client::StatsSource;
use super::normalize::normalize;

/// Ties a [`StatsSource`] to the [`SnapshotStore`] it feeds.
///
/// The pipeline is the store's only writer. Overlapping refreshes are
/// allowed; the last one to settle wins.
pub struct FetchPipeline {
    source: Arc<dyn StatsSource>,
    store: Arc<SnapshotStore>,
}

impl FetchPipeline {
    pub fn new(source: Arc<dyn StatsSource>, store: Arc<SnapshotStore>) -> Self {
        Self { source, store }
    }

    /// The store this pipeline writes to.
    pub fn store(&self) -> &Arc<SnapshotStore> {
        &self.store
    }

    /// Run one fetch to completion and return the resulting snapshot.
    ///
    /// No automatic retry: a failed refresh stays failed until the caller
    /// invokes this again.
    pub async fn refresh(&self) -> DashboardSnapshot {
        self.store.mark_loading();

        match self.source.fetch_latest().await {
            Ok(raw) => {
                let update = normalize(&raw);
                tracing::debug!(
                    total_cases = update.total_cases,
                    states = update.statewise.len(),
                    "stats fetch succeeded"
                );
                self.store.commit(update);
            }
            Err(e) => {
                tracing::error!(error = %e, "stats fetch failed");
                self.store.mark_failed();
            }
        }

        self.store.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::client::{
        FeedConfig, RawRegion, RawSummary, StatsClient, StatsPayload, StatsResponse,
    };
    use crate::feed::FeedError;
    use crate::store::FetchStatus;
    use async_trait::async_trait;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    /// In-memory source returning a fixed outcome per call.
    struct ScriptedSource {
        outcomes: std::sync::Mutex<Vec<Result<StatsResponse, FeedError>>>,
    }

    impl ScriptedSource {
        fn new(outcomes: Vec<Result<StatsResponse, FeedError>>) -> Self {
            Self {
                outcomes: std::sync::Mutex::new(outcomes),
            }
        }
    }

    #[async_trait]
    impl StatsSource for ScriptedSource {
        async fn fetch_latest(&self) -> Result<StatsResponse, FeedError> {
            self.outcomes.lock().unwrap().remove(0)
        }
    }

    fn kerala_response() -> StatsResponse {
        StatsResponse {
            data: StatsPayload {
                summary: RawSummary {
                    total: 5,
                    discharged: 3,
                    deaths: 1,
                },
                regional: vec![RawRegion {
                    loc: "Kerala".to_string(),
                    total_confirmed: 5,
                    discharged: 3,
                    deaths: 1,
                }],
            },
            last_refreshed: None,
        }
    }

    fn pipeline_with(outcomes: Vec<Result<StatsResponse, FeedError>>) -> FetchPipeline {
        FetchPipeline::new(
            Arc::new(ScriptedSource::new(outcomes)),
            Arc::new(SnapshotStore::new()),
        )
    }

    /// Serve exactly one canned HTTP response on a local port.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;
            let response = format!(
                "{status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
        });

        format!("http://{addr}/covid19-in/stats/latest")
    }

    fn http_pipeline(endpoint: String) -> FetchPipeline {
        let client = StatsClient::new(FeedConfig {
            endpoint,
            request_timeout_ms: 5_000,
        });
        FetchPipeline::new(Arc::new(client), Arc::new(SnapshotStore::new()))
    }

    #[tokio::test]
    async fn test_refresh_commits_on_success() {
        let pipeline = pipeline_with(vec![Ok(kerala_response())]);
        let snapshot = pipeline.refresh().await;

        assert_eq!(snapshot.status, FetchStatus::Succeeded);
        assert_eq!(snapshot.total_cases, 5);
        assert_eq!(snapshot.recovered, 3);
        assert_eq!(snapshot.deaths, 1);
        assert_eq!(snapshot.statewise.len(), 1);
        assert_eq!(snapshot.statewise[0].state, "Kerala");
        assert_eq!(snapshot.statewise[0].latitude, 10.8505);
        assert_eq!(snapshot.statewise[0].longitude, 76.2711);
    }

    #[tokio::test]
    async fn test_refresh_marks_failed_without_propagating() {
        let pipeline = pipeline_with(vec![Err(FeedError::Timeout)]);
        let snapshot = pipeline.refresh().await;

        assert_eq!(snapshot.status, FetchStatus::Failed);
        assert_eq!(snapshot.total_cases, 0);
        assert!(snapshot.statewise.is_empty());
    }

    #[tokio::test]
    async fn test_failure_after_success_keeps_prior_data() {
        let pipeline = pipeline_with(vec![
            Ok(kerala_response()),
            Err(FeedError::HttpStatus { status: 502 }),
        ]);

        pipeline.refresh().await;
        let snapshot = pipeline.refresh().await;

        assert_eq!(snapshot.status, FetchStatus::Failed);
        // Everything but status is from the prior successful fetch
        assert_eq!(snapshot.total_cases, 5);
        assert_eq!(snapshot.statewise.len(), 1);
        assert_eq!(snapshot.statewise[0].state, "Kerala");
    }

    #[tokio::test]
    async fn test_lifecycle_events_in_order() {
        let pipeline = pipeline_with(vec![Ok(kerala_response())]);
        let mut rx = pipeline.store().subscribe();

        pipeline.refresh().await;

        use crate::store::SnapshotEvent;
        assert_eq!(rx.recv().await.unwrap(), SnapshotEvent::Loading);
        assert_eq!(rx.recv().await.unwrap(), SnapshotEvent::Committed);
    }

    #[tokio::test]
    async fn test_end_to_end_success_over_http() {
        let endpoint = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"data":{"summary":{"total":5,"discharged":3,"deaths":1},"regional":[{"loc":"Kerala","totalConfirmed":5,"discharged":3,"deaths":1}]}}"#,
        )
        .await;

        let snapshot = http_pipeline(endpoint).refresh().await;

        assert_eq!(snapshot.status, FetchStatus::Succeeded);
        assert_eq!(snapshot.total_cases, 5);
        assert_eq!(snapshot.recovered, 3);
        assert_eq!(snapshot.deaths, 1);
        assert_eq!(snapshot.statewise.len(), 1);
        assert_eq!(snapshot.statewise[0].state, "Kerala");
        assert_eq!(snapshot.statewise[0].latitude, 10.8505);
        assert_eq!(snapshot.statewise[0].longitude, 76.2711);
    }

    #[tokio::test]
    async fn test_end_to_end_http_500_fails_with_counters_at_zero() {
        let endpoint = serve_once("HTTP/1.1 500 Internal Server Error", "{}").await;
        let snapshot = http_pipeline(endpoint).refresh().await;

        assert_eq!(snapshot.status, FetchStatus::Failed);
        assert_eq!(snapshot.total_cases, 0);
        assert_eq!(snapshot.recovered, 0);
        assert_eq!(snapshot.deaths, 0);
        assert!(snapshot.statewise.is_empty());
    }

    #[tokio::test]
    async fn test_end_to_end_malformed_json_fails() {
        let endpoint = serve_once("HTTP/1.1 200 OK", r#"{"data": "not-an-object"}"#).await;
        let snapshot = http_pipeline(endpoint).refresh().await;

        assert_eq!(snapshot.status, FetchStatus::Failed);
    }
}
