use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::CoverageError;
use crate::store::ObservationStore;
use crate::types::{CoverageFilter, CoverageMetric};

/// Default deadline for one store aggregation.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Runs one bounded coverage aggregation against an [`ObservationStore`].
#[derive(Clone)]
pub struct CoverageMetricsComputer {
    store: Arc<dyn ObservationStore>,
    timeout: Duration,
}

impl CoverageMetricsComputer {
    pub fn new(store: Arc<dyn ObservationStore>) -> Self {
        Self {
            store,
            timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Aggregate coverage for `filter`.
    ///
    /// The store is called exactly once. Store failures and deadline
    /// overruns are returned as errors; an empty `Vec` only means no rows
    /// matched.
    pub async fn compute(
        &self,
        filter: &CoverageFilter,
    ) -> Result<Vec<CoverageMetric>, CoverageError> {
        filter.validate()?;
        let normalized = filter.normalized();
        let started = Instant::now();

        let metrics = match tokio::time::timeout(
            self.timeout,
            self.store.aggregate_coverage(&normalized),
        )
        .await
        {
            Ok(Ok(metrics)) => metrics,
            Ok(Err(err)) => {
                warn!(error = %err, "coverage store call failed");
                return Err(err.into());
            }
            Err(_) => {
                warn!(timeout_ms = self.timeout.as_millis() as u64, "coverage store call timed out");
                return Err(CoverageError::Timeout(self.timeout));
            }
        };

        debug!(
            sector = normalized.sector.as_deref().unwrap_or("*"),
            region = normalized.region.as_deref().unwrap_or("*"),
            start_year = normalized.start_year,
            end_year = normalized.end_year,
            groups = metrics.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "computed coverage metrics"
        );
        Ok(metrics)
    }
}

impl std::fmt::Debug for CoverageMetricsComputer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoverageMetricsComputer")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::{InMemoryObservationStore, Observation};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingStore {
        calls: AtomicUsize,
        seen: Mutex<Vec<CoverageFilter>>,
    }

    #[async_trait]
    impl ObservationStore for RecordingStore {
        async fn aggregate_coverage(
            &self,
            filter: &CoverageFilter,
        ) -> Result<Vec<CoverageMetric>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().expect("lock").push(filter.clone());
            Ok(Vec::new())
        }
    }

    struct FailingStore;

    #[async_trait]
    impl ObservationStore for FailingStore {
        async fn aggregate_coverage(
            &self,
            _filter: &CoverageFilter,
        ) -> Result<Vec<CoverageMetric>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
    }

    struct SlowStore;

    #[async_trait]
    impl ObservationStore for SlowStore {
        async fn aggregate_coverage(
            &self,
            _filter: &CoverageFilter,
        ) -> Result<Vec<CoverageMetric>, StoreError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn store_sees_normalized_filter_once() {
        let store = Arc::new(RecordingStore::default());
        let computer = CoverageMetricsComputer::new(store.clone());
        let filter = CoverageFilter::new(2020, 2050)
            .with_sector("All Sectors")
            .with_region("Global");

        let metrics = computer.compute(&filter).await.expect("metrics");
        assert!(metrics.is_empty());
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            store.seen.lock().expect("lock")[0],
            CoverageFilter::new(2020, 2050)
        );
    }

    #[tokio::test]
    async fn store_failure_is_fatal() {
        let computer = CoverageMetricsComputer::new(Arc::new(FailingStore));
        let err = computer
            .compute(&CoverageFilter::new(2020, 2050))
            .await
            .expect_err("store failure");
        assert!(matches!(err, CoverageError::Store(StoreError::Unavailable(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_store_times_out() {
        let computer = CoverageMetricsComputer::new(Arc::new(SlowStore))
            .with_timeout(Duration::from_millis(250));
        let err = computer
            .compute(&CoverageFilter::new(2020, 2050))
            .await
            .expect_err("timeout");
        assert!(matches!(err, CoverageError::Timeout(d) if d == Duration::from_millis(250)));
    }

    #[tokio::test]
    async fn invalid_filter_skips_store() {
        let store = Arc::new(RecordingStore::default());
        let computer = CoverageMetricsComputer::new(store.clone());
        let err = computer
            .compute(&CoverageFilter::new(2060, 2020))
            .await
            .expect_err("invalid");
        assert!(matches!(err, CoverageError::InvalidFilter(_)));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn aggregates_in_memory_rows() {
        let mut store = InMemoryObservationStore::new();
        store.register_variable("GDP|PPP", ["Economy"]);
        store.push(Observation {
            provider: "IIASA".into(),
            model: "MESSAGE".into(),
            variable: "GDP|PPP".into(),
            region: "India".into(),
            year: 2030,
        });
        let computer = CoverageMetricsComputer::new(Arc::new(store));
        let filter = CoverageFilter::new(2020, 2050).with_sector("Economy").with_region("India");
        let metrics = computer.compute(&filter).await.expect("metrics");
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].provider, "IIASA");
    }
}
