use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::metrics::FacadeMatchMetrics;
use coverage::{InMemoryObservationStore, ObservationStore, RecommendationService};
use matcher::{Catalog, Matcher};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Matcher over the loaded catalog (shared across requests)
    pub matcher: Arc<Matcher>,

    /// Coverage ranking over the observation store
    pub recommender: Arc<RecommendationService>,

    /// Set when the Prometheus recorder is installed
    pub prometheus: Option<PrometheusHandle>,
}

impl ServerState {
    /// Load the catalog and observation store named in `config`.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let catalog = Catalog::from_file(&config.catalog_path)?;
        let store = match &config.observations_path {
            Some(path) => InMemoryObservationStore::from_file(path)?,
            None => {
                tracing::warn!("no observations_path configured, recommendations will be empty");
                InMemoryObservationStore::new()
            }
        };
        Self::from_parts(config, catalog, Arc::new(store))
    }

    /// Build state from an already-loaded catalog and store.
    pub fn from_parts(
        config: ServerConfig,
        catalog: Catalog,
        store: Arc<dyn ObservationStore>,
    ) -> ServerResult<Self> {
        let matcher = Matcher::new(catalog)
            .with_config(config.matcher.clone())?
            .with_metrics(Arc::new(FacadeMatchMetrics));
        let recommender = RecommendationService::new(store, config.coverage.clone())?;

        Ok(Self {
            config: Arc::new(config),
            matcher: Arc::new(matcher),
            recommender: Arc::new(recommender),
            prometheus: None,
        })
    }

    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }
}

/// Server metadata for health checks
#[derive(Debug, serde::Serialize)]
pub struct ServerMetadata {
    pub version: String,
    pub uptime_seconds: u64,
    pub catalog_providers: usize,
}
