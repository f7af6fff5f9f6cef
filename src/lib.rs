//! Workspace umbrella crate for climatch.
//!
//! Ties the query parser, the provider matcher and the coverage recommender
//! together behind one YAML configuration so callers can go from a config
//! file to a ready [`Matcher`] or [`RecommendationService`] in one call.

pub mod config;

pub use config::{
    CatalogYamlConfig, ClimatchConfig, ConfigLoadError, CoverageYamlConfig, MatchYamlConfig,
};
pub use coverage::{
    score_candidates, CoverageConfig, CoverageError, CoverageFilter, CoverageMetric,
    CoverageMetricsComputer, InMemoryObservationStore, Observation, ObservationStore,
    RecommendRequest, RecommendationService, Recommendations, ScoredCandidate, StoreError,
};
pub use matcher::{
    score_provider, Catalog, CatalogError, MatchConfig, MatchError, MatchExplanation,
    MatchMetrics, MatchResult, Matcher, Provider, ProviderNotes, ScoredProvider,
};
pub use query::{classify_token, parse_query, Query, TokenClass};

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

/// Errors raised while assembling components from configuration.
#[derive(Debug, Error)]
pub enum ClimatchError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigLoadError),

    #[error("catalog path is not configured")]
    MissingCatalogPath,

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error(transparent)]
    Coverage(#[from] CoverageError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Build a [`Matcher`] from `config`, loading the catalog from
/// `catalog_override` when given and from `catalog.path` otherwise.
pub fn build_matcher(
    config: &ClimatchConfig,
    catalog_override: Option<&Path>,
) -> Result<Matcher, ClimatchError> {
    let path = catalog_override
        .or(config.catalog.path.as_deref())
        .ok_or(ClimatchError::MissingCatalogPath)?;
    let matcher = Matcher::from_catalog_file(path)?.with_config(config.matcher.to_match_config())?;
    tracing::debug!(
        catalog = %path.display(),
        providers = matcher.catalog().len(),
        "matcher ready"
    );
    Ok(matcher)
}

/// Build a [`RecommendationService`] over the in-memory observation store.
/// Without an observations path the store is empty.
pub fn build_recommender(
    config: &ClimatchConfig,
    observations_override: Option<&Path>,
) -> Result<RecommendationService, ClimatchError> {
    let store = match observations_override.or(config.coverage.observations_path.as_deref()) {
        Some(path) => InMemoryObservationStore::from_file(path)?,
        None => InMemoryObservationStore::new(),
    };
    tracing::debug!(rows = store.len(), "observation store ready");
    Ok(RecommendationService::new(
        Arc::new(store),
        config.coverage.to_coverage_config(),
    )?)
}
