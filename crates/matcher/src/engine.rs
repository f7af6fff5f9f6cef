use std::sync::Arc;
use std::time::Instant;

use query::{parse_query, Query};
use rayon::prelude::*;

use crate::catalog::{Catalog, Provider};
use crate::metrics::MatchMetrics;
use crate::scorer::{score_provider, ProviderScore};
use crate::types::{MatchConfig, MatchError, MatchResult, ScoredProvider};

#[cfg(test)]
mod tests;

/// Scores every provider in a catalog against free-text queries.
///
/// The catalog is shared read-only; a `Matcher` is cheap to clone and safe to
/// use from many threads at once.
#[derive(Clone)]
pub struct Matcher {
    catalog: Arc<Catalog>,
    config: MatchConfig,
    metrics: Option<Arc<dyn MatchMetrics>>,
}

impl Matcher {
    /// Construct a matcher over `catalog` with the default config.
    pub fn new(catalog: Catalog) -> Self {
        Self::with_catalog_arc(Arc::new(catalog))
    }

    /// Construct a matcher from a shared catalog handle.
    pub fn with_catalog_arc(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            config: MatchConfig::default(),
            metrics: None,
        }
    }

    /// Load the catalog from a JSON file.
    pub fn from_catalog_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, MatchError> {
        Ok(Self::new(Catalog::from_file(path)?))
    }

    /// Replace the config after validating it.
    pub fn with_config(mut self, config: MatchConfig) -> Result<Self, MatchError> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn MatchMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Parse `text` and rank the catalog against it.
    pub fn match_query(&self, text: &str) -> MatchResult {
        let parsed = parse_query(text);
        self.match_parsed(&parsed)
    }

    /// Rank the catalog against an already-parsed query.
    ///
    /// Only providers with a positive score are returned, best first. Ties
    /// keep catalog order regardless of whether scoring ran in parallel.
    pub fn match_parsed(&self, query: &Query) -> MatchResult {
        let start = Instant::now();

        let providers = if query.is_actionable() {
            self.rank(query)
        } else {
            tracing::debug!("query has no actionable terms; skipping scoring");
            Vec::new()
        };

        let latency = start.elapsed();
        tracing::debug!(
            catalog = self.catalog.len(),
            hits = providers.len(),
            latency_us = latency.as_micros() as u64,
            "matched query against catalog"
        );
        if let Some(recorder) = &self.metrics {
            recorder.record_match(query.term_count(), latency, providers.len());
        }

        MatchResult {
            parsed_query: query.clone(),
            providers,
        }
    }

    fn rank(&self, query: &Query) -> Vec<ScoredProvider> {
        let scores = self.score_all(query);

        let mut hits: Vec<ScoredProvider> = self
            .catalog
            .iter()
            .zip(scores)
            .filter(|(_, result)| result.score > 0.0)
            .map(|(provider, result)| {
                ScoredProvider::from_provider(
                    provider,
                    result.score,
                    result.explanation,
                    self.config.explain,
                )
            })
            .collect();

        // `sort_by` is stable, so equal scores keep catalog order.
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        if let Some(max) = self.config.max_results {
            hits.truncate(max);
        }
        hits
    }

    /// Scores in catalog order. Parallel collection preserves indices.
    fn score_all(&self, query: &Query) -> Vec<ProviderScore> {
        let providers: &[Provider] = self.catalog.providers();
        if self.config.parallel && providers.len() >= self.config.parallel_threshold {
            providers
                .par_iter()
                .map(|p| score_provider(p, query))
                .collect()
        } else {
            providers.iter().map(|p| score_provider(p, query)).collect()
        }
    }
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matcher")
            .field("providers", &self.catalog.len())
            .field("config", &self.config)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}
