use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::compute::CoverageMetricsComputer;
use crate::error::CoverageError;
use crate::ranker::score_candidates;
use crate::store::ObservationStore;
use crate::types::{CoverageFilter, ScoredCandidate};

/// A provider recommendation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendRequest {
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub start_year: Option<i32>,
    #[serde(default)]
    pub end_year: Option<i32>,
    /// Variables of interest. Carried for callers; ranking is coverage-only.
    #[serde(default)]
    pub variables: Vec<String>,
}

/// Settings for the recommendation path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CoverageConfig {
    /// Deadline for the store call, in milliseconds.
    pub timeout_ms: u64,
    pub default_start_year: i32,
    pub default_end_year: i32,
    /// Number of candidates returned.
    pub top_n: usize,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5_000,
            default_start_year: 2020,
            default_end_year: 2050,
            top_n: 6,
        }
    }
}

impl CoverageConfig {
    pub fn validate(&self) -> Result<(), CoverageError> {
        if self.timeout_ms == 0 {
            return Err(CoverageError::InvalidConfig(
                "timeout_ms must be greater than zero".into(),
            ));
        }
        if self.top_n == 0 {
            return Err(CoverageError::InvalidConfig(
                "top_n must be greater than zero".into(),
            ));
        }
        if self.default_start_year > self.default_end_year {
            return Err(CoverageError::InvalidConfig(format!(
                "default_start_year ({}) must not be after default_end_year ({})",
                self.default_start_year, self.default_end_year
            )));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Ranked recommendation output.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recommendations {
    pub top_recommendation: Option<ScoredCandidate>,
    pub candidates: Vec<ScoredCandidate>,
    /// Candidates before truncation to `top_n`.
    pub total_candidates: usize,
}

/// Computes coverage, ranks it and keeps the best `top_n` candidates.
#[derive(Debug, Clone)]
pub struct RecommendationService {
    computer: CoverageMetricsComputer,
    config: CoverageConfig,
}

impl RecommendationService {
    pub fn new(store: Arc<dyn ObservationStore>, config: CoverageConfig) -> Result<Self, CoverageError> {
        config.validate()?;
        let computer = CoverageMetricsComputer::new(store).with_timeout(config.timeout());
        Ok(Self { computer, config })
    }

    pub fn config(&self) -> &CoverageConfig {
        &self.config
    }

    /// Build the coverage filter for `request`, filling in default years.
    pub fn filter_for(&self, request: &RecommendRequest) -> CoverageFilter {
        CoverageFilter {
            sector: request.sector.clone(),
            region: request.region.clone(),
            start_year: request.start_year.unwrap_or(self.config.default_start_year),
            end_year: request.end_year.unwrap_or(self.config.default_end_year),
        }
    }

    pub async fn recommend(&self, request: &RecommendRequest) -> Result<Recommendations, CoverageError> {
        let filter = self.filter_for(request);
        let metrics = self.computer.compute(&filter).await?;
        if metrics.is_empty() {
            debug!("no coverage for request");
            return Ok(Recommendations::default());
        }

        let mut candidates = score_candidates(&metrics);
        let total_candidates = candidates.len();
        candidates.truncate(self.config.top_n);
        let top_recommendation = candidates.first().cloned();

        info!(
            total_candidates,
            returned = candidates.len(),
            top_score = top_recommendation.as_ref().map(|c| c.score),
            "recommendations ranked"
        );

        Ok(Recommendations {
            top_recommendation,
            candidates,
            total_candidates,
        })
    }
}
