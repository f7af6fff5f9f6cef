use query::Query;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{CatalogError, Provider};
use crate::notes::ProviderNotes;
use crate::scorer::MatchExplanation;

/// Configuration for a [`Matcher`](crate::Matcher).
///
/// Cheap to clone and serde-friendly so it can be embedded in higher-level
/// config files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchConfig {
    /// Score providers on the rayon pool when the catalog is large enough.
    #[serde(default = "MatchConfig::default_parallel")]
    pub parallel: bool,
    /// Minimum catalog size before scoring goes parallel.
    #[serde(default = "MatchConfig::default_parallel_threshold")]
    pub parallel_threshold: usize,
    /// Cap on returned providers; `None` returns every positive score.
    #[serde(default)]
    pub max_results: Option<usize>,
    /// Include per-dimension explanations in the result.
    #[serde(default = "MatchConfig::default_explain")]
    pub explain: bool,
}

impl MatchConfig {
    pub(crate) fn default_parallel() -> bool {
        true
    }

    pub(crate) fn default_parallel_threshold() -> usize {
        64
    }

    pub(crate) fn default_explain() -> bool {
        true
    }

    /// Sequential scoring, no cap, explanations on.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if self.parallel_threshold == 0 {
            return Err(MatchError::InvalidConfig(
                "parallel_threshold must be greater than zero".into(),
            ));
        }
        if self.max_results == Some(0) {
            return Err(MatchError::InvalidConfig(
                "max_results must be greater than zero when set".into(),
            ));
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            parallel: Self::default_parallel(),
            parallel_threshold: Self::default_parallel_threshold(),
            max_results: None,
            explain: Self::default_explain(),
        }
    }
}

/// A provider that survived scoring, with the fields callers need to act on
/// the match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredProvider {
    pub provider_id: String,
    pub score: f64,
    pub explanation: Option<MatchExplanation>,
    pub variables: Vec<String>,
    pub scenarios: Vec<String>,
    pub regions: Vec<String>,
    pub models: Vec<String>,
    pub latest_file: Option<String>,
    pub notes: ProviderNotes,
}

impl ScoredProvider {
    /// Notes are derived from the full explanation before `explain = false`
    /// drops it from the output.
    pub(crate) fn from_provider(
        provider: &Provider,
        score: f64,
        explanation: Option<MatchExplanation>,
        explain: bool,
    ) -> Self {
        let notes = ProviderNotes::for_match(provider, explanation.as_ref());
        let explanation = explanation.filter(|_| explain);
        Self {
            provider_id: provider.id.clone(),
            score,
            explanation,
            variables: provider.variables.clone(),
            scenarios: provider.scenarios.clone(),
            regions: provider.regions.clone(),
            models: provider.models.clone(),
            latest_file: provider.latest_file.clone(),
            notes,
        }
    }
}

/// Parsed query plus the ranked providers, best first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    #[serde(rename = "parsedQuery")]
    pub parsed_query: Query,
    pub providers: Vec<ScoredProvider>,
}

impl MatchResult {
    pub fn best(&self) -> Option<&ScoredProvider> {
        self.providers.first()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

/// Errors produced by the matching layer.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}
