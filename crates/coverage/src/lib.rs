//! # climatch Coverage (`coverage`)
//!
//! Ranks (provider, model) pairs by how much of a request's sector, region
//! and year window their stored observations cover.
//!
//! - [`ObservationStore`]: async seam to the aggregated-observations store.
//!   [`InMemoryObservationStore`] is the bundled implementation.
//! - [`CoverageMetricsComputer`]: one bounded store call per request.
//! - [`score_candidates`]: composite 0-100 score, best first.
//! - [`RecommendationService`]: defaults, ranking and `top_n` truncation.
//!
//! ```
//! use coverage::{CoverageMetric, score_candidates};
//!
//! let ranked = score_candidates(&[CoverageMetric {
//!     provider: "IIASA".into(),
//!     model: "MESSAGE-GLOBIOM".into(),
//!     variable_coverage_count: 12,
//!     region_coverage_count: 4,
//!     min_year: 2020,
//!     max_year: 2050,
//! }]);
//! assert_eq!(ranked[0].score, 95);
//! assert_eq!(ranked[0].details, "12 variables, 2020-2050");
//! ```
//!
//! Store failures and timeouts surface as [`CoverageError`]; they are never
//! turned into an empty candidate list.

pub mod compute;
pub mod error;
pub mod ranker;
pub mod recommend;
pub mod store;
pub mod types;

pub use crate::compute::{CoverageMetricsComputer, DEFAULT_STORE_TIMEOUT};
pub use crate::error::{CoverageError, StoreError};
pub use crate::ranker::{
    score_candidates, RankingWeights, DATA_QUALITY_BONUS, FULL_TIME_SPAN_YEARS, RANKING_WEIGHTS,
};
pub use crate::recommend::{CoverageConfig, RecommendRequest, RecommendationService, Recommendations};
pub use crate::store::{InMemoryObservationStore, Observation, ObservationStore};
pub use crate::types::{CoverageFilter, CoverageMetric, ScoredCandidate, ALL_SECTORS, GLOBAL_REGION};
