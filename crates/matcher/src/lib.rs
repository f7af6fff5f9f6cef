//! # climatch Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` finds which climate-scenario data providers can satisfy a
//! free-text data request and ranks them with an explainable score. It sits
//! on top of the query layer (`query`), which turns text into a structured
//! [`Query`], and a provider [`Catalog`] produced by an external builder.
//!
//! ## Core Types
//!
//! - [`Catalog`] / [`Provider`]: schema-checked, read-only provider entries.
//! - [`similarity`]: the graded exact/substring similarity functions.
//! - [`score_provider`]: scores one provider; returns a [`ProviderScore`]
//!   carrying a [`MatchExplanation`] unless the region gate rejected it.
//! - [`Matcher`]: scores a whole catalog, filters zero scores and sorts.
//! - [`MatchConfig`]: parallelism, result cap and explanation toggle.
//! - [`ProviderNotes`]: license and unit annotations that do not affect the
//!   score.
//!
//! ## Example Usage
//!
//! ```
//! use matcher::{Catalog, Matcher};
//!
//! let catalog = Catalog::from_json_str(r#"{"providers": [{
//!     "id": "iiasa_ssp",
//!     "variables": ["GDP|PPP"],
//!     "scenarios": ["SSP2"],
//!     "regions": ["India", "World"],
//!     "granularity": "annual",
//!     "years": {"min": 2010, "max": 2100}
//! }]}"#).unwrap();
//!
//! let matcher = Matcher::new(catalog);
//! let result = matcher.match_query("ssp2 gdp|ppp india 2020 2050 annual");
//!
//! assert_eq!(result.providers.len(), 1);
//! assert!((result.providers[0].score - 0.85).abs() < 1e-9);
//! ```
//!
//! ## Observability
//!
//! Hand a [`MatchMetrics`] implementation to [`Matcher::with_metrics`] to
//! record per-request latency and hit counts. Library code only emits
//! `tracing` events; installing a subscriber is up to the binary.

pub mod catalog;
pub mod engine;
pub mod metrics;
pub mod notes;
pub mod scorer;
pub mod similarity;
pub mod types;

#[doc(hidden)]
pub mod demo_utils;

pub use crate::catalog::{Catalog, CatalogError, Provider, YearRange};
pub use crate::engine::Matcher;
pub use crate::metrics::MatchMetrics;
pub use crate::notes::{license_openness, unit_compatibility, ProviderNotes, UnitCompatibility};
pub use crate::scorer::{
    score_provider, DimensionMatch, MatchExplanation, MatchedDimensions, ProviderScore, Weights,
    MATCH_WEIGHTS,
};
pub use crate::types::{MatchConfig, MatchError, MatchResult, ScoredProvider};
pub use query::{parse_query, Query};
