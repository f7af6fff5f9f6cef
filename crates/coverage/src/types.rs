use serde::{Deserialize, Serialize};

use crate::error::CoverageError;

/// Sector value meaning "no sector filter".
pub const ALL_SECTORS: &str = "All Sectors";
/// Region value meaning "no region filter".
pub const GLOBAL_REGION: &str = "Global";

/// Filter parameters for one coverage aggregation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoverageFilter {
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    pub start_year: i32,
    pub end_year: i32,
}

impl CoverageFilter {
    pub fn new(start_year: i32, end_year: i32) -> Self {
        Self {
            sector: None,
            region: None,
            start_year,
            end_year,
        }
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Map the "match anything" spellings to `None`: blank values,
    /// [`ALL_SECTORS`] and [`GLOBAL_REGION`] (case-insensitive).
    pub fn normalized(&self) -> Self {
        Self {
            sector: non_wildcard(self.sector.as_deref(), ALL_SECTORS),
            region: non_wildcard(self.region.as_deref(), GLOBAL_REGION),
            start_year: self.start_year,
            end_year: self.end_year,
        }
    }

    pub fn validate(&self) -> Result<(), CoverageError> {
        if self.start_year > self.end_year {
            return Err(CoverageError::InvalidFilter(format!(
                "start_year ({}) must not be after end_year ({})",
                self.start_year, self.end_year
            )));
        }
        Ok(())
    }

    pub fn contains_year(&self, year: i32) -> bool {
        (self.start_year..=self.end_year).contains(&year)
    }
}

fn non_wildcard(value: Option<&str>, wildcard: &str) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(wildcard))
        .map(str::to_string)
}

/// Aggregated coverage of one (provider, model) pair within a filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoverageMetric {
    pub provider: String,
    pub model: String,
    pub variable_coverage_count: u32,
    pub region_coverage_count: u32,
    pub min_year: i32,
    pub max_year: i32,
}

/// A ranked coverage metric.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub metric: CoverageMetric,
    /// Composite score in `[0, 100]`.
    pub score: u8,
    /// `"<variables> variables, <min>-<max>"`.
    pub details: String,
}
