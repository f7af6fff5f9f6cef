//! Storage seam for aggregated scenario observations.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StoreError;
use crate::types::{CoverageFilter, CoverageMetric};

/// Source of per-(provider, model) coverage aggregates.
///
/// Implementations receive an already-normalized filter: `None` means the
/// dimension is unconstrained.
#[async_trait]
pub trait ObservationStore: Send + Sync {
    async fn aggregate_coverage(
        &self,
        filter: &CoverageFilter,
    ) -> Result<Vec<CoverageMetric>, StoreError>;
}

/// One scenario observation row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Observation {
    pub provider: String,
    pub model: String,
    pub variable: String,
    pub region: String,
    pub year: i32,
}

#[derive(Debug, Default, Deserialize)]
struct ObservationFile {
    #[serde(default)]
    observations: Vec<Observation>,
    #[serde(default)]
    variable_semantics: BTreeMap<String, Vec<String>>,
}

/// Observation rows held in memory, aggregated on each call.
#[derive(Debug, Clone, Default)]
pub struct InMemoryObservationStore {
    observations: Vec<Observation>,
    variable_semantics: HashMap<String, BTreeSet<String>>,
}

impl InMemoryObservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `{"observations": [...], "variable_semantics": {"var": ["Sector"]}}`.
    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        let file: ObservationFile = serde_json::from_str(json)?;
        Ok(Self::from_parts(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, StoreError> {
        let file: ObservationFile = serde_json::from_reader(reader)?;
        Ok(Self::from_parts(file))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    fn from_parts(file: ObservationFile) -> Self {
        let mut store = Self::new();
        for (variable, sectors) in file.variable_semantics {
            store.register_variable(variable, sectors);
        }
        store.observations = file.observations;
        store
    }

    /// Register a variable under zero or more sectors. Observations of
    /// unregistered variables never contribute to coverage.
    pub fn register_variable<I, S>(&mut self, variable: impl Into<String>, sectors: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variable_semantics
            .entry(variable.into())
            .or_default()
            .extend(sectors.into_iter().map(Into::into));
    }

    pub fn push(&mut self, observation: Observation) {
        self.observations.push(observation);
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    fn row_matches(&self, row: &Observation, filter: &CoverageFilter) -> bool {
        let Some(sectors) = self.variable_semantics.get(&row.variable) else {
            return false;
        };
        if let Some(sector) = filter.sector.as_deref() {
            if !sectors.contains(sector) {
                return false;
            }
        }
        if let Some(region) = filter.region.as_deref() {
            if row.region != region {
                return false;
            }
        }
        filter.contains_year(row.year)
    }

    /// Synchronous aggregation used by the async trait impl.
    pub fn aggregate(&self, filter: &CoverageFilter) -> Vec<CoverageMetric> {
        struct Group<'a> {
            provider: &'a str,
            model: &'a str,
            variables: HashSet<&'a str>,
            regions: HashSet<&'a str>,
            min_year: i32,
            max_year: i32,
        }

        let mut order: Vec<Group<'_>> = Vec::new();
        let mut index: HashMap<(&str, &str), usize> = HashMap::new();

        for row in self.observations.iter().filter(|r| self.row_matches(r, filter)) {
            let key = (row.provider.as_str(), row.model.as_str());
            let slot = *index.entry(key).or_insert_with(|| {
                order.push(Group {
                    provider: key.0,
                    model: key.1,
                    variables: HashSet::new(),
                    regions: HashSet::new(),
                    min_year: row.year,
                    max_year: row.year,
                });
                order.len() - 1
            });
            let group = &mut order[slot];
            group.variables.insert(row.variable.as_str());
            group.regions.insert(row.region.as_str());
            group.min_year = group.min_year.min(row.year);
            group.max_year = group.max_year.max(row.year);
        }

        debug!(
            rows = self.observations.len(),
            groups = order.len(),
            "aggregated in-memory coverage"
        );

        order
            .into_iter()
            .map(|g| CoverageMetric {
                provider: g.provider.to_string(),
                model: g.model.to_string(),
                variable_coverage_count: g.variables.len() as u32,
                region_coverage_count: g.regions.len() as u32,
                min_year: g.min_year,
                max_year: g.max_year,
            })
            .collect()
    }
}

#[async_trait]
impl ObservationStore for InMemoryObservationStore {
    async fn aggregate_coverage(
        &self,
        filter: &CoverageFilter,
    ) -> Result<Vec<CoverageMetric>, StoreError> {
        Ok(self.aggregate(filter))
    }
}
