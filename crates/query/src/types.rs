use serde::{Deserialize, Serialize};

/// Structured form of a free-text data request.
///
/// Produced by [`parse_query`](crate::parse_query) and never mutated
/// afterwards. `variables` and `scenarios` keep token order and duplicates.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Query {
    /// Variable tokens, lower-cased (`gdp`, `emissions|co2`).
    #[serde(default)]
    pub variables: Vec<String>,
    /// Canonical region names (`India`, `Europe`).
    #[serde(default)]
    pub regions: Vec<String>,
    /// Upper-cased scenario identifiers (`SSP2`, `SSP1-2.6`).
    #[serde(default)]
    pub scenarios: Vec<String>,
    /// Requested temporal resolution, if any.
    #[serde(default)]
    pub granularity: Option<String>,
    #[serde(default)]
    pub start_year: Option<i32>,
    #[serde(default)]
    pub end_year: Option<i32>,
}

impl Query {
    /// `false` when no field carries anything a scorer could act on.
    pub fn is_actionable(&self) -> bool {
        !self.variables.is_empty()
            || !self.regions.is_empty()
            || !self.scenarios.is_empty()
            || self.granularity.is_some()
            || self.start_year.is_some()
            || self.end_year.is_some()
    }

    /// Both ends of the requested year window, when the query names one.
    pub fn year_window(&self) -> Option<(i32, i32)> {
        match (self.start_year, self.end_year) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    /// Number of classified terms, used for request summaries.
    pub fn term_count(&self) -> usize {
        self.variables.len()
            + self.regions.len()
            + self.scenarios.len()
            + usize::from(self.granularity.is_some())
            + usize::from(self.start_year.is_some())
            + usize::from(self.end_year.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_query_is_not_actionable() {
        let q = Query::default();
        assert!(!q.is_actionable());
        assert_eq!(q.term_count(), 0);
        assert_eq!(q.year_window(), None);
    }

    #[test]
    fn single_year_gives_no_window() {
        let q = Query {
            start_year: Some(2020),
            ..Default::default()
        };
        assert!(q.is_actionable());
        assert_eq!(q.year_window(), None);
    }

    #[test]
    fn serializes_unset_fields_as_null() {
        let json = serde_json::to_value(Query::default()).expect("serialize");
        assert_eq!(json["granularity"], serde_json::Value::Null);
        assert_eq!(json["start_year"], serde_json::Value::Null);
        assert_eq!(json["variables"], serde_json::json!([]));
    }
}
