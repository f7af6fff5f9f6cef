//! Scoring of a single provider against a parsed query.
//!
//! The score is a weighted sum over five dimensions:
//!
//! | dimension   | weight | rule |
//! |-------------|--------|------|
//! | regions     | gate   | no region overlap rejects the provider outright |
//! | variables   | 0.40   | mean of per-token best [`variable_similarity`] |
//! | scenarios   | 0.25   | sum of every positive pair / number of query scenarios |
//! | granularity | 0.10   | exact, case-sensitive equality |
//! | years       | 0.10   | provider span fully contains the requested window |
//!
//! Weights add up to 0.85 and are not renormalised; the score ranks
//! providers against each other and is not a probability.

use query::Query;
use serde::{Deserialize, Serialize};

use crate::catalog::Provider;
use crate::similarity::{exact_or_substring, variable_similarity};

/// Per-dimension weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub variables: f64,
    pub scenarios: f64,
    pub granularity: f64,
    pub temporal: f64,
}

pub const MATCH_WEIGHTS: Weights = Weights {
    variables: 0.40,
    scenarios: 0.25,
    granularity: 0.10,
    temporal: 0.10,
};

/// One matched (query value, provider value) pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DimensionMatch {
    pub query: String,
    pub provider: String,
    pub similarity: f64,
}

/// Matched pairs per dimension. Empty dimensions are omitted on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MatchedDimensions {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<DimensionMatch>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<DimensionMatch>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scenarios: Vec<DimensionMatch>,
}

/// Why a provider earned its score.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MatchExplanation {
    pub matched: MatchedDimensions,
    /// Dimensions the query asked for that matched nothing.
    pub missing: Vec<String>,
}

/// Result of [`score_provider`]. `explanation` is `None` only when the
/// region gate rejected the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderScore {
    pub score: f64,
    pub explanation: Option<MatchExplanation>,
}

impl ProviderScore {
    fn rejected() -> Self {
        Self {
            score: 0.0,
            explanation: None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.explanation.is_none()
    }
}

/// Score `provider` against `query`. Pure; never fails.
pub fn score_provider(provider: &Provider, query: &Query) -> ProviderScore {
    let mut matched = MatchedDimensions::default();

    if !query.regions.is_empty() {
        matched.regions = all_positive_pairs(&query.regions, &provider.regions);
        if matched.regions.is_empty() {
            tracing::trace!(provider = %provider.id, "rejected by region gate");
            return ProviderScore::rejected();
        }
    }

    let mut score = 0.0;

    let (variable_mean, variable_matches) = score_variables(&query.variables, &provider.variables);
    score += variable_mean * MATCH_WEIGHTS.variables;
    matched.variables = variable_matches;

    matched.scenarios = all_positive_pairs(&query.scenarios, &provider.scenarios);
    if !query.scenarios.is_empty() {
        let total: f64 = matched.scenarios.iter().map(|m| m.similarity).sum();
        score += total / query.scenarios.len() as f64 * MATCH_WEIGHTS.scenarios;
    }

    if let (Some(wanted), Some(offered)) = (&query.granularity, &provider.granularity) {
        if wanted == offered {
            score += MATCH_WEIGHTS.granularity;
        }
    }

    if let Some((start, end)) = query.year_window() {
        if provider.years.covers(start, end) {
            score += MATCH_WEIGHTS.temporal;
        }
    }

    let mut missing = Vec::new();
    if !query.variables.is_empty() && matched.variables.is_empty() {
        missing.push("variables".to_string());
    }
    if !query.regions.is_empty() && matched.regions.is_empty() {
        missing.push("regions".to_string());
    }
    if !query.scenarios.is_empty() && matched.scenarios.is_empty() {
        missing.push("scenarios".to_string());
    }

    ProviderScore {
        score,
        explanation: Some(MatchExplanation { matched, missing }),
    }
}

/// Mean of per-token best similarities over every query token, plus the
/// tokens that matched something.
fn score_variables(wanted: &[String], offered: &[String]) -> (f64, Vec<DimensionMatch>) {
    if wanted.is_empty() {
        return (0.0, Vec::new());
    }

    let mut total = 0.0;
    let mut matches = Vec::new();
    for qv in wanted {
        let mut best = 0.0;
        let mut best_provider: Option<&String> = None;
        for pv in offered {
            let sim = variable_similarity(qv, pv);
            if sim > best {
                best = sim;
                best_provider = Some(pv);
            }
        }
        if let Some(pv) = best_provider {
            total += best;
            matches.push(DimensionMatch {
                query: qv.clone(),
                provider: pv.clone(),
                similarity: best,
            });
        }
    }

    (total / wanted.len() as f64, matches)
}

fn all_positive_pairs(wanted: &[String], offered: &[String]) -> Vec<DimensionMatch> {
    let mut pairs = Vec::new();
    for q in wanted {
        for p in offered {
            let sim = exact_or_substring(q, p);
            if sim > 0.0 {
                pairs.push(DimensionMatch {
                    query: q.clone(),
                    provider: p.clone(),
                    similarity: sim,
                });
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::YearRange;
    use query::parse_query;
    use std::collections::BTreeMap;

    const EPS: f64 = 1e-9;

    fn provider() -> Provider {
        Provider {
            id: "iiasa".into(),
            name: None,
            variables: vec!["GDP|PPP".into(), "Population".into()],
            scenarios: vec!["SSP1".into(), "SSP2".into(), "SSP2-4.5".into()],
            regions: vec!["World".into(), "India".into()],
            granularity: Some("annual".into()),
            years: YearRange::new(2000, 2100),
            unit: BTreeMap::new(),
            license: None,
            models: vec![],
            latest_file: None,
        }
    }

    #[test]
    fn region_gate_rejects_without_overlap() {
        let mut p = provider();
        p.regions = vec!["World".into()];
        let result = score_provider(&p, &parse_query("india gdp|ppp ssp2"));
        assert_eq!(result.score, 0.0);
        assert!(result.explanation.is_none());
        assert!(result.is_rejected());
    }

    #[test]
    fn region_gate_is_skipped_without_regions() {
        let result = score_provider(&provider(), &parse_query("gdp|ppp"));
        assert!((result.score - 0.40).abs() < EPS);
        let explanation = result.explanation.expect("explanation");
        assert!(explanation.matched.regions.is_empty());
    }

    #[test]
    fn full_match_sums_every_dimension() {
        let q = parse_query("ssp1 gdp|ppp india 2020 2050 annual");
        let result = score_provider(&provider(), &q);
        // variables 1.0*0.40 + scenarios 1.0*0.25 (SSP1 exact) + 0.10 + 0.10
        assert!((result.score - 0.85).abs() < EPS, "score {}", result.score);
        let explanation = result.explanation.expect("explanation");
        assert_eq!(explanation.matched.regions.len(), 1);
        assert_eq!(explanation.matched.variables[0].provider, "GDP|PPP");
        assert!(explanation.missing.is_empty());
    }

    #[test]
    fn scenario_score_sums_all_positive_pairs() {
        // SSP2 matches "SSP2" (1.0) and "SSP2-4.5" (0.8).
        let q = parse_query("ssp2");
        let result = score_provider(&provider(), &q);
        assert!((result.score - 1.8 * 0.25).abs() < EPS);
        assert_eq!(result.explanation.expect("explanation").matched.scenarios.len(), 2);
    }

    #[test]
    fn variable_mean_counts_unmatched_tokens() {
        // gdp -> 0.8, emissions -> 0.0
        let q = parse_query("gdp emissions");
        let result = score_provider(&provider(), &q);
        assert!((result.score - 0.4 * 0.40).abs() < EPS);
        let explanation = result.explanation.expect("explanation");
        assert_eq!(explanation.matched.variables.len(), 1);
        assert!(explanation.missing.is_empty());
    }

    #[test]
    fn unmatched_dimensions_are_listed_as_missing() {
        let q = parse_query("co2 ssp5");
        let result = score_provider(&provider(), &q);
        assert_eq!(result.score, 0.0);
        let explanation = result.explanation.expect("explanation");
        assert_eq!(explanation.missing, vec!["variables", "scenarios"]);
    }

    #[test]
    fn temporal_bonus_needs_full_containment() {
        let inside = score_provider(&provider(), &parse_query("2020 2050"));
        assert!((inside.score - 0.10).abs() < EPS);

        let partial = score_provider(&provider(), &parse_query("1990 2050"));
        assert_eq!(partial.score, 0.0);

        let single = score_provider(&provider(), &parse_query("2020"));
        assert_eq!(single.score, 0.0);
    }

    #[test]
    fn granularity_is_case_sensitive_and_optional() {
        let mut p = provider();
        p.granularity = Some("Annual".into());
        assert_eq!(score_provider(&p, &parse_query("annual")).score, 0.0);

        p.granularity = None;
        assert_eq!(score_provider(&p, &parse_query("annual")).score, 0.0);
    }

    #[test]
    fn empty_query_scores_zero() {
        let result = score_provider(&provider(), &parse_query(""));
        assert_eq!(result.score, 0.0);
        let explanation = result.explanation.expect("explanation");
        assert!(explanation.missing.is_empty());
    }

    #[test]
    fn duplicate_tokens_weigh_twice() {
        // gdp (0.8) twice and emissions (0.0) once: mean 1.6 / 3.
        let q = parse_query("gdp gdp emissions");
        let result = score_provider(&provider(), &q);
        assert!((result.score - (1.6 / 3.0) * 0.40).abs() < EPS);
    }

    #[test]
    fn explanation_omits_empty_dimensions_on_the_wire() {
        let result = score_provider(&provider(), &parse_query("gdp"));
        let json = serde_json::to_value(result.explanation.expect("explanation")).expect("json");
        assert!(json["matched"].get("variables").is_some());
        assert!(json["matched"].get("regions").is_none());
        assert_eq!(json["missing"], serde_json::json!([]));
    }
}
