use tracing::debug;

use crate::types::{CoverageMetric, ScoredCandidate};

/// Weights of the coverage ranking formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingWeights {
    pub variables: f64,
    pub regions: f64,
    pub time_span: f64,
    pub quality: f64,
}

pub const RANKING_WEIGHTS: RankingWeights = RankingWeights {
    variables: 0.4,
    regions: 0.3,
    time_span: 0.2,
    quality: 0.1,
};

/// Year span that earns the full time score.
pub const FULL_TIME_SPAN_YEARS: f64 = 30.0;

/// Fixed data-quality term. Every candidate gets the same value, so it only
/// shifts scores; there is no per-provider quality signal yet.
pub const DATA_QUALITY_BONUS: f64 = 0.5;

/// Score and sort coverage metrics, best first.
///
/// Variable and region counts are normalized against the best candidate in
/// `metrics`. The sort is stable, so equal scores keep input order.
pub fn score_candidates(metrics: &[CoverageMetric]) -> Vec<ScoredCandidate> {
    let max_vars = metrics
        .iter()
        .map(|m| m.variable_coverage_count)
        .max()
        .filter(|&n| n > 0)
        .unwrap_or(1);
    let max_regions = metrics
        .iter()
        .map(|m| m.region_coverage_count)
        .max()
        .filter(|&n| n > 0)
        .unwrap_or(1);

    let mut scored: Vec<ScoredCandidate> = metrics
        .iter()
        .map(|m| {
            let var_score = f64::from(m.variable_coverage_count) / f64::from(max_vars);
            let reg_score = f64::from(m.region_coverage_count) / f64::from(max_regions);
            let span = f64::from(m.max_year) - f64::from(m.min_year);
            let time_score = (span / FULL_TIME_SPAN_YEARS).clamp(0.0, 1.0);

            let raw = RANKING_WEIGHTS.variables * var_score
                + RANKING_WEIGHTS.regions * reg_score
                + RANKING_WEIGHTS.time_span * time_score
                + RANKING_WEIGHTS.quality * DATA_QUALITY_BONUS;

            ScoredCandidate {
                metric: m.clone(),
                score: to_percent(raw),
                details: format!(
                    "{} variables, {}-{}",
                    m.variable_coverage_count, m.min_year, m.max_year
                ),
            }
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    debug!(candidates = scored.len(), max_vars, max_regions, "ranked coverage candidates");
    scored
}

fn to_percent(raw: f64) -> u8 {
    (raw * 100.0).round_ties_even().clamp(0.0, 100.0) as u8
}
