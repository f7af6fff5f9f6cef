//! Bridges matcher observations onto the `metrics` facade.
//!
//! Values only reach `/metrics` once [`install_prometheus`] has installed the
//! global recorder; before that the macros are no-ops.

use matcher::MatchMetrics;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

pub const MATCH_REQUESTS: &str = "climatch_match_requests_total";
pub const MATCH_LATENCY: &str = "climatch_match_latency_seconds";
pub const MATCH_HITS: &str = "climatch_match_hits";
pub const MATCH_QUERY_TERMS: &str = "climatch_match_query_terms";
pub const RECOMMEND_REQUESTS: &str = "climatch_recommend_requests_total";

/// [`MatchMetrics`] implementation that records through the `metrics` macros.
#[derive(Debug, Default, Clone, Copy)]
pub struct FacadeMatchMetrics;

impl MatchMetrics for FacadeMatchMetrics {
    fn record_match(&self, query_terms: usize, latency: Duration, hit_count: usize) {
        metrics::counter!(MATCH_REQUESTS).increment(1);
        metrics::histogram!(MATCH_LATENCY).record(latency.as_secs_f64());
        metrics::histogram!(MATCH_HITS).record(hit_count as f64);
        metrics::histogram!(MATCH_QUERY_TERMS).record(query_terms as f64);
    }
}

/// Count a recommendation request by outcome (`ok` or an error code).
pub fn record_recommendation(outcome: &'static str) {
    metrics::counter!(RECOMMEND_REQUESTS, "outcome" => outcome).increment(1);
}

/// Install the process-wide Prometheus recorder.
pub fn install_prometheus() -> anyhow::Result<PrometheusHandle> {
    Ok(PrometheusBuilder::new().install_recorder()?)
}
