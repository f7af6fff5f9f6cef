// Metrics hooks for the matcher.
//
// A `MatchMetrics` implementation is handed to `Matcher::with_metrics`; the
// matcher then reports per-request latency and hit counts for every call to
// `Matcher::match_query`. Keeps instrumentation decoupled from any specific
// metrics backend without a process-wide recorder.
use std::time::Duration;

/// Metrics observer for match operations.
pub trait MatchMetrics: Send + Sync {
    /// Record the outcome of a match.
    ///
    /// `query_terms` is the number of classified terms in the parsed query,
    /// `latency` the wall-clock time spent scoring and sorting, and
    /// `hit_count` the number of providers returned after filtering.
    fn record_match(&self, query_terms: usize, latency: Duration, hit_count: usize);
}
