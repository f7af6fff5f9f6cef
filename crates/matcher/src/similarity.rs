//! Graded string similarity shared by every scoring dimension.
//!
//! Both functions compare case-insensitively and return one of a handful of
//! fixed grades. The grades are part of the explanation contract and must not
//! be tuned per call.

/// Case-insensitive equality.
pub const EXACT: f64 = 1.0;
/// One string contains the other.
pub const CONTAINS: f64 = 0.8;
/// Only the leading segment of a piped variable matched, or the provider's
/// name is contained in the query token.
pub const PARTIAL: f64 = 0.5;
pub const NO_MATCH: f64 = 0.0;

/// Similarity used for regions and scenarios.
///
/// ```
/// use matcher::similarity::exact_or_substring;
///
/// assert_eq!(exact_or_substring("SSP2", "ssp2"), 1.0);
/// assert_eq!(exact_or_substring("SSP2", "SSP2-4.5"), 0.8);
/// assert_eq!(exact_or_substring("India", "World"), 0.0);
/// ```
pub fn exact_or_substring(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    if a == b {
        EXACT
    } else if a.contains(b.as_str()) || b.contains(a.as_str()) {
        CONTAINS
    } else {
        NO_MATCH
    }
}

/// Similarity between a query variable token and a provider variable.
///
/// Unlike [`exact_or_substring`] this is directional: a query token inside the
/// provider's name grades higher than the reverse.
pub fn variable_similarity(query_var: &str, provider_var: &str) -> f64 {
    let qv = query_var.to_lowercase();
    let pv = provider_var.to_lowercase();

    if qv == pv {
        return EXACT;
    }
    if pv.contains(qv.as_str()) {
        return CONTAINS;
    }
    let head = qv.split('|').next().unwrap_or_default();
    if pv.contains(head) || qv.contains(pv.as_str()) {
        return PARTIAL;
    }
    NO_MATCH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_ignores_case() {
        assert_eq!(exact_or_substring("Europe", "EUROPE"), EXACT);
    }

    #[test]
    fn substring_works_both_ways() {
        assert_eq!(exact_or_substring("SSP1", "SSP1-1.9"), CONTAINS);
        assert_eq!(exact_or_substring("SSP1-1.9", "ssp1"), CONTAINS);
    }

    #[test]
    fn world_does_not_contain_india() {
        assert_eq!(exact_or_substring("India", "World"), NO_MATCH);
    }

    #[test]
    fn variable_exact_is_one() {
        assert_eq!(variable_similarity("gdp|ppp", "GDP|PPP"), EXACT);
        assert_eq!(variable_similarity("co2", "co2"), EXACT);
    }

    #[test]
    fn variable_contained_in_provider() {
        assert_eq!(variable_similarity("gdp", "GDP|PPP"), CONTAINS);
        assert_eq!(variable_similarity("emissions|co2", "Emissions|CO2|Energy"), CONTAINS);
    }

    #[test]
    fn variable_head_segment_matches() {
        assert_eq!(variable_similarity("gdp|mer", "GDP|PPP"), PARTIAL);
    }

    #[test]
    fn provider_contained_in_query() {
        assert_eq!(variable_similarity("population|urban", "population"), PARTIAL);
        assert_eq!(variable_similarity("co2_per_capita", "co2"), PARTIAL);
    }

    #[test]
    fn unrelated_variables_score_zero() {
        assert_eq!(variable_similarity("population", "gdp|ppp"), NO_MATCH);
    }
}
