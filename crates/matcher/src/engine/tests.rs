use super::*;
use std::sync::Mutex;
use std::time::Duration;

use crate::demo_utils::{provider, sample_catalog, synthetic_catalog};

const EPS: f64 = 1e-9;

fn ids(result: &MatchResult) -> Vec<&str> {
    result
        .providers
        .iter()
        .map(|p| p.provider_id.as_str())
        .collect()
}

#[derive(Default)]
struct RecordingMetrics {
    events: Mutex<Vec<(usize, usize)>>,
}

impl MatchMetrics for RecordingMetrics {
    fn record_match(&self, query_terms: usize, _latency: Duration, hit_count: usize) {
        self.events
            .lock()
            .expect("metrics lock")
            .push((query_terms, hit_count));
    }
}

#[test]
fn ranks_documented_query() {
    let matcher = Matcher::new(sample_catalog());
    let result = matcher.match_query("ssp2 gdp|ppp india 2020 2050 annual");

    assert_eq!(ids(&result), vec!["iiasa_ssp_v2023", "owid_co2_v2025"]);
    assert!((result.providers[0].score - 0.75).abs() < EPS);
    assert!((result.providers[1].score - 0.30).abs() < EPS);
    assert_eq!(result.parsed_query.regions, vec!["India"]);
}

#[test]
fn region_gated_providers_are_omitted() {
    let matcher = Matcher::new(sample_catalog());
    let result = matcher.match_query("gdp india");
    assert!(!ids(&result).contains(&"ngfs_phase4"));
    assert!(!ids(&result).contains(&"gcp_co2_v2024"));
}

#[test]
fn ties_keep_catalog_order() {
    let matcher = Matcher::new(sample_catalog());
    let result = matcher.match_query("co2");
    assert_eq!(
        ids(&result),
        vec![
            "owid_co2_v2025",
            "gcp_co2_v2024",
            "iiasa_ssp_v2023",
            "ngfs_phase4"
        ]
    );
    assert_eq!(result.providers[0].score, result.providers[1].score);
}

#[test]
fn region_only_query_returns_nothing() {
    // The gate passes but no positive criterion is earned.
    let matcher = Matcher::new(sample_catalog());
    assert!(matcher.match_query("india").is_empty());
}

#[test]
fn empty_query_yields_empty_result() {
    let metrics = Arc::new(RecordingMetrics::default());
    let matcher = Matcher::new(sample_catalog()).with_metrics(metrics.clone());
    let result = matcher.match_query("");
    assert!(result.is_empty());
    assert_eq!(result.parsed_query, Query::default());
    assert_eq!(*metrics.events.lock().expect("metrics lock"), vec![(0, 0)]);
}

#[test]
fn every_provider_scores_zero_for_empty_query() {
    let catalog = sample_catalog();
    let empty = Query::default();
    for p in catalog.iter() {
        assert_eq!(score_provider(p, &empty).score, 0.0);
    }
}

#[test]
fn world_does_not_satisfy_india() {
    let catalog = Catalog::new(vec![provider(
        "global-only",
        &["gdp"],
        &["SSP2"],
        &["World"],
        Some("annual"),
        (2000, 2100),
    )])
    .expect("catalog");
    let matcher = Matcher::new(catalog);
    assert!(matcher.match_query("gdp ssp2 india").is_empty());
    assert_eq!(matcher.match_query("gdp ssp2 world").providers.len(), 1);
}

#[test]
fn parallel_and_sequential_agree() {
    let catalog = Arc::new(synthetic_catalog(500));
    let parallel = Matcher::with_catalog_arc(catalog.clone())
        .with_config(MatchConfig {
            parallel: true,
            parallel_threshold: 1,
            ..MatchConfig::default()
        })
        .expect("valid config");
    let sequential = Matcher::with_catalog_arc(catalog)
        .with_config(MatchConfig::sequential())
        .expect("valid config");

    for text in ["ssp2 gdp india 2000 2050", "co2 world annual", "population ssp1 europe"] {
        assert_eq!(parallel.match_query(text), sequential.match_query(text));
    }
}

#[test]
fn results_are_sorted_descending() {
    let matcher = Matcher::new(synthetic_catalog(200));
    let result = matcher.match_query("ssp3 gdp|ppp emissions china 2000 2060 annual");
    assert!(!result.is_empty());
    for pair in result.providers.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn max_results_truncates() {
    let matcher = Matcher::new(sample_catalog())
        .with_config(MatchConfig {
            max_results: Some(1),
            ..MatchConfig::default()
        })
        .expect("valid config");
    let result = matcher.match_query("co2");
    assert_eq!(ids(&result), vec!["owid_co2_v2025"]);
}

#[test]
fn explain_off_strips_explanations_only() {
    let matcher = Matcher::new(sample_catalog())
        .with_config(MatchConfig {
            explain: false,
            ..MatchConfig::default()
        })
        .expect("valid config");
    let result = matcher.match_query("ssp2 gdp|ppp india 2020 2050 annual");
    assert_eq!(result.providers.len(), 2);
    assert!(result.providers.iter().all(|p| p.explanation.is_none()));
    assert!((result.providers[0].score - 0.75).abs() < EPS);
}

#[test]
fn explain_off_keeps_unit_notes() {
    let explained = Matcher::new(sample_catalog())
        .with_config(MatchConfig::sequential())
        .expect("valid config")
        .match_query("co2");
    let plain = Matcher::new(sample_catalog())
        .with_config(MatchConfig {
            explain: false,
            ..MatchConfig::sequential()
        })
        .expect("valid config")
        .match_query("co2");

    assert_eq!(explained.providers.len(), plain.providers.len());
    for (with, without) in explained.providers.iter().zip(&plain.providers) {
        assert!(without.explanation.is_none());
        assert_eq!(with.notes, without.notes);
        assert_eq!(without.notes.units.len(), 1);
    }
}

#[test]
fn invalid_config_is_rejected() {
    let err = Matcher::new(sample_catalog())
        .with_config(MatchConfig {
            max_results: Some(0),
            ..MatchConfig::default()
        })
        .expect_err("invalid config");
    assert!(matches!(err, MatchError::InvalidConfig(_)));
}

#[test]
fn scored_provider_carries_notes_and_denormalized_fields() {
    let matcher = Matcher::new(sample_catalog());
    let result = matcher.match_query("emissions|co2 world");
    let iiasa = result
        .providers
        .iter()
        .find(|p| p.provider_id == "iiasa_ssp_v2023")
        .expect("iiasa matched");

    assert_eq!(iiasa.models, vec!["MESSAGE-GLOBIOM", "REMIND-MAgPIE"]);
    assert_eq!(iiasa.notes.license_openness, 1.0);
    assert_eq!(iiasa.notes.units.len(), 1);
    assert_eq!(iiasa.notes.units[0].variable, "Emissions|CO2");
    assert_eq!(iiasa.notes.units[0].factor, Some(1e6));
}

#[test]
fn response_shape_matches_wire_contract() {
    let matcher = Matcher::new(sample_catalog());
    let json = serde_json::to_value(matcher.match_query("gdp|ppp india")).expect("json");

    assert!(json.get("parsedQuery").is_some());
    assert_eq!(json["parsedQuery"]["granularity"], serde_json::Value::Null);
    let first = &json["providers"][0];
    assert_eq!(first["provider_id"], "iiasa_ssp_v2023");
    assert!(first["explanation"]["matched"]["regions"].is_array());
    assert!(first["explanation"]["missing"].is_array());
}

#[test]
fn loads_catalog_from_file() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"{{"providers": [{{"id": "p1", "variables": ["gdp"], "scenarios": [], "regions": ["World"], "years": {{"min": 2000, "max": 2100}}}}]}}"#
    )
    .expect("write catalog");

    let matcher = Matcher::from_catalog_file(file.path()).expect("matcher");
    assert_eq!(matcher.catalog().len(), 1);
    assert_eq!(ids(&matcher.match_query("gdp")), vec!["p1"]);

    let missing = Matcher::from_catalog_file("/no/such/catalog.json").expect_err("missing file");
    assert!(matches!(missing, MatchError::Catalog(_)));
}
