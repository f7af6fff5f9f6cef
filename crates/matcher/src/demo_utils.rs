//! Fixtures shared by tests, benches and demos.

use std::collections::BTreeMap;

use crate::catalog::{Catalog, Provider, YearRange};

/// Build a provider with only the fields scoring looks at.
pub fn provider(
    id: &str,
    variables: &[&str],
    scenarios: &[&str],
    regions: &[&str],
    granularity: Option<&str>,
    years: (i32, i32),
) -> Provider {
    Provider {
        id: id.to_string(),
        name: None,
        variables: variables.iter().map(|s| s.to_string()).collect(),
        scenarios: scenarios.iter().map(|s| s.to_string()).collect(),
        regions: regions.iter().map(|s| s.to_string()).collect(),
        granularity: granularity.map(str::to_string),
        years: YearRange::new(years.0, years.1),
        unit: BTreeMap::new(),
        license: None,
        models: Vec::new(),
        latest_file: None,
    }
}

/// A small catalog resembling what the catalog builder emits.
pub fn sample_catalog() -> Catalog {
    let mut iiasa = provider(
        "iiasa_ssp_v2023",
        &["GDP|PPP", "Population", "Emissions|CO2"],
        &["SSP1", "SSP2", "SSP3", "SSP5"],
        &["World", "India", "China", "Europe"],
        Some("5-year"),
        (2010, 2100),
    );
    iiasa.models = vec!["MESSAGE-GLOBIOM".into(), "REMIND-MAgPIE".into()];
    iiasa.license = Some("CC-BY-4.0".into());
    iiasa.unit.insert("Emissions|CO2".into(), "MtCO2/yr".into());

    let mut owid = provider(
        "owid_co2_v2025",
        &["co2", "co2_per_capita", "population", "gdp"],
        &[],
        &["World", "Europe", "Germany", "India"],
        Some("annual"),
        (1750, 2023),
    );
    owid.unit.insert("co2".into(), "tonnes/yr".into());
    owid.license = Some("Our World in Data (open access)".into());

    let ngfs = provider(
        "ngfs_phase4",
        &["GDP|MER", "Emissions|CO2|Energy"],
        &["SSP2-4.5", "Net Zero 2050"],
        &["World", "USA", "Germany"],
        Some("5-year"),
        (2020, 2100),
    );

    let gcp = provider(
        "gcp_co2_v2024",
        &["CO2"],
        &[],
        &["World"],
        Some("annual"),
        (1959, 2022),
    );

    Catalog::new(vec![iiasa, owid, ngfs, gcp]).expect("sample catalog is valid")
}

/// `count` synthetic providers, for parallel-vs-sequential and bench runs.
pub fn synthetic_catalog(count: usize) -> Catalog {
    const REGIONS: &[&str] = &["World", "India", "China", "Usa", "Europe", "Germany"];
    const VARIABLES: &[&str] = &["GDP|PPP", "Population", "Emissions|CO2", "co2", "gdp"];
    const SCENARIOS: &[&str] = &["SSP1", "SSP2", "SSP3", "SSP4", "SSP5"];

    let providers = (0..count)
        .map(|i| {
            let pick = |pool: &[&str], n: usize| -> Vec<String> {
                (0..n).map(|k| pool[(i + k) % pool.len()].to_string()).collect()
            };
            let mut p = provider(
                &format!("provider-{i:05}"),
                &[],
                &[],
                &[],
                Some(if i % 2 == 0 { "annual" } else { "5-year" }),
                (1990 + (i % 30) as i32, 2050 + (i % 60) as i32),
            );
            p.variables = pick(VARIABLES, 1 + i % 3);
            p.scenarios = pick(SCENARIOS, 1 + i % 4);
            p.regions = pick(REGIONS, 1 + i % 2);
            p
        })
        .collect();

    Catalog::new(providers).expect("synthetic ids are unique")
}
