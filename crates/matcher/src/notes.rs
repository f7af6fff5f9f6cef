//! Informational annotations attached to scored providers.
//!
//! Nothing here feeds the match score. Callers use these to show how open a
//! provider's license is and whether the units of matched variables convert
//! to tonnes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Provider;
use crate::scorer::MatchExplanation;

/// License keywords checked in order; the first substring hit decides.
const LICENSE_KEYWORDS: &[(&str, f64)] = &[
    ("open", 1.0),
    ("cc-by", 1.0),
    ("cc-by-4.0", 1.0),
    ("free", 1.0),
    ("registration", 0.5),
    ("restricted", 0.0),
    ("closed", 0.0),
];

/// Units with a known conversion factor to tonnes.
const UNIT_FACTORS: &[(&str, f64)] = &[
    ("t", 1.0),
    ("tonne", 1.0),
    ("tonnes", 1.0),
    ("tonnes/yr", 1.0),
    ("tonnes yr-1", 1.0),
    ("tonnes co2/yr", 1.0),
    ("mtco2", 1e6),
    ("mtco2/yr", 1e6),
];

/// Openness of a license string in `[0, 1]`. Missing licenses score 0.
pub fn license_openness(license: Option<&str>) -> f64 {
    let Some(license) = license else {
        return 0.0;
    };
    let s = license.to_lowercase();
    if let Some((_, score)) = LICENSE_KEYWORDS.iter().find(|(k, _)| s.contains(k)) {
        return *score;
    }
    if s.contains("cc") || s.contains("creative commons") || s.contains("public domain") {
        return 1.0;
    }
    if s.contains("login") {
        return 0.5;
    }
    0.0
}

/// Unit information for one provider variable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnitCompatibility {
    pub variable: String,
    pub compatible: bool,
    /// Multiplier that converts the dataset unit to tonnes.
    pub factor: Option<f64>,
    pub dataset_unit: Option<String>,
}

/// Look up `variable` in `unit_map` and check it against the known units.
///
/// The lookup tries the exact name, then the lower-cased name; a map with a
/// single entry is assumed to apply to every variable.
pub fn unit_compatibility(unit_map: &BTreeMap<String, String>, variable: &str) -> UnitCompatibility {
    let dataset_unit = unit_map
        .get(variable)
        .or_else(|| unit_map.get(&variable.to_lowercase()))
        .or_else(|| {
            if unit_map.len() == 1 {
                unit_map.values().next()
            } else {
                None
            }
        })
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty());

    let factor = dataset_unit.as_deref().and_then(|unit| {
        let unit = unit.to_lowercase();
        UNIT_FACTORS
            .iter()
            .find(|(known, _)| *known == unit)
            .map(|(_, factor)| *factor)
    });

    UnitCompatibility {
        variable: variable.to_string(),
        compatible: factor.is_some(),
        factor,
        dataset_unit,
    }
}

/// Annotations for a provider that passed scoring.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProviderNotes {
    pub license_openness: f64,
    /// One entry per distinct matched provider variable.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub units: Vec<UnitCompatibility>,
}

impl ProviderNotes {
    pub fn for_match(provider: &Provider, explanation: Option<&MatchExplanation>) -> Self {
        let mut units: Vec<UnitCompatibility> = Vec::new();
        if let Some(explanation) = explanation {
            for m in &explanation.matched.variables {
                if units.iter().any(|u| u.variable == m.provider) {
                    continue;
                }
                units.push(unit_compatibility(&provider.unit, &m.provider));
            }
        }
        Self {
            license_openness: license_openness(provider.license.as_deref()),
            units,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn license_keywords() {
        assert_eq!(license_openness(Some("CC-BY-4.0")), 1.0);
        assert_eq!(license_openness(Some("open")), 1.0);
        assert_eq!(license_openness(Some("Requires registration")), 0.5);
        assert_eq!(license_openness(Some("user login needed")), 0.5);
        assert_eq!(license_openness(Some("restricted")), 0.0);
        assert_eq!(license_openness(Some("Public Domain")), 1.0);
        assert_eq!(license_openness(Some("proprietary")), 0.0);
        assert_eq!(license_openness(None), 0.0);
    }

    #[test]
    fn unit_lookup_by_name_then_lowercase() {
        let map = units(&[("co2", "tonnes/yr"), ("ch4", "kt CH4/yr")]);
        let exact = unit_compatibility(&map, "co2");
        assert!(exact.compatible);
        assert_eq!(exact.factor, Some(1.0));

        let lowered = unit_compatibility(&map, "CO2");
        assert_eq!(lowered.dataset_unit.as_deref(), Some("tonnes/yr"));

        let unknown = unit_compatibility(&map, "ch4");
        assert!(!unknown.compatible);
        assert_eq!(unknown.dataset_unit.as_deref(), Some("kt CH4/yr"));
    }

    #[test]
    fn single_unit_map_applies_to_everything() {
        let map = units(&[("CO2", "MtCO2/yr")]);
        let note = unit_compatibility(&map, "Emissions|CO2");
        assert_eq!(note.factor, Some(1e6));
    }

    #[test]
    fn missing_unit_is_incompatible() {
        let note = unit_compatibility(&BTreeMap::new(), "gdp");
        assert!(!note.compatible);
        assert_eq!(note.dataset_unit, None);
    }
}
