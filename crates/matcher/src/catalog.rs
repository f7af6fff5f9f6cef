//! Provider catalog loading and validation.
//!
//! The catalog is produced by an external builder as
//! `{"providers": [{ "id": .., "variables": [..], .. }, ..]}`. Every entry is
//! checked structurally at load time; optional descriptive fields that are
//! present but malformed (`granularity`, `unit`, `license`) are tolerated and
//! read as absent, so they simply cannot match.

use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Errors raised while loading a catalog. All of them are fatal.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid provider at index {index}: {reason}")]
    InvalidProvider { index: usize, reason: String },
    #[error("duplicate provider id: {0}")]
    DuplicateId(String),
}

/// Inclusive span of years a provider has data for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Full containment of `[start, end]`; partial overlap does not count.
    pub fn covers(&self, start: i32, end: i32) -> bool {
        self.min <= start && self.max >= end
    }
}

/// A single catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Provider {
    pub id: String,
    /// Display name; opaque to scoring.
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    pub variables: Vec<String>,
    pub scenarios: Vec<String>,
    pub regions: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub granularity: Option<String>,
    pub years: YearRange,
    /// Variable name to unit string.
    #[serde(default, deserialize_with = "lenient_unit_map")]
    pub unit: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub license: Option<String>,
    #[serde(default)]
    pub models: Vec<String>,
    /// Reference to the provider's latest canonical file; opaque to scoring.
    #[serde(default, deserialize_with = "lenient_string")]
    pub latest_file: Option<String>,
}

impl Provider {
    fn validate(&self, index: usize) -> Result<(), CatalogError> {
        if self.id.trim().is_empty() {
            return Err(CatalogError::InvalidProvider {
                index,
                reason: "id must not be empty".into(),
            });
        }
        if self.years.min > self.years.max {
            return Err(CatalogError::InvalidProvider {
                index,
                reason: format!(
                    "years.min ({}) is greater than years.max ({})",
                    self.years.min, self.years.max
                ),
            });
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct CatalogDocument {
    providers: Vec<JsonValue>,
}

/// Read-only, ordered set of providers. Load order is the tie-break order
/// used when two providers score the same.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    providers: Vec<Provider>,
}

impl Catalog {
    /// Build a catalog from already-constructed providers, validating each.
    pub fn new(providers: Vec<Provider>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(providers.len());
        for (index, provider) in providers.iter().enumerate() {
            provider.validate(index)?;
            if !seen.insert(provider.id.as_str()) {
                return Err(CatalogError::DuplicateId(provider.id.clone()));
            }
        }
        Ok(Self { providers })
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let doc: CatalogDocument = serde_json::from_reader(reader)?;
        Self::from_document(doc)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = File::open(path.as_ref())?;
        let catalog = Self::from_reader(BufReader::new(file))?;
        tracing::debug!(
            path = %path.as_ref().display(),
            providers = catalog.len(),
            "loaded provider catalog"
        );
        Ok(catalog)
    }

    fn from_document(doc: CatalogDocument) -> Result<Self, CatalogError> {
        let providers = doc
            .providers
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                serde_json::from_value::<Provider>(value).map_err(|err| {
                    CatalogError::InvalidProvider {
                        index,
                        reason: err.to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(providers)
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn get(&self, id: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Provider> {
        self.providers.iter()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Provider;
    type IntoIter = std::slice::Iter<'a, Provider>;

    fn into_iter(self) -> Self::IntoIter {
        self.providers.iter()
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(match value {
        JsonValue::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_unit_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(match value {
        JsonValue::Object(entries) => entries
            .into_iter()
            .filter_map(|(var, unit)| match unit {
                JsonValue::String(u) => Some((var, u)),
                _ => None,
            })
            .collect(),
        _ => BTreeMap::new(),
    })
}
