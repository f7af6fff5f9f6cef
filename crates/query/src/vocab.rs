//! Fixed vocabularies the parser classifies tokens against.
//!
//! All entries are lower-case; tokens are lower-cased before lookup.

/// Region gazetteer. Matched tokens are emitted in capitalised form.
pub const KNOWN_REGIONS: &[&str] = &["india", "china", "usa", "world", "europe", "germany"];

/// Temporal resolution keywords.
pub const GRANULARITY_KEYWORDS: &[&str] = &["annual", "yearly", "5-year", "decadal"];

/// Variables accepted without a `|` path separator.
pub const BARE_VARIABLES: &[&str] = &["gdp", "population", "co2", "emissions"];

/// Scenario tokens start with this prefix followed by a digit.
pub const SCENARIO_PREFIX: &str = "ssp";

/// Separator between variable path segments (`emissions|co2|energy`).
pub const VARIABLE_SEPARATOR: char = '|';

pub(crate) fn is_known_region(token: &str) -> bool {
    KNOWN_REGIONS.contains(&token)
}

pub(crate) fn is_granularity(token: &str) -> bool {
    GRANULARITY_KEYWORDS.contains(&token)
}

pub(crate) fn is_bare_variable(token: &str) -> bool {
    BARE_VARIABLES.contains(&token)
}
