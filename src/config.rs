//! YAML configuration for the `climatch` CLI and embedders.
//!
//! One file describes where the provider catalog and observation rows live
//! and how the matcher and recommender behave.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "local"
//!
//! catalog:
//!   path: "data/catalog.json"
//!
//! matcher:
//!   parallel: true
//!   parallel_threshold: 64
//!   max_results: 10
//!   explain: true
//!
//! coverage:
//!   observations_path: "data/observations.json"
//!   timeout_ms: 5000
//!   default_start_year: 2020
//!   default_end_year: 2050
//!   top_n: 6
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use coverage::CoverageConfig;
use matcher::MatchConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ClimatchConfig {
    /// Configuration format version
    pub version: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub catalog: CatalogYamlConfig,

    #[serde(default)]
    pub matcher: MatchYamlConfig,

    #[serde(default)]
    pub coverage: CoverageYamlConfig,
}

impl ClimatchConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: ClimatchConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.matcher
            .to_match_config()
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("matcher: {err}")))?;
        self.coverage
            .to_coverage_config()
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("coverage: {err}")))?;

        Ok(())
    }
}

impl Default for ClimatchConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            catalog: CatalogYamlConfig::default(),
            matcher: MatchYamlConfig::default(),
            coverage: CoverageYamlConfig::default(),
        }
    }
}

/// Catalog location
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogYamlConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Matcher YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchYamlConfig {
    #[serde(default = "true_value")]
    pub parallel: bool,

    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,

    #[serde(default)]
    pub max_results: Option<usize>,

    #[serde(default = "true_value")]
    pub explain: bool,
}

impl MatchYamlConfig {
    pub fn to_match_config(&self) -> MatchConfig {
        MatchConfig {
            parallel: self.parallel,
            parallel_threshold: self.parallel_threshold,
            max_results: self.max_results,
            explain: self.explain,
        }
    }
}

impl Default for MatchYamlConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: default_parallel_threshold(),
            max_results: None,
            explain: true,
        }
    }
}

/// Recommendation YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageYamlConfig {
    #[serde(default)]
    pub observations_path: Option<PathBuf>,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_start_year")]
    pub default_start_year: i32,

    #[serde(default = "default_end_year")]
    pub default_end_year: i32,

    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl CoverageYamlConfig {
    pub fn to_coverage_config(&self) -> CoverageConfig {
        CoverageConfig {
            timeout_ms: self.timeout_ms,
            default_start_year: self.default_start_year,
            default_end_year: self.default_end_year,
            top_n: self.top_n,
        }
    }
}

impl Default for CoverageYamlConfig {
    fn default() -> Self {
        Self {
            observations_path: None,
            timeout_ms: default_timeout_ms(),
            default_start_year: default_start_year(),
            default_end_year: default_end_year(),
            top_n: default_top_n(),
        }
    }
}

// Helper functions for serde defaults
fn true_value() -> bool {
    true
}
fn default_parallel_threshold() -> usize {
    64
}
fn default_timeout_ms() -> u64 {
    5_000
}
fn default_start_year() -> i32 {
    2020
}
fn default_end_year() -> i32 {
    2050
}
fn default_top_n() -> usize {
    6
}
