//! Validator configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default root for documentation pointers attached to exceptions.
pub const DEFAULT_DOCS_URL: &str = "https://docs.rs/argcheck-core";

/// Errors from loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// How reporting mode attributes a mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportIndexing {
    /// Each failure describes its own argument and every position is checked.
    #[default]
    Consistent,

    /// Historical behaviour: after a mismatch at position `i` the entry's
    /// `passedData` describes argument `i + 1`, and position `i + 1` is not
    /// checked.
    Legacy,
}

/// Configuration for a [`Validator`](crate::Validator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Root URL for documentation pointers (`{docs_url}#{anchor}`)
    pub docs_url: String,

    /// Reporting-mode failure attribution
    pub indexing: ReportIndexing,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            docs_url: DEFAULT_DOCS_URL.to_string(),
            indexing: ReportIndexing::Consistent,
        }
    }
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_docs_url(mut self, docs_url: impl Into<String>) -> Self {
        self.docs_url = docs_url.into();
        self
    }

    pub fn with_indexing(mut self, indexing: ReportIndexing) -> Self {
        self.indexing = indexing;
        self
    }

    /// Parse configuration from YAML. Missing keys take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }
}
