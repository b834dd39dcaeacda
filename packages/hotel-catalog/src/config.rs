//! Catalog configuration (YAML / env loading)
//!
//! Precedence, lowest first: defaults, YAML file, `HOTEL_CATALOG_*`
//! environment variables, CLI flags.
//!
//! ```yaml
//! version: 1
//! hotels_file: input/hotels.json
//! reviews_dir: input/reviews
//! output_file: output/results.txt
//! parallel: true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::CatalogError;

pub const ENV_HOTELS_FILE: &str = "HOTEL_CATALOG_HOTELS";
pub const ENV_REVIEWS_DIR: &str = "HOTEL_CATALOG_REVIEWS";
pub const ENV_OUTPUT_FILE: &str = "HOTEL_CATALOG_OUTPUT";
pub const ENV_PARALLEL: &str = "HOTEL_CATALOG_PARALLEL";

const SUPPORTED_VERSION: u32 = 1;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing version field in YAML
    #[error("Missing 'version' field in configuration file. Add 'version: 1' to the top of your YAML file.")]
    MissingVersion,

    /// Unsupported version
    #[error("Unsupported configuration version {found}. Supported versions: 1")]
    UnsupportedVersion { found: u32 },

    /// Environment variable with an unusable value
    #[error("Invalid value {value:?} for {name}: expected true/false")]
    InvalidEnv { name: String, value: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Configuration result type
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl From<ConfigError> for CatalogError {
    fn from(err: ConfigError) -> Self {
        CatalogError::config(err.to_string()).with_source(err)
    }
}

/// YAML schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogConfigV1 {
    #[serde(default)]
    version: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    hotels_file: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    reviews_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    output_file: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    parallel: Option<bool>,
}

/// Where to read hotels and reviews from and where to write the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Hotel list document (`{"sr": [...]}`)
    pub hotels_file: PathBuf,
    /// Root of the review file tree, walked recursively
    pub reviews_dir: PathBuf,
    /// Report destination
    pub output_file: PathBuf,
    /// Parse review files on the rayon pool
    pub parallel: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            hotels_file: PathBuf::from("input/hotels.json"),
            reviews_dir: PathBuf::from("input/reviews"),
            output_file: PathBuf::from("output/results.txt"),
            parallel: true,
        }
    }
}

impl CatalogConfig {
    pub fn hotels_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.hotels_file = path.into();
        self
    }

    pub fn reviews_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.reviews_dir = path.into();
        self
    }

    pub fn output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = path.into();
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Load from a YAML file; absent keys keep their defaults
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: CatalogConfigV1 = serde_yaml::from_str(content)?;

        match export.version {
            None => return Err(ConfigError::MissingVersion),
            Some(SUPPORTED_VERSION) => {}
            Some(found) => return Err(ConfigError::UnsupportedVersion { found }),
        }

        let defaults = Self::default();
        Ok(Self {
            hotels_file: export.hotels_file.unwrap_or(defaults.hotels_file),
            reviews_dir: export.reviews_dir.unwrap_or(defaults.reviews_dir),
            output_file: export.output_file.unwrap_or(defaults.output_file),
            parallel: export.parallel.unwrap_or(defaults.parallel),
        })
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = CatalogConfigV1 {
            version: Some(SUPPORTED_VERSION),
            hotels_file: Some(self.hotels_file.clone()),
            reviews_dir: Some(self.reviews_dir.clone()),
            output_file: Some(self.output_file.clone()),
            parallel: Some(self.parallel),
        };
        Ok(serde_yaml::to_string(&export)?)
    }

    /// Apply `HOTEL_CATALOG_*` overrides from the process environment
    pub fn apply_env(self) -> ConfigResult<Self> {
        self.apply_env_from(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        if let Some(path) = lookup(ENV_HOTELS_FILE) {
            self.hotels_file = PathBuf::from(path);
        }
        if let Some(path) = lookup(ENV_REVIEWS_DIR) {
            self.reviews_dir = PathBuf::from(path);
        }
        if let Some(path) = lookup(ENV_OUTPUT_FILE) {
            self.output_file = PathBuf::from(path);
        }
        if let Some(value) = lookup(ENV_PARALLEL) {
            self.parallel = parse_flag(&value).ok_or_else(|| ConfigError::InvalidEnv {
                name: ENV_PARALLEL.to_string(),
                value: value.clone(),
            })?;
        }
        Ok(self)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
