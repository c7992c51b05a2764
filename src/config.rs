/// Catalog configuration loader - parses catalog.toml
///
/// Keeps the id range, feed location, and output path out of the code so a
/// run can be pointed at a different range or mirror without recompiling.
/// Every key is optional; a missing file means "all defaults".
///
/// ```toml
/// [range]
/// first_id = 1
/// last_id = 8000
///
/// [feed]
/// url_template = "http://newsrss.bbc.co.uk/weather/forecast/{id}/ObservationsRSS.xml"
/// title_prefix = "BBC - Weather Centre - Latest Observations for "
/// timeout_secs = 30
///
/// [output]
/// path = "stations.xml"
/// ```

use serde::Deserialize;
use std::env;
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::ingest::bbc::ID_PLACEHOLDER;

/// Config file read when neither `--config` nor `CATALOG_CONFIG` is given.
pub const DEFAULT_CONFIG_PATH: &str = "catalog.toml";

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "CATALOG_CONFIG";

pub const DEFAULT_FEED_URL_TEMPLATE: &str =
    "http://newsrss.bbc.co.uk/weather/forecast/{id}/ObservationsRSS.xml";

/// Fixed text every feed title starts with, ahead of "<name>, <country>".
pub const DEFAULT_TITLE_PREFIX: &str = "BBC - Weather Centre - Latest Observations for ";

// ---------------------------------------------------------------------------
// Configuration structures
// ---------------------------------------------------------------------------

/// Root configuration structure for TOML parsing
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub range: RangeConfig,
    pub feed: FeedConfig,
    pub output: OutputConfig,
}

/// Inclusive range of station ids to probe.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RangeConfig {
    pub first_id: u32,
    pub last_id: u32,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            first_id: 1,
            last_id: 8000,
        }
    }
}

/// Where and how station feeds are fetched.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FeedConfig {
    /// Must contain `{id}`.
    pub url_template: String,
    pub title_prefix: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_FEED_URL_TEMPLATE.to_string(),
            title_prefix: DEFAULT_TITLE_PREFIX.to_string(),
            timeout_secs: 30,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("stations.xml"),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("failed to parse config file '{0}'")]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl CatalogConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(contents: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: CatalogConfig = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(origin.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `path`. A file that does not exist yields
    /// the defaults; any other read or parse failure is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents, path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::Read(path.to_path_buf(), e)),
        }
    }

    /// Loads configuration from `explicit` if given, else from the path in
    /// `CATALOG_CONFIG` (a `.env` file is honoured), else `catalog.toml`.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => env::var_os(CONFIG_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH)),
        };

        Self::load_from(&path)
    }

    /// Checks cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.range.first_id == 0 {
            return Err(ConfigError::Invalid(
                "range.first_id must be a positive station id".to_string(),
            ));
        }
        if self.range.first_id > self.range.last_id {
            return Err(ConfigError::Invalid(format!(
                "range.first_id ({}) is after range.last_id ({})",
                self.range.first_id, self.range.last_id
            )));
        }
        if !self.feed.url_template.contains(ID_PLACEHOLDER) {
            return Err(ConfigError::Invalid(format!(
                "feed.url_template '{}' has no {} placeholder",
                self.feed.url_template, ID_PLACEHOLDER
            )));
        }
        if self.feed.timeout_secs == 0 {
            return Err(ConfigError::Invalid("feed.timeout_secs must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Station ids to probe, ascending.
    pub fn ids(&self) -> RangeInclusive<u32> {
        self.range.first_id..=self.range.last_id
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
