//! TOML configuration describing where each dataset lives.
//!
//! A default configuration is embedded at compile time from
//! `config/default.toml`. Setting [`CONFIG_ENV_VAR`] to a file path
//! replaces it entirely.
//!
//! ```toml
//! [cities]
//! type = "http"
//! url = "https://example.org/cities.json"
//!
//! [potholes]
//! type = "file"
//! path = "data/pothole_data.json"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variable naming an override configuration file.
pub const CONFIG_ENV_VAR: &str = "POTHOLE_MAP_CONFIG";

const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Errors raised while loading the data source configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration is not valid TOML of the expected shape.
    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Where a single dataset is fetched from, tagged by `type` in TOML.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DatasetLocation {
    /// A JSON file on the local filesystem.
    File {
        /// Path to the file.
        path: PathBuf,
    },
    /// A JSON document fetched with an HTTP GET.
    Http {
        /// Document URL.
        url: String,
    },
}

impl std::fmt::Display for DatasetLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File { path } => write!(f, "{}", path.display()),
            Self::Http { url } => write!(f, "{url}"),
        }
    }
}

/// Locations of both datasets.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DataSourceConfig {
    /// The cities document.
    pub cities: DatasetLocation,
    /// The pothole reports document.
    pub potholes: DatasetLocation,
}

impl DataSourceConfig {
    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the TOML is malformed.
    pub fn parse(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::de::from_str(toml_str)?)
    }

    /// Returns the configuration embedded in the binary.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the embedded TOML is malformed.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::parse(DEFAULT_CONFIG)
    }

    /// Reads a configuration file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Loads the file named by [`CONFIG_ENV_VAR`], falling back to the
    /// embedded default when it is unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the override file cannot be read or
    /// parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                let path = PathBuf::from(path);
                log::info!("Loading data source config from {}", path.display());
                Self::from_file(&path)
            }
            None => {
                log::debug!("{CONFIG_ENV_VAR} not set, using embedded data source config");
                Self::embedded()
            }
        }
    }
}
