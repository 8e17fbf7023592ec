#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Pluggable providers for the city and pothole datasets.
//!
//! Every consumer reads its data through the [`DataProvider`] trait so the
//! fetch mechanism (local files, HTTP, in-memory fixtures) can be swapped
//! without touching the analysis code. Any failure to obtain a dataset is
//! reported as a [`SourceError`]; callers treat all of them as "data
//! unavailable" and never work with a partially loaded dataset.

pub mod config;
pub mod document;
pub mod memory;
pub mod parsing;

use async_trait::async_trait;
use pothole_map_pothole_models::{CityRecord, PotholeRecord};

pub use config::{ConfigError, DataSourceConfig, DatasetLocation};
pub use document::DocumentProvider;
pub use memory::StaticProvider;

/// Errors that can occur while obtaining a dataset.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// Response status code.
        status: u16,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be converted into its model type.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of what went wrong.
        message: String,
    },

    /// The provider has no data to give.
    #[error("Data unavailable: {message}")]
    Unavailable {
        /// Description of why.
        message: String,
    },
}

/// Source of the city and pothole datasets.
///
/// Each call fetches a fresh copy. Implementations must not cache or
/// return partial results.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Returns a short description of where the data comes from, for logs.
    fn describe(&self) -> String;

    /// Fetches the list of searchable cities.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the dataset cannot be fetched or parsed.
    async fn provide_cities(&self) -> Result<Vec<CityRecord>, SourceError>;

    /// Fetches all pothole reports.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the dataset cannot be fetched or parsed.
    async fn provide_potholes(&self) -> Result<Vec<PotholeRecord>, SourceError>;
}
