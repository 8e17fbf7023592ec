//! Provider that loads the JSON documents from files or over HTTP.
//!
//! Each call re-reads its document. There is no retry and no timeout
//! beyond the HTTP client's defaults: a failed fetch is reported once and
//! the caller decides what to tell the user.

use std::path::Path;

use async_trait::async_trait;
use pothole_map_pothole_models::{CityRecord, PotholeRecord};

use crate::config::{DataSourceConfig, DatasetLocation};
use crate::parsing::{parse_cities, parse_potholes};
use crate::{DataProvider, SourceError};

/// Default file name of the cities document.
pub const CITIES_FILE: &str = "cities.json";

/// Default file name of the pothole document.
pub const POTHOLES_FILE: &str = "pothole_data.json";

/// Reads the city and pothole documents from their configured locations.
pub struct DocumentProvider {
    cities: DatasetLocation,
    potholes: DatasetLocation,
    client: reqwest::Client,
}

impl DocumentProvider {
    /// Creates a provider for explicit locations.
    #[must_use]
    pub fn new(cities: DatasetLocation, potholes: DatasetLocation) -> Self {
        Self {
            cities,
            potholes,
            client: reqwest::Client::new(),
        }
    }

    /// Creates a provider from a loaded configuration.
    #[must_use]
    pub fn from_config(config: &DataSourceConfig) -> Self {
        Self::new(config.cities.clone(), config.potholes.clone())
    }

    /// Reads `cities.json` and `pothole_data.json` from `dir`.
    #[must_use]
    pub fn from_dir(dir: &Path) -> Self {
        Self::new(
            DatasetLocation::File {
                path: dir.join(CITIES_FILE),
            },
            DatasetLocation::File {
                path: dir.join(POTHOLES_FILE),
            },
        )
    }

    /// Fetches `cities.json` and `pothole_data.json` relative to `base_url`.
    #[must_use]
    pub fn from_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self::new(
            DatasetLocation::Http {
                url: format!("{base}/{CITIES_FILE}"),
            },
            DatasetLocation::Http {
                url: format!("{base}/{POTHOLES_FILE}"),
            },
        )
    }

    async fn load(&self, location: &DatasetLocation) -> Result<String, SourceError> {
        log::debug!("Fetching {location}");
        match location {
            DatasetLocation::File { path } => Ok(tokio::fs::read_to_string(path).await?),
            DatasetLocation::Http { url } => {
                let resp = self.client.get(url).send().await?;
                let status = resp.status();
                if !status.is_success() {
                    return Err(SourceError::Status {
                        url: url.clone(),
                        status: status.as_u16(),
                    });
                }
                Ok(resp.text().await?)
            }
        }
    }
}

#[async_trait]
impl DataProvider for DocumentProvider {
    fn describe(&self) -> String {
        format!("cities: {}, potholes: {}", self.cities, self.potholes)
    }

    async fn provide_cities(&self) -> Result<Vec<CityRecord>, SourceError> {
        let body = self.load(&self.cities).await?;
        let cities = parse_cities(&body)?;
        log::debug!("Loaded {} cities from {}", cities.len(), self.cities);
        Ok(cities)
    }

    async fn provide_potholes(&self) -> Result<Vec<PotholeRecord>, SourceError> {
        let body = self.load(&self.potholes).await?;
        let potholes = parse_potholes(&body)?;
        log::debug!("Loaded {} potholes from {}", potholes.len(), self.potholes);
        Ok(potholes)
    }
}
