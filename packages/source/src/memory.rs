//! In-memory provider for fixtures and embedding.

use async_trait::async_trait;
use pothole_map_pothole_models::{CityRecord, PotholeRecord};

use crate::{DataProvider, SourceError};

/// Serves fixed datasets from memory, or fails every fetch when built
/// with [`StaticProvider::unavailable`].
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    cities: Option<Vec<CityRecord>>,
    potholes: Option<Vec<PotholeRecord>>,
    unavailable_message: String,
}

impl StaticProvider {
    /// Creates a provider serving the given datasets.
    #[must_use]
    pub fn new(cities: Vec<CityRecord>, potholes: Vec<PotholeRecord>) -> Self {
        Self {
            cities: Some(cities),
            potholes: Some(potholes),
            unavailable_message: String::new(),
        }
    }

    /// Creates a provider whose every fetch fails with
    /// [`SourceError::Unavailable`].
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            cities: None,
            potholes: None,
            unavailable_message: message.into(),
        }
    }

    /// Replaces the pothole dataset, keeping the cities.
    #[must_use]
    pub fn with_potholes(mut self, potholes: Option<Vec<PotholeRecord>>) -> Self {
        self.potholes = potholes;
        self
    }

    fn unavailable_error(&self, dataset: &str) -> SourceError {
        SourceError::Unavailable {
            message: if self.unavailable_message.is_empty() {
                format!("no {dataset} loaded")
            } else {
                self.unavailable_message.clone()
            },
        }
    }
}

#[async_trait]
impl DataProvider for StaticProvider {
    fn describe(&self) -> String {
        format!(
            "in-memory ({} cities, {} potholes)",
            self.cities.as_ref().map_or(0, Vec::len),
            self.potholes.as_ref().map_or(0, Vec::len),
        )
    }

    async fn provide_cities(&self) -> Result<Vec<CityRecord>, SourceError> {
        self.cities
            .clone()
            .ok_or_else(|| self.unavailable_error("cities"))
    }

    async fn provide_potholes(&self) -> Result<Vec<PotholeRecord>, SourceError> {
        self.potholes
            .clone()
            .ok_or_else(|| self.unavailable_error("potholes"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pothole_map_pothole_models::GeoPoint;

    #[tokio::test]
    async fn serves_fixed_data() {
        let provider = StaticProvider::new(
            vec![CityRecord::new("Pune", GeoPoint::new(18.5204, 73.8567))],
            Vec::new(),
        );
        assert_eq!(provider.provide_cities().await.unwrap().len(), 1);
        assert!(provider.provide_potholes().await.unwrap().is_empty());
        assert_eq!(provider.describe(), "in-memory (1 cities, 0 potholes)");
    }

    #[tokio::test]
    async fn unavailable_fails_every_fetch() {
        let provider = StaticProvider::unavailable("network down");
        match provider.provide_potholes().await {
            Err(SourceError::Unavailable { message }) => assert_eq!(message, "network down"),
            other => panic!("expected unavailable, got {other:?}"),
        }
        assert!(provider.provide_cities().await.is_err());
    }

    #[tokio::test]
    async fn missing_potholes_only() {
        let provider = StaticProvider::new(Vec::new(), Vec::new()).with_potholes(None);
        assert!(provider.provide_cities().await.is_ok());
        match provider.provide_potholes().await {
            Err(SourceError::Unavailable { message }) => assert_eq!(message, "no potholes loaded"),
            other => panic!("expected unavailable, got {other:?}"),
        }
    }
}
