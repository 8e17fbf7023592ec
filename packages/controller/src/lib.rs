#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map controller for pothole search.
//!
//! [`MapController`] owns all mutable UI state: the map widget, the single
//! dropped-pin marker, and the last successful [`AreaReport`]. User actions
//! (city search, pin drop) fetch data through an injected
//! [`DataProvider`], run the stateless analyzer, and only then update the
//! stored report. A failed action leaves the previous report in place.

pub mod widget;

use std::sync::Arc;

use pothole_map_analytics::{AnalyticsError, analyze_from_provider, markers_from_provider};
use pothole_map_analytics_models::AreaReport;
use pothole_map_geography::{LookupError, find_city};
use pothole_map_pothole_models::{CityRecord, GeoPoint};
use pothole_map_source::{DataProvider, SourceError};
use thiserror::Error;

pub use widget::{MapView, MapWidget, MarkerId, RecordingMapWidget};

/// Initial map center (India).
pub const DEFAULT_CENTER: GeoPoint = GeoPoint::new(20.0, 77.0);

/// Initial map zoom.
pub const DEFAULT_ZOOM: u8 = 5;

/// Zoom applied after a successful city search.
pub const CITY_ZOOM: u8 = 10;

/// Radius analyzed around a searched city, in kilometers.
pub const CITY_SEARCH_RADIUS_KM: f64 = 100.0;

/// Which dataset a fetch was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    /// The cities document.
    Cities,
    /// The pothole reports document.
    Potholes,
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cities => write!(f, "city"),
            Self::Potholes => write!(f, "pothole"),
        }
    }
}

/// Errors surfaced to the user by controller actions.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The user's input was missing or malformed.
    #[error("{message}")]
    InvalidInput {
        /// What to tell the user.
        message: String,
    },

    /// The searched city does not exist in the dataset.
    #[error("City not found: {name}")]
    NotFound {
        /// Normalized search string.
        name: String,
    },

    /// A dataset could not be fetched or parsed.
    #[error("Error fetching {dataset} data: {source}")]
    DataUnavailable {
        /// Which dataset failed.
        dataset: Dataset,
        /// Underlying failure.
        source: SourceError,
    },
}

impl ControllerError {
    fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    const fn unavailable(dataset: Dataset, source: SourceError) -> Self {
        Self::DataUnavailable { dataset, source }
    }

    /// Short notification suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput { message } => message.clone(),
            Self::NotFound { .. } => "City not found!".to_string(),
            Self::DataUnavailable { dataset, .. } => {
                format!("Error fetching {dataset} data. Please try again later.")
            }
        }
    }
}

impl From<LookupError> for ControllerError {
    fn from(e: LookupError) -> Self {
        match e {
            LookupError::InvalidInput => Self::invalid(e.to_string()),
            LookupError::NotFound { name } => Self::NotFound { name },
        }
    }
}

impl From<AnalyticsError> for ControllerError {
    fn from(e: AnalyticsError) -> Self {
        match e {
            AnalyticsError::DataUnavailable(source) => Self::unavailable(Dataset::Potholes, source),
        }
    }
}

/// Validates a radius typed by the user.
///
/// # Errors
///
/// Returns [`ControllerError::InvalidInput`] if the input is absent,
/// blank, not a number, not finite, or not greater than zero.
pub fn parse_radius(input: Option<&str>) -> Result<f64, ControllerError> {
    let Some(raw) = input.map(str::trim).filter(|s| !s.is_empty()) else {
        return Err(ControllerError::invalid(
            "Please enter the radius around the pin (in kilometers).",
        ));
    };

    let radius: f64 = raw
        .parse()
        .map_err(|_| ControllerError::invalid(format!("Radius '{raw}' is not a number.")))?;

    if !radius.is_finite() || radius <= 0.0 {
        return Err(ControllerError::invalid(format!(
            "Radius must be a positive number of kilometers, got '{raw}'."
        )));
    }

    Ok(radius)
}

/// Result of a successful city search.
#[derive(Debug, Clone, PartialEq)]
pub struct CitySearch {
    /// The matched city.
    pub city: CityRecord,
    /// Report for the area around it.
    pub report: AreaReport,
}

/// Owns the map widget, the dropped pin, and the last report.
pub struct MapController<W: MapWidget> {
    widget: W,
    provider: Arc<dyn DataProvider>,
    pin: Option<MarkerId>,
    last_report: Option<AreaReport>,
}

impl<W: MapWidget> MapController<W> {
    /// Creates a controller and resets the widget to the default view.
    #[must_use]
    pub fn new(mut widget: W, provider: Arc<dyn DataProvider>) -> Self {
        widget.set_view(DEFAULT_CENTER, DEFAULT_ZOOM);
        log::debug!("Map controller using data from {}", provider.describe());
        Self {
            widget,
            provider,
            pin: None,
            last_report: None,
        }
    }

    /// The map widget.
    #[must_use]
    pub const fn widget(&self) -> &W {
        &self.widget
    }

    /// Handle of the dropped pin, if any.
    #[must_use]
    pub const fn pin(&self) -> Option<MarkerId> {
        self.pin
    }

    /// The report from the last successful action.
    #[must_use]
    pub const fn last_report(&self) -> Option<&AreaReport> {
        self.last_report.as_ref()
    }

    /// Searches for a city, centers the map on it, and analyzes the
    /// surrounding [`CITY_SEARCH_RADIUS_KM`].
    ///
    /// # Errors
    ///
    /// * [`ControllerError::InvalidInput`] for blank input.
    /// * [`ControllerError::NotFound`] if no city matches.
    /// * [`ControllerError::DataUnavailable`] if either dataset fails.
    pub async fn search_city(&mut self, input: &str) -> Result<CitySearch, ControllerError> {
        self.search_city_with_radius(input, CITY_SEARCH_RADIUS_KM)
            .await
    }

    /// Like [`Self::search_city`] with an explicit radius.
    ///
    /// # Errors
    ///
    /// See [`Self::search_city`].
    pub async fn search_city_with_radius(
        &mut self,
        input: &str,
        radius_km: f64,
    ) -> Result<CitySearch, ControllerError> {
        let city = self.lookup_city(input).await?;

        log::info!("Found {} at {}", city.name, city.point);
        self.widget.pan_to(city.point);
        self.widget.set_zoom(CITY_ZOOM);

        let report = self.analyze(city.point, radius_km).await?;
        Ok(CitySearch { city, report })
    }

    /// Resolves user input to a city without touching the map.
    ///
    /// Blank input is rejected before the cities dataset is fetched.
    ///
    /// # Errors
    ///
    /// See [`Self::search_city`].
    pub async fn lookup_city(&self, input: &str) -> Result<CityRecord, ControllerError> {
        if input.trim().is_empty() {
            return Err(LookupError::InvalidInput.into());
        }

        let cities = self
            .provider
            .provide_cities()
            .await
            .map_err(|e| ControllerError::unavailable(Dataset::Cities, e))?;

        Ok(find_city(input, &cities)?.clone())
    }

    /// Replaces the dropped pin with one at `point` and analyzes the area
    /// within the user-entered radius.
    ///
    /// The pin moves even when the radius is then rejected.
    ///
    /// # Errors
    ///
    /// * [`ControllerError::InvalidInput`] for a bad radius.
    /// * [`ControllerError::DataUnavailable`] if the pothole dataset fails.
    pub async fn drop_pin(
        &mut self,
        point: GeoPoint,
        radius_input: Option<&str>,
    ) -> Result<AreaReport, ControllerError> {
        if let Some(old) = self.pin.take() {
            self.widget.remove_marker(old);
        }
        self.pin = Some(self.widget.place_marker(point));

        let radius_km = parse_radius(radius_input)?;
        self.analyze(point, radius_km).await
    }

    /// Removes the dropped pin, if any.
    pub fn clear_pin(&mut self) {
        if let Some(old) = self.pin.take() {
            self.widget.remove_marker(old);
        }
    }

    /// Builds one marker per pothole report.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::DataUnavailable`] if the pothole dataset
    /// fails.
    pub async fn markers(&self) -> Result<geojson::FeatureCollection, ControllerError> {
        Ok(markers_from_provider(self.provider.as_ref()).await?)
    }

    async fn analyze(
        &mut self,
        center: GeoPoint,
        radius_km: f64,
    ) -> Result<AreaReport, ControllerError> {
        let report = analyze_from_provider(self.provider.as_ref(), center, radius_km).await?;
        self.last_report = Some(report.clone());
        Ok(report)
    }
}
