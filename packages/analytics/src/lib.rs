#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Radius filtering, severity aggregation, and report rendering.
//!
//! [`analyze`] is the pure core: it takes records already in memory and
//! returns a fresh [`AreaReport`]. The `*_from_provider` helpers fetch the
//! dataset first and fail without analyzing anything when the fetch fails.

pub mod analyze;
pub mod markers;
pub mod report;

use pothole_map_analytics_models::AreaReport;
use pothole_map_pothole_models::GeoPoint;
use pothole_map_source::{DataProvider, SourceError};
use thiserror::Error;

pub use analyze::{analyze, average_severity, severity_score};
pub use markers::{marker_features, popup_html};
pub use report::render_html;

/// Errors that can occur during analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The pothole dataset could not be obtained.
    #[error("Pothole data unavailable: {0}")]
    DataUnavailable(#[from] SourceError),
}

/// Fetches the pothole dataset from `provider` and analyzes it.
///
/// # Errors
///
/// Returns [`AnalyticsError::DataUnavailable`] if the provider fails.
pub async fn analyze_from_provider(
    provider: &dyn DataProvider,
    center: GeoPoint,
    radius_km: f64,
) -> Result<AreaReport, AnalyticsError> {
    let records = provider.provide_potholes().await?;
    let report = analyze(center, radius_km, &records);
    log::info!(
        "Analyzed {} potholes around {center} within {radius_km} km: {} matched, average severity {}",
        records.len(),
        report.matched_count,
        report.average_severity,
    );
    Ok(report)
}

/// Fetches the pothole dataset from `provider` and builds map markers.
///
/// # Errors
///
/// Returns [`AnalyticsError::DataUnavailable`] if the provider fails.
pub async fn markers_from_provider(
    provider: &dyn DataProvider,
) -> Result<geojson::FeatureCollection, AnalyticsError> {
    let records = provider.provide_potholes().await?;
    Ok(marker_features(&records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pothole_map_analytics_models::AverageSeverity;
    use pothole_map_pothole_models::PotholeRecord;
    use pothole_map_source::StaticProvider;

    fn record(lat: f64, lng: f64, severity: &str) -> PotholeRecord {
        let at = chrono::Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        PotholeRecord::new(GeoPoint::new(lat, lng), "pot.jpg", at, severity)
    }

    #[tokio::test]
    async fn analyzes_provider_data() {
        let provider = StaticProvider::new(
            Vec::new(),
            vec![record(0.0, 0.5, "high"), record(0.0, 5.0, "low")],
        );
        let report = analyze_from_provider(&provider, GeoPoint::new(0.0, 0.0), 100.0)
            .await
            .unwrap();
        assert_eq!(report.matched_count, 1);
        assert_eq!(report.average_severity, AverageSeverity::Score(3.0));
    }

    #[tokio::test]
    async fn provider_failure_is_data_unavailable() {
        let provider = StaticProvider::unavailable("offline");
        let result = analyze_from_provider(&provider, GeoPoint::new(0.0, 0.0), 100.0).await;
        assert!(matches!(result, Err(AnalyticsError::DataUnavailable(_))));

        let result = markers_from_provider(&provider).await;
        assert!(matches!(result, Err(AnalyticsError::DataUnavailable(_))));
    }

    #[tokio::test]
    async fn builds_markers_from_provider() {
        let provider = StaticProvider::new(Vec::new(), vec![record(1.0, 2.0, "Medium")]);
        let markers = markers_from_provider(&provider).await.unwrap();
        assert_eq!(markers.features.len(), 1);
    }
}
