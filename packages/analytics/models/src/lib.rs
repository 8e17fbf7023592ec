#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Area report types and query parameters for pothole radius analysis.
//!
//! An [`AreaReport`] is built fresh for every query and thrown away after it
//! is shown. Nothing here is cached.

use pothole_map_pothole_models::{GeoPoint, PotholeSeverity};
use serde::{Deserialize, Serialize};

/// Mean severity of the potholes matched by a query.
///
/// Serialized as a number, or `null` when nothing matched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum AverageSeverity {
    /// No potholes matched, so there is nothing to average.
    NotApplicable,
    /// Mean severity score in `[0, 3]`, rounded to two decimal places.
    Score(f64),
}

impl AverageSeverity {
    /// Returns the score, or `None` for [`Self::NotApplicable`].
    #[must_use]
    pub const fn score(self) -> Option<f64> {
        match self {
            Self::NotApplicable => None,
            Self::Score(score) => Some(score),
        }
    }

    /// Returns `true` if nothing matched.
    #[must_use]
    pub const fn is_not_applicable(self) -> bool {
        matches!(self, Self::NotApplicable)
    }
}

impl From<Option<f64>> for AverageSeverity {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::NotApplicable, Self::Score)
    }
}

impl From<AverageSeverity> for Option<f64> {
    fn from(value: AverageSeverity) -> Self {
        value.score()
    }
}

/// Renders `N/A` or the score with exactly two decimals (e.g. `3.00`).
impl std::fmt::Display for AverageSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotApplicable => write!(f, "N/A"),
            Self::Score(score) => write!(f, "{score:.2}"),
        }
    }
}

/// Number of matched potholes with a given severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityCount {
    /// Severity bucket.
    pub severity: PotholeSeverity,
    /// Number of potholes in this bucket.
    pub count: u64,
}

/// Aggregate result of filtering potholes by distance from a center point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaReport {
    /// Query center.
    pub center: GeoPoint,
    /// Query radius in kilometers.
    pub radius_km: f64,
    /// Number of potholes strictly inside the radius.
    pub matched_count: u64,
    /// Mean severity of the matched potholes.
    pub average_severity: AverageSeverity,
    /// Matched potholes per severity, in [`PotholeSeverity::all`] order.
    /// Buckets with no matches are omitted.
    pub by_severity: Vec<SeverityCount>,
}

impl std::fmt::Display for AreaReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Area Analysis Report")?;
        writeln!(f, "  Latitude: {}", self.center.latitude)?;
        writeln!(f, "  Longitude: {}", self.center.longitude)?;
        writeln!(f, "  Radius: {} km", self.radius_km)?;
        writeln!(f, "  Number of Potholes Detected: {}", self.matched_count)?;
        write!(f, "  Average Severity: {}", self.average_severity)
    }
}

/// Query parameters for analyzing the area around an arbitrary point.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeParams {
    /// Center latitude.
    pub lat: f64,
    /// Center longitude.
    pub lng: f64,
    /// Radius in kilometers, as entered by the user. Validated before use.
    pub radius: Option<String>,
}

/// Query parameters for searching a city and analyzing around it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    /// City name (matched case-insensitively, surrounding whitespace ignored).
    pub city: Option<String>,
    /// Radius in kilometers. Defaults to the city-search radius when absent.
    pub radius: Option<String>,
}

/// Query parameters for looking up a single city.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityParams {
    /// City name.
    pub name: Option<String>,
}
