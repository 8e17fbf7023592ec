#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Pothole report, city, and coordinate types with severity definitions.
//!
//! These are the read-only records the rest of the pothole-map system
//! works with. Data sources parse their raw documents into these types once
//! and nothing downstream mutates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A WGS84 coordinate in decimal degrees.
///
/// No range checking happens on construction. Out-of-range values are
/// carried through as-is; use [`GeoPoint::is_valid`] to query them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to 90).
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180).
    pub longitude: f64,
}

impl GeoPoint {
    /// Creates a new point from latitude and longitude in degrees.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns `true` if both components are finite and inside their
    /// conventional ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Qualitative severity of a reported pothole.
///
/// Labels from the data source are matched case-insensitively. Anything
/// that is not `low`, `medium`, or `high` (including an empty or missing
/// label) is [`PotholeSeverity::Unknown`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum PotholeSeverity {
    /// Severity could not be determined from the label.
    Unknown,
    /// Minor surface damage.
    Low,
    /// Noticeable damage that affects ride quality.
    Medium,
    /// Damage likely to harm vehicles.
    High,
}

impl PotholeSeverity {
    /// Maps a raw label to a severity. Never fails: unrecognized labels are
    /// [`Self::Unknown`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or(Self::Unknown)
    }

    /// Numeric score used for averaging: Low=1, Medium=2, High=3,
    /// Unknown=0.
    #[must_use]
    pub const fn score(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Unknown, Self::Low, Self::Medium, Self::High]
    }
}

/// A single pothole report as read from the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PotholeRecord {
    /// Where the pothole was detected.
    #[serde(flatten)]
    pub point: GeoPoint,
    /// URL or relative path of the captured image.
    pub image_url: String,
    /// When the pothole was reported (UTC).
    pub reported_at: DateTime<Utc>,
    /// Parsed severity.
    pub severity: PotholeSeverity,
    /// The severity label exactly as the source provided it (empty if the
    /// source had none). Shown in marker popups.
    pub severity_label: String,
}

impl PotholeRecord {
    /// Builds a record, deriving [`PotholeRecord::severity`] from the raw
    /// label.
    #[must_use]
    pub fn new(
        point: GeoPoint,
        image_url: impl Into<String>,
        reported_at: DateTime<Utc>,
        severity_label: impl Into<String>,
    ) -> Self {
        let severity_label = severity_label.into();
        Self {
            point,
            image_url: image_url.into(),
            reported_at,
            severity: PotholeSeverity::from_label(&severity_label),
            severity_label,
        }
    }

    /// Severity score of this record.
    #[must_use]
    pub const fn severity_score(&self) -> u8 {
        self.severity.score()
    }
}

/// A named city used as a search target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityRecord {
    /// Display name (matched case-insensitively).
    pub name: String,
    /// City center.
    #[serde(flatten)]
    pub point: GeoPoint,
}

impl CityRecord {
    /// Creates a new city record.
    #[must_use]
    pub fn new(name: impl Into<String>, point: GeoPoint) -> Self {
        Self {
            name: name.into(),
            point,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn severity_labels_are_case_insensitive() {
        for label in ["LOW", "low", "Low", "lOw"] {
            assert_eq!(PotholeSeverity::from_label(label), PotholeSeverity::Low);
        }
        assert_eq!(
            PotholeSeverity::from_label("Medium"),
            PotholeSeverity::Medium
        );
        assert_eq!(PotholeSeverity::from_label("HIGH"), PotholeSeverity::High);
    }

    #[test]
    fn unrecognized_severity_labels_are_unknown() {
        for label in ["", "unknown", "severe", " low", "1"] {
            assert_eq!(
                PotholeSeverity::from_label(label),
                PotholeSeverity::Unknown,
                "label {label:?}"
            );
        }
    }

    #[test]
    fn severity_scores_are_fixed() {
        assert_eq!(PotholeSeverity::Unknown.score(), 0);
        assert_eq!(PotholeSeverity::Low.score(), 1);
        assert_eq!(PotholeSeverity::Medium.score(), 2);
        assert_eq!(PotholeSeverity::High.score(), 3);
    }

    #[test]
    fn record_keeps_raw_label() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap();
        let record = PotholeRecord::new(GeoPoint::new(19.0, 72.8), "img/1.jpg", at, "hIgH");
        assert_eq!(record.severity, PotholeSeverity::High);
        assert_eq!(record.severity_label, "hIgH");
        assert_eq!(record.severity_score(), 3);
    }

    #[test]
    fn point_validity() {
        assert!(GeoPoint::new(0.0, 0.0).is_valid());
        assert!(GeoPoint::new(90.0, 180.0).is_valid());
        assert!(GeoPoint::new(-90.0, -180.0).is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, 181.0).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn city_serializes_flat() {
        let city = CityRecord::new("Mumbai", GeoPoint::new(19.076, 72.8777));
        let value = serde_json::to_value(&city).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "Mumbai",
                "latitude": 19.076,
                "longitude": 72.8777,
            })
        );
    }
}
