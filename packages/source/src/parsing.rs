//! Parsing of the raw city and pothole documents.
//!
//! The cities document is an object with a `cities` array. The pothole
//! document is a bare array written by the detection script, whose
//! coordinates are `null` when no GPS fix was available.

use chrono::{DateTime, NaiveDateTime, Utc};
use pothole_map_pothole_models::{CityRecord, GeoPoint, PotholeRecord};
use serde::Deserialize;

use crate::SourceError;

#[derive(Debug, Deserialize)]
struct RawCitiesDocument {
    cities: Vec<RawCity>,
}

#[derive(Debug, Deserialize)]
struct RawCity {
    name: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct RawPothole {
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(default)]
    image_path: Option<String>,
    datetime_utc: String,
    #[serde(default)]
    severity: Option<String>,
}

/// Parses a cities document (`{"cities": [{name, latitude, longitude}]}`).
///
/// Order is preserved so that lookups resolve duplicates to the first entry.
///
/// # Errors
///
/// Returns [`SourceError::Json`] if the document is not valid JSON of the
/// expected shape.
pub fn parse_cities(body: &str) -> Result<Vec<CityRecord>, SourceError> {
    let doc: RawCitiesDocument = serde_json::from_str(body)?;
    Ok(doc
        .cities
        .into_iter()
        .map(|c| CityRecord::new(c.name, GeoPoint::new(c.latitude, c.longitude)))
        .collect())
}

/// Parses a pothole document (array of detection records).
///
/// Records without coordinates cannot be placed or measured and are
/// skipped. Every remaining record must carry a parseable timestamp; one
/// bad timestamp fails the whole document.
///
/// # Errors
///
/// Returns [`SourceError::Json`] for malformed JSON and
/// [`SourceError::Parse`] for an unparseable timestamp.
pub fn parse_potholes(body: &str) -> Result<Vec<PotholeRecord>, SourceError> {
    let raw: Vec<RawPothole> = serde_json::from_str(body)?;
    let total = raw.len();
    let mut records = Vec::with_capacity(total);

    for (idx, pothole) in raw.into_iter().enumerate() {
        let (Some(latitude), Some(longitude)) = (pothole.latitude, pothole.longitude) else {
            log::warn!("Skipping pothole record {idx}: missing coordinates");
            continue;
        };

        let reported_at =
            parse_timestamp(&pothole.datetime_utc).ok_or_else(|| SourceError::Parse {
                message: format!(
                    "pothole record {idx}: invalid datetime_utc '{}'",
                    pothole.datetime_utc
                ),
            })?;

        records.push(PotholeRecord::new(
            GeoPoint::new(latitude, longitude),
            pothole.image_path.unwrap_or_default(),
            reported_at,
            pothole.severity.unwrap_or_default(),
        ));
    }

    log::debug!("Parsed {} of {total} pothole records", records.len());

    Ok(records)
}

/// Formats tried for timestamps without an explicit offset (taken as UTC).
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Formats tried for timestamps with a numeric offset.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%:z"];

/// Parses a report timestamp into UTC.
///
/// Accepts RFC 3339, Python's `str(datetime)` output (space separator,
/// optional fractional seconds, optional `+HH:MM` offset), and ISO 8601
/// without an offset, which is interpreted as UTC.
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pothole_map_pothole_models::PotholeSeverity;

    #[test]
    fn parses_rfc3339_timestamp() {
        let dt = parse_timestamp("2024-01-15T14:30:00Z").unwrap();
        assert_eq!(dt.to_string(), "2024-01-15 14:30:00 UTC");
    }

    #[test]
    fn parses_python_aware_timestamp() {
        let dt = parse_timestamp("2024-01-15 20:00:00.123456+05:30").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-01-15 14:30:00");
    }

    #[test]
    fn parses_python_naive_timestamp_as_utc() {
        let dt = parse_timestamp("2024-01-15 14:30:00.5").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-01-15 14:30:00");

        let dt = parse_timestamp("2024-01-15T14:30:00").unwrap();
        assert_eq!(dt.to_string(), "2024-01-15 14:30:00 UTC");
    }

    #[test]
    fn rejects_invalid_timestamp() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn parses_cities_in_order() {
        let body = r#"{"cities": [
            {"name": "Mumbai", "latitude": 19.076, "longitude": 72.8777},
            {"name": "Delhi", "latitude": 28.7041, "longitude": 77.1025}
        ]}"#;
        let cities = parse_cities(body).unwrap();
        assert_eq!(cities.len(), 2);
        assert_eq!(cities[0].name, "Mumbai");
        assert!((cities[0].point.latitude - 19.076).abs() < f64::EPSILON);
        assert_eq!(cities[1].name, "Delhi");
    }

    #[test]
    fn rejects_cities_without_wrapper() {
        let body = r#"[{"name": "Mumbai", "latitude": 19.076, "longitude": 72.8777}]"#;
        assert!(matches!(parse_cities(body), Err(SourceError::Json(_))));
    }

    #[test]
    fn parses_pothole_records() {
        let body = r#"[
            {
                "image_path": "pothole_coordinates/pot0.jpg",
                "latitude": 19.07,
                "longitude": 72.88,
                "severity": "Medium",
                "datetime_utc": "2024-03-01 08:15:00.000000+00:00"
            },
            {
                "image_path": "pothole_coordinates/pot1.jpg",
                "latitude": 19.08,
                "longitude": 72.89,
                "datetime_utc": "2024-03-01T08:16:00Z"
            }
        ]"#;
        let records = parse_potholes(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].severity, PotholeSeverity::Medium);
        assert_eq!(records[0].image_url, "pothole_coordinates/pot0.jpg");
        assert_eq!(records[1].severity, PotholeSeverity::Unknown);
        assert_eq!(records[1].severity_label, "");
    }

    #[test]
    fn skips_records_without_coordinates() {
        let body = r#"[
            {"latitude": null, "longitude": null, "severity": "Low",
             "image_path": "a.jpg", "datetime_utc": "2024-03-01T08:16:00Z"},
            {"latitude": 1.0, "longitude": 2.0, "severity": "Low",
             "image_path": "b.jpg", "datetime_utc": "2024-03-01T08:16:00Z"}
        ]"#;
        let records = parse_potholes(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].image_url, "b.jpg");
    }

    #[test]
    fn bad_timestamp_fails_whole_document() {
        let body = r#"[
            {"latitude": 1.0, "longitude": 2.0, "severity": "Low",
             "image_path": "a.jpg", "datetime_utc": "2024-03-01T08:16:00Z"},
            {"latitude": 1.0, "longitude": 2.0, "severity": "Low",
             "image_path": "b.jpg", "datetime_utc": "not a date"}
        ]"#;
        assert!(matches!(
            parse_potholes(body),
            Err(SourceError::Parse { .. })
        ));
    }
}
