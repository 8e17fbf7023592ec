//! One map marker per pothole report, as `GeoJSON`.
//!
//! This is independent of radius analysis: every record becomes a point
//! feature whose properties carry what the marker popup shows.

use chrono::{DateTime, Utc};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject};
use pothole_map_pothole_models::PotholeRecord;
use pothole_map_spatial::to_geo_point;
use serde_json::json;

/// Popup timestamp layout, e.g. `03/01/2024, 08:15:00 AM` (always UTC).
const POPUP_TIMESTAMP_FORMAT: &str = "%m/%d/%Y, %I:%M:%S %p";

/// Formats a report timestamp the way marker popups display it.
#[must_use]
pub fn format_popup_timestamp(at: &DateTime<Utc>) -> String {
    at.format(POPUP_TIMESTAMP_FORMAT).to_string()
}

/// Builds the popup HTML for a record: the captured image, the raw
/// severity label, and the reported date.
#[must_use]
pub fn popup_html(record: &PotholeRecord) -> String {
    format!(
        "<div class=\"popup-content\">\
         <img class=\"popup-image\" src=\"{}\" alt=\"Pothole Image\"><br>\
         Severity: {}<br>\
         Reported Date: {}</div>",
        escape_html(&record.image_url),
        escape_html(&record.severity_label),
        format_popup_timestamp(&record.reported_at),
    )
}

/// Builds a `GeoJSON` feature collection with one point per record, in
/// input order.
#[must_use]
pub fn marker_features(records: &[PotholeRecord]) -> FeatureCollection {
    let features = records.iter().map(marker_feature).collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn marker_feature(record: &PotholeRecord) -> Feature {
    let geometry = Geometry::new(geojson::Value::from(&to_geo_point(record.point)));

    let mut properties = JsonObject::new();
    properties.insert("imageUrl".to_string(), json!(record.image_url));
    properties.insert("severity".to_string(), json!(record.severity_label));
    properties.insert("severityScore".to_string(), json!(record.severity_score()));
    properties.insert(
        "reportedAt".to_string(),
        json!(record.reported_at.to_rfc3339()),
    );
    properties.insert("popupHtml".to_string(), json!(popup_html(record)));

    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
