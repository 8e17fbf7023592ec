#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Great-circle distance calculations.
//!
//! Radius queries in the analyzer compare haversine distances on a sphere
//! of radius [`EARTH_RADIUS_KM`]. Inputs are not range-checked: invalid
//! coordinates give defined but meaningless results.
//!
//! Helpers for moving between [`GeoPoint`] and [`geo::Point`] are provided
//! for callers that already work with `geo` geometries. Note that `geo`
//! orders coordinates `(x = longitude, y = latitude)`.

use pothole_map_pothole_models::GeoPoint;

/// Mean Earth radius in kilometers used for all distance calculations.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points in kilometers.
///
/// Symmetric, zero for identical points, never negative.
#[must_use]
pub fn distance(from: GeoPoint, to: GeoPoint) -> f64 {
    central_angle(from, to) * EARTH_RADIUS_KM
}

/// Central angle in radians between two points.
fn central_angle(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1 for near-antipodal points.
    let a = a.clamp(0.0, 1.0);

    2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Converts a [`GeoPoint`] into a `geo` point (`x` = longitude).
#[must_use]
pub fn to_geo_point(point: GeoPoint) -> geo::Point<f64> {
    geo::Point::new(point.longitude, point.latitude)
}

/// Converts a `geo` point (`x` = longitude) into a [`GeoPoint`].
#[must_use]
pub fn from_geo_point(point: geo::Point<f64>) -> GeoPoint {
    GeoPoint::new(point.y(), point.x())
}
