//! Menu actions.
//!
//! Each action collects its input step by step, validating as it goes, and
//! only then asks the controller to fetch and analyze. Controller errors
//! are printed, never propagated; only terminal I/O failures bubble up.

use dialoguer::Input;
use pothole_map_analytics_models::AreaReport;
use pothole_map_controller::{ControllerError, MapController, MapWidget};
use pothole_map_pothole_models::GeoPoint;
use pothole_map_spatial::from_geo_point;

fn notify(e: &ControllerError) {
    log::debug!("Action failed: {e}");
    println!("! {}", e.user_message());
}

fn print_report(report: &AreaReport) {
    println!("{report}");
    if report.average_severity.is_not_applicable() {
        println!("No potholes reported within {} km.", report.radius_km);
    }
}

/// Location of a marker feature, if its geometry is a point.
fn marker_location(feature: &geojson::Feature) -> Option<GeoPoint> {
    let value = feature.geometry.as_ref()?.value.clone();
    geo::Point::<f64>::try_from(value).ok().map(from_geo_point)
}

fn prompt_coordinate(prompt: &str, limit: f64) -> dialoguer::Result<f64> {
    Input::<f64>::new()
        .with_prompt(prompt)
        .validate_with(|value: &f64| {
            if value.is_finite() && value.abs() <= limit {
                Ok(())
            } else {
                Err(format!("Must be between -{limit} and {limit}"))
            }
        })
        .interact_text()
}

/// Prompts for a city name and reports on the area around it.
///
/// # Errors
///
/// Returns an error if the terminal prompt fails.
pub async fn search_city<W: MapWidget>(
    controller: &mut MapController<W>,
) -> dialoguer::Result<()> {
    let name: String = Input::new()
        .with_prompt("City name")
        .allow_empty(true)
        .interact_text()?;

    match controller.search_city(&name).await {
        Ok(result) => {
            println!(
                "Centered on {} ({})",
                result.city.name, result.city.point
            );
            print_report(&result.report);
        }
        Err(e) => notify(&e),
    }

    Ok(())
}

/// Prompts for a pin location and radius and reports on that area.
///
/// # Errors
///
/// Returns an error if the terminal prompt fails.
pub async fn drop_pin<W: MapWidget>(controller: &mut MapController<W>) -> dialoguer::Result<()> {
    let latitude = prompt_coordinate("Pin latitude", 90.0)?;
    let longitude = prompt_coordinate("Pin longitude", 180.0)?;

    let radius: String = Input::new()
        .with_prompt("Radius around the pin (km)")
        .allow_empty(true)
        .interact_text()?;

    match controller
        .drop_pin(GeoPoint::new(latitude, longitude), Some(&radius))
        .await
    {
        Ok(report) => print_report(&report),
        Err(e) => notify(&e),
    }

    Ok(())
}

/// Prints one line per pothole report.
pub async fn list_markers<W: MapWidget>(controller: &MapController<W>) {
    let collection = match controller.markers().await {
        Ok(collection) => collection,
        Err(e) => {
            notify(&e);
            return;
        }
    };

    println!("{} pothole reports", collection.features.len());

    for feature in &collection.features {
        let location =
            marker_location(feature).map_or_else(|| "(unknown)".to_string(), |p| p.to_string());
        let severity = feature
            .property("severity")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        let reported = feature
            .property("reportedAt")
            .and_then(|v| v.as_str())
            .unwrap_or_default();

        println!("  {location}  severity: {severity}  reported: {reported}");
    }
}
