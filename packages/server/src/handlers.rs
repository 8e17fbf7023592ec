//! HTTP handler functions for the pothole map API.

use actix_web::error::{InternalError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, web};
use pothole_map_analytics::render_html;
use pothole_map_analytics_models::{AnalyzeParams, AreaReport, CityParams, SearchParams};
use pothole_map_controller::{
    CITY_SEARCH_RADIUS_KM, ControllerError, MapController, RecordingMapWidget, parse_radius,
};
use pothole_map_pothole_models::GeoPoint;
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
struct ApiHealth {
    healthy: bool,
    version: String,
}

#[derive(Serialize)]
struct ApiError {
    error: String,
}

fn controller(state: &AppState) -> MapController<RecordingMapWidget> {
    MapController::new(RecordingMapWidget::default(), state.provider.clone())
}

fn error_response(e: &ControllerError) -> HttpResponse {
    let body = ApiError {
        error: e.user_message(),
    };

    match e {
        ControllerError::InvalidInput { .. } => HttpResponse::BadRequest().json(body),
        ControllerError::NotFound { .. } => HttpResponse::NotFound().json(body),
        ControllerError::DataUnavailable { .. } => {
            log::error!("{e}");
            HttpResponse::ServiceUnavailable().json(body)
        }
    }
}

/// Turns a query string that does not deserialize into a JSON 400.
pub fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ApiError {
        error: format!("Invalid query parameters: {err}"),
    });
    InternalError::from_response(err, response).into()
}

async fn drop_pin(state: &AppState, params: &AnalyzeParams) -> Result<AreaReport, HttpResponse> {
    let point = GeoPoint::new(params.lat, params.lng);
    if !point.is_valid() {
        return Err(HttpResponse::BadRequest().json(ApiError {
            error: format!("Coordinates {point} are out of range."),
        }));
    }

    controller(state)
        .drop_pin(point, params.radius.as_deref())
        .await
        .map_err(|e| error_response(&e))
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/cities?name=`
///
/// Looks up a single city by name.
pub async fn cities(state: web::Data<AppState>, params: web::Query<CityParams>) -> HttpResponse {
    let name = params.name.as_deref().unwrap_or_default();

    match controller(&state).lookup_city(name).await {
        Ok(city) => HttpResponse::Ok().json(city),
        Err(e) => error_response(&e),
    }
}

/// `GET /api/analyze?lat=&lng=&radius=`
///
/// Analyzes the potholes within `radius` kilometers of a dropped pin.
pub async fn analyze(
    state: web::Data<AppState>,
    params: web::Query<AnalyzeParams>,
) -> HttpResponse {
    match drop_pin(&state, &params).await {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(response) => response,
    }
}

/// `GET /api/report?lat=&lng=&radius=`
///
/// Same analysis as [`analyze`], rendered as the results-panel HTML.
pub async fn report(
    state: web::Data<AppState>,
    params: web::Query<AnalyzeParams>,
) -> HttpResponse {
    match drop_pin(&state, &params).await {
        Ok(report) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(render_html(&report)),
        Err(response) => response,
    }
}

/// `GET /api/search?city=&radius=`
///
/// Finds a city and analyzes the area around it. `radius` defaults to
/// [`CITY_SEARCH_RADIUS_KM`].
pub async fn search(state: web::Data<AppState>, params: web::Query<SearchParams>) -> HttpResponse {
    let radius_km = match params.radius.as_deref() {
        None => CITY_SEARCH_RADIUS_KM,
        Some(raw) => match parse_radius(Some(raw)) {
            Ok(radius) => radius,
            Err(e) => return error_response(&e),
        },
    };
    let city = params.city.as_deref().unwrap_or_default();

    match controller(&state)
        .search_city_with_radius(city, radius_km)
        .await
    {
        Ok(result) => HttpResponse::Ok().json(serde_json::json!({
            "city": result.city,
            "report": result.report,
        })),
        Err(e) => error_response(&e),
    }
}

/// `GET /api/markers`
///
/// Returns every pothole report as a `GeoJSON` point feature.
pub async fn markers(state: web::Data<AppState>) -> HttpResponse {
    match controller(&state).markers().await {
        Ok(collection) => HttpResponse::Ok().json(collection),
        Err(e) => error_response(&e),
    }
}
