#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the pothole map application.
//!
//! Exposes city lookup, radius analysis, and pothole markers as JSON and
//! `GeoJSON` under `/api`, plus the area report as HTML, and serves a built
//! frontend from `app/dist` when one exists. Each request runs against a
//! fresh controller, so the server holds no per-user map state.

mod handlers;
pub mod interactive;

use std::path::Path;
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use pothole_map_source::DataProvider;

/// Directory the frontend build is served from.
pub const STATIC_DIR: &str = "app/dist";

/// Default bind address when `BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";

/// Default port when `PORT` is unset or invalid.
pub const DEFAULT_PORT: u16 = 8080;

/// Shared application state.
pub struct AppState {
    /// Where cities and pothole reports come from.
    pub provider: Arc<dyn DataProvider>,
}

/// Address the HTTP server binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Interface to bind.
    pub bind_addr: String,
    /// TCP port.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerSettings {
    /// Reads `BIND_ADDR` and `PORT`, falling back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("BIND_ADDR").ok(),
            std::env::var("PORT").ok(),
        )
    }

    fn from_values(bind_addr: Option<String>, port: Option<String>) -> Self {
        Self {
            bind_addr: bind_addr
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            port: port
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }
}

/// Registers the `/api` routes.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::QueryConfig::default().error_handler(handlers::query_error))
            .route("/health", web::get().to(handlers::health))
            .route("/cities", web::get().to(handlers::cities))
            .route("/analyze", web::get().to(handlers::analyze))
            .route("/report", web::get().to(handlers::report))
            .route("/search", web::get().to(handlers::search))
            .route("/markers", web::get().to(handlers::markers)),
    );
}

fn configure_static(cfg: &mut web::ServiceConfig) {
    if Path::new(STATIC_DIR).is_dir() {
        cfg.service(Files::new("/", STATIC_DIR).index_file("index.html"));
    }
}

/// Starts the pothole map API server.
///
/// This is a regular async function; the caller provides the runtime
/// (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(
    provider: Arc<dyn DataProvider>,
    settings: ServerSettings,
) -> std::io::Result<()> {
    log::info!("Serving data from {}", provider.describe());

    if !Path::new(STATIC_DIR).is_dir() {
        log::debug!("No frontend build at {STATIC_DIR}, serving the API only");
    }

    let state = web::Data::new(AppState { provider });
    let ServerSettings { bind_addr, port } = settings;

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure_api)
            .configure(configure_static)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_default_when_unset() {
        assert_eq!(ServerSettings::from_values(None, None), ServerSettings::default());
    }

    #[test]
    fn settings_read_values() {
        let settings =
            ServerSettings::from_values(Some("0.0.0.0".to_string()), Some(" 9090 ".to_string()));
        assert_eq!(settings.bind_addr, "0.0.0.0");
        assert_eq!(settings.port, 9090);
    }

    #[test]
    fn invalid_port_falls_back() {
        let settings =
            ServerSettings::from_values(Some(String::new()), Some("http".to_string()));
        assert_eq!(settings, ServerSettings::default());
    }
}
