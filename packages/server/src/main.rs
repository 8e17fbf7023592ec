#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the pothole map application.
//!
//! Loads the data-source configuration (embedded default, or the file named
//! by `POTHOLE_MAP_CONFIG`) and serves the API on `BIND_ADDR`:`PORT`.

use std::sync::Arc;

use pothole_map_server::{ServerSettings, run_server};
use pothole_map_source::{DataSourceConfig, DocumentProvider};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config = DataSourceConfig::from_env()?;
    let provider = Arc::new(DocumentProvider::from_config(&config));

    run_server(provider, ServerSettings::from_env()).await?;

    Ok(())
}
