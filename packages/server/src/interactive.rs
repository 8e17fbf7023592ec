//! Interactive mode for the server.
//!
//! Prompts the user for bind address and port before starting the server.

use std::sync::Arc;

use dialoguer::{Confirm, Input};
use pothole_map_source::DataProvider;

use crate::ServerSettings;

/// Runs the server in interactive mode, prompting for configuration.
///
/// The prompts are pre-filled from `BIND_ADDR` and `PORT` (or the
/// defaults) and the answers are passed straight to [`super::run_server`].
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
#[allow(clippy::future_not_send)]
pub async fn run(provider: Arc<dyn DataProvider>) -> std::io::Result<()> {
    println!("Pothole Map Server");
    println!();

    let defaults = ServerSettings::from_env();

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default(defaults.bind_addr.clone())
        .interact_text()
        .unwrap_or(defaults.bind_addr);

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(defaults.port)
        .interact_text()
        .unwrap_or(defaults.port);

    if !Confirm::new()
        .with_prompt(format!("Start server on {bind_addr}:{port}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server(provider, ServerSettings { bind_addr, port }).await
}
