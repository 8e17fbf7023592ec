#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Interactive terminal front end for the pothole map.
//!
//! Lets users search for a city, drop a pin with a search radius, list
//! every reported pothole, or start the HTTP server. Failed actions are
//! shown as notifications and the menu comes back.

mod actions;

use std::sync::Arc;

use dialoguer::Select;
use pothole_map_controller::{MapController, RecordingMapWidget};
use pothole_map_source::{DataProvider, DataSourceConfig, DocumentProvider};

/// Top-level menu entries.
enum Action {
    SearchCity,
    DropPin,
    ClearPin,
    ListMarkers,
    Server,
    Quit,
}

impl Action {
    const ALL: &[Self] = &[
        Self::SearchCity,
        Self::DropPin,
        Self::ClearPin,
        Self::ListMarkers,
        Self::Server,
        Self::Quit,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::SearchCity => "Search for a city",
            Self::DropPin => "Drop a pin",
            Self::ClearPin => "Clear the pin",
            Self::ListMarkers => "List pothole markers",
            Self::Server => "Start server",
            Self::Quit => "Quit",
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config = DataSourceConfig::from_env()?;
    let provider: Arc<dyn DataProvider> = Arc::new(DocumentProvider::from_config(&config));

    println!("Pothole Map");
    println!();

    let mut controller = MapController::new(RecordingMapWidget::default(), provider.clone());
    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    loop {
        let idx = Select::new()
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        match Action::ALL[idx] {
            Action::SearchCity => actions::search_city(&mut controller).await?,
            Action::DropPin => actions::drop_pin(&mut controller).await?,
            Action::ClearPin => {
                controller.clear_pin();
                println!("Pin cleared.");
            }
            Action::ListMarkers => actions::list_markers(&controller).await,
            Action::Server => {
                // actix-web runs its own system; keep it off the tokio workers.
                let provider = provider.clone();
                tokio::task::spawn_blocking(move || {
                    actix_web::rt::System::new()
                        .block_on(pothole_map_server::interactive::run(provider))
                })
                .await??;
            }
            Action::Quit => break,
        }

        println!();
    }

    Ok(())
}
