mod api;
mod app;
mod application;
mod domain;
mod ui;
mod utils;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match api::ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Falling back to default configuration");
            api::ClientConfig::default()
        }
    };
    info!(endpoint = %config.endpoint, "Starting marks uploader");

    iced::application(
        move || app::UploadApp::new(config.clone()),
        app::update,
        app::view,
    )
    .title("PDF to Excel Extractor")
    .run()
}
