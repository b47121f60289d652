use downstream_client::DownstreamClient;
use error_translator::ErrorTranslator;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod app;
mod config;
mod endpoints;
mod errors;
mod extract;
mod state;
mod translate;

use config::AppConfig;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let app_config = AppConfig::load()?;
    tracing::debug!("Loaded configuration: {app_config:?}");

    let downstream_client = DownstreamClient::new(&app_config.downstream_url)?;
    tracing::debug!("Initialized a downstream client");

    let app_state = AppState::new(
        ErrorTranslator::new(),
        downstream_client,
        app_config.public_base_url,
    );
    let app = app::router(app_state);

    tracing::info!("Listening on port: {}", app_config.app_port);
    let listener = TcpListener::bind(format!("0.0.0.0:{}", app_config.app_port)).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
