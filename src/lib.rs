pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod server;

#[cfg(test)]
pub(crate) mod test_support;

use anyhow::{Context, Result};
use app::{builder::StateBuilder, cache::StateCache, settings::RuntimeSettings};
use cli::Cli;
use data::{forecast::ForecastClient, locations::resolve_locations};
use server::{AppState, create_router};
use tokio::net::TcpListener;
use tracing::info;

pub async fn run(cli: Cli) -> Result<()> {
    let settings = RuntimeSettings::from_cli(&cli);
    let builder = state_builder(&settings)?;

    if cli.print_state {
        return print_state(&settings, &builder).await;
    }

    let cache = StateCache::new(builder, settings.refresh_interval);
    info!(refresh = ?cache.refresh_interval(), "state cache configured");

    let listener = bind_listener(&settings).await?;
    let addr = listener.local_addr().context("reading bound address")?;
    info!("weather backend running on http://{addr}");
    let app = create_router(AppState::new(settings, cache));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

/// Binds the configured host, resolving names such as `localhost`.
pub async fn bind_listener(settings: &RuntimeSettings) -> Result<TcpListener> {
    let host = settings.host.as_str();
    let port = settings.port;
    TcpListener::bind((host, port))
        .await
        .with_context(|| format!("failed to bind {host}:{port}"))
}

pub fn state_builder(settings: &RuntimeSettings) -> Result<StateBuilder> {
    let client = ForecastClient::with_base_url(&settings.forecast_url, settings.upstream_timeout)
        .context("building forecast client")?;
    Ok(StateBuilder::new(client, settings.region_title.clone()))
}

async fn print_state(settings: &RuntimeSettings, builder: &StateBuilder) -> Result<()> {
    let locations = resolve_locations(&settings.location_sources).await;
    anyhow::ensure!(!locations.is_empty(), "no locations configured");
    let state = builder.build(&locations).await?;
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    } else {
        // No signal handler available; run until the process is killed.
        std::future::pending::<()>().await;
    }
}
