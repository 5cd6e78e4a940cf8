use std::net::SocketAddr;
use anyhow::Context;
use fare_api::{app, AppState};
use fare_core::SearchOrchestrator;
use fare_supplier::{app_config::Config, build_offer_source};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "fare_api=debug,fare_core=debug,fare_supplier=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting fare API on port {}", config.server.port);

    // Created once here and shared by every request
    let source = build_offer_source(&config.supplier).context("Failed to build offer source")?;
    match &source {
        Some(s) => tracing::info!("Using offer source: {}", s.name()),
        None => tracing::warn!("No offer source configured; only text extraction is available"),
    }

    let app = app(AppState::new(SearchOrchestrator::new(source)));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
