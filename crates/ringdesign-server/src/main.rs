mod api;
mod middleware;

use ringdesign_scraper::RingImporter;
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, build_cors, AppState},
    middleware::RateLimitState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = ringdesign_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let registry = ringdesign_core::load_vendor_registry(config.vendors_path.as_deref())?;
    tracing::info!(
        env = %config.env,
        vendors = registry.len(),
        fetch_timeout_secs = config.fetch_timeout_secs,
        "vendor registry loaded"
    );

    let importer = RingImporter::from_app_config(&config, registry)?;
    let cors = build_cors(config.allowed_origin.as_deref(), &config.env)?;
    let app = build_app(
        AppState { importer },
        RateLimitState::per_minute(config.rate_limit_per_minute),
        cors,
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "ring designer api listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
