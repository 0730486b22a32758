use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mission_log::{cli::Cli, config::AppConfig, pb::Client, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so local runs pick up PB_URL, PORT, etc.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = cli.apply(AppConfig::from_env());

    let default_filter = if config.api.enable_request_logging {
        "info,mission_log=debug,tower_http=debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    config.validate().context("invalid configuration")?;
    tracing::info!("Starting Mission Log in {:?} mode", config.environment);

    let client = Client::new(config.backend_url()?, config.backend_timeout())
        .context("failed to build backend client")?;
    tracing::info!(backend = %client.base_url(), "backend configured");

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let base_url = config.base_url();
    let app = mission_log::app(AppState::with_backend(config, client));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Mission Log listening on {} ({})", bind_addr, base_url);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
