mod bootstrap;
mod health;
mod routes;
mod service;

use anyhow::Result;
use tracing::info;

use golinks_core::config::{AppConfig, LoadOptions};

fn init_logging(config: &AppConfig) {
    use golinks_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

pub async fn run() -> Result<()> {
    // Load config and initialize logging before any other operations
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    let app = bootstrap::with_config(config).await?;

    let address = format!("{}:{}", app.config.server.bind_address, app.config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;

    info!(
        event_name = "system.server.started",
        bind_address = %address,
        trigger_word = %app.config.slack.trigger_word,
        "go-link server listening"
    );

    let router = routes::router(app.state.clone()).merge(health::router(app.db_pool.clone()));
    let grace_secs = app.config.server.graceful_shutdown_secs;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal(grace_secs)).await?;

    info!(event_name = "system.server.stopped", "go-link server stopped");
    Ok(())
}

async fn shutdown_signal(grace_secs: u64) {
    if tokio::signal::ctrl_c().await.is_err() {
        return;
    }
    info!(
        event_name = "system.server.stopping",
        grace_secs, "shutdown signal received; draining connections"
    );
}
