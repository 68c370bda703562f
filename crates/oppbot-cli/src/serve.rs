//! `oppbot serve`: run the events webhook until Ctrl+C.
//!
//! Startup sequence:
//! 1. Load `.env` (outside production) and config
//! 2. Build the application context (Slack client + summary fetcher)
//! 3. Bind and serve the router, shutting down gracefully on Ctrl+C

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use oppbot_core::config::{load_config, load_dotenv};
use oppbot_dispatch::{router, AppContext, Dispatcher};

pub async fn run(config_path: Option<&Path>) -> Result<()> {
    load_dotenv();
    let config = load_config(config_path);

    if !config.slack.is_configured() {
        warn!("Slack bot token not set; joins and replies will fail");
    }
    if !config.summary.is_configured() {
        warn!("summary webhook URL not set; summary requests will use fallback text");
    }

    let ctx = AppContext::from_config(&config)?;
    let dispatcher = Arc::new(Dispatcher::new(Arc::new(ctx)));
    let app = router(dispatcher, &config.server.events_path);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        addr = %addr,
        events_path = %config.server.events_path,
        prefix = %config.slack.channel_prefix,
        dispatch_mode = ?config.server.dispatch_mode,
        "Slack event server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
