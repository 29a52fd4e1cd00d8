use anyhow::Result;
use std::sync::Arc;

use analyst_mentor::config::Config;
use analyst_mentor::server::{AppState, app_router};

#[tokio::main]
async fn main() -> Result<()> {
    analyst_mentor::init_tracing();

    let config = Arc::new(Config::load());
    let bind = config.bind_addr()?;

    if config.groq.require_api_key().is_err() {
        // Requests will fail with 500 until the key is provided
        tracing::error!("Missing GROQ_API_KEY env var");
    }

    let router = app_router(AppState::from_config(Arc::clone(&config)));

    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(
        %bind,
        model = %config.groq.model,
        "Starting mentor HTTP server"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
