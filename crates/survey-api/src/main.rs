//! survey-api binary entry point.

use survey_api::{build_router, logging, shutdown_signal, AppState, ServerConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let log_config = logging::LogConfig::from_env();
    let _file_guard = logging::init_tracing(&log_config);

    info!(
        log_format = ?log_config.format,
        log_file = log_config
            .file
            .as_deref()
            .and_then(|p| p.to_str())
            .unwrap_or("(stdout)"),
        "Logging initialized"
    );

    let config = ServerConfig::from_env();
    config.validate()?;

    info!(
        "Webhook forwarding: {}",
        if config.webhook_enabled() {
            "enabled"
        } else {
            "disabled"
        }
    );

    let addr = config.bind_addr()?;
    let state = AppState::new(config)?;
    let app = build_router(state);

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
