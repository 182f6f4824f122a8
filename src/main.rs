use std::{net::SocketAddr, sync::Arc};
use taskdesk_web::{AppState, Config, HttpBackend, load_preferences, page::Page, router};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    let prefs = load_preferences(&config.prefs_path).await;
    let backend = HttpBackend::new(&config.backend_url)?;
    let state = AppState::new(
        Page::new(prefs.theme),
        Arc::new(backend),
        config.prefs_path.clone(),
        config.alert_ttl,
    );

    let addr = SocketAddr::new(config.host, config.port);
    info!(backend = %config.backend_url, theme = ?prefs.theme, "listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
