use album_service::config::AlbumConfig;
use album_service::services::init_metrics;
use album_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Must run before any metrics are recorded.
    init_metrics();

    let config = AlbumConfig::load().map_err(|e| {
        eprintln!("failed to load configuration: {e}");
        std::io::Error::other(format!("configuration error: {e}"))
    })?;

    init_tracing(&config.common.log_level);

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("failed to build application: {}", e);
        std::io::Error::other(format!("startup error: {e}"))
    })?;

    app.run_until_stopped().await
}
