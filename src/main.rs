use axum::routing::get;
use axum_prometheus::PrometheusMetricLayer;
use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;

use ripesense::config::Config;
use ripesense::http::{self, AppState};
use ripesense::service::ClassifierService;
use ripesense::types::ProduceType;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ripesense=debug".into()),
        )
        .init();

    let config = Config::parse();
    tracing::info!("Starting ripeness server with config: {:?}", config);

    let service = Arc::new(ClassifierService::from_options(
        config.models_dir.clone(),
        config.use_mock,
        config.cpu_only,
    ));

    // Warm the default model so the first request doesn't pay the load.
    let warm = service.clone();
    tokio::task::spawn_blocking(move || warm.registry().resolve(ProduceType::Avocado)).await?;
    tracing::info!("Classifier ready");

    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
    let app = http::app(AppState::new(service))
        .route("/metrics", get(|| async move { metric_handle.render() }))
        .layer(prometheus_layer);

    let listener = TcpListener::bind(&config.server_address()).await?;
    tracing::info!("Server running on http://{}", config.server_address());

    axum::serve(listener, app).await?;
    Ok(())
}
