use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::{Router, extract::State};
use metrics::counter;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::service::ClassifierService;
use crate::types::{ClassificationRequest, ErrorResponse, ProduceType};

pub const SERVICE_NAME: &str = "RipeSense API";

#[derive(Clone)]
pub struct AppState {
    service: Arc<ClassifierService>,
}

impl AppState {
    pub fn new(service: Arc<ClassifierService>) -> Self {
        Self { service }
    }
}

/// Build the service router. CORS stays permissive; the API backs a
/// mobile app served from a different origin. The Prometheus layer is
/// attached by the binary, which owns the process-global recorder.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/classify", post(classify_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root_handler() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn health_handler() -> Json<serde_json::Value> {
    let produce_types: Vec<&str> = ProduceType::ALL.iter().map(|pt| pt.as_str()).collect();
    Json(json!({
        "status": "healthy",
        "available_produce_types": produce_types,
    }))
}

#[tracing::instrument(skip(state, request), fields(produce_type = %request.produce_type))]
async fn classify_handler(
    State(state): State<AppState>,
    Json(request): Json<ClassificationRequest>,
) -> Response {
    counter!("classification_requests_total").increment(1);

    // The pipeline is synchronous and CPU-bound (image decode, resize,
    // inference); keep it off the async workers.
    let service = state.service.clone();
    let result = tokio::task::spawn_blocking(move || {
        service.classify(&request.image, &request.produce_type)
    })
    .await;

    match result {
        Ok(Ok(response)) => Json(response).into_response(),
        Ok(Err(err)) => {
            tracing::error!(error = %err, "classification failed");
            err.into_response()
        }
        Err(join_err) => {
            tracing::error!(error = %join_err, "classification task failed to complete");
            let body = ErrorResponse {
                success: false,
                error: "classification failed unexpectedly".to_string(),
                detail: None,
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}
