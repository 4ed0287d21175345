//! Router-level tests driving the service the way the mobile client does.

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};
use tower::ServiceExt;

use ripesense::http::{AppState, app};
use ripesense::service::ClassifierService;

fn mock_app() -> Router {
    let service = ClassifierService::from_options(PathBuf::from("models"), true, true);
    app(AppState::new(Arc::new(service)))
}

fn sample_image_base64() -> String {
    let img = image::RgbImage::from_pixel(16, 16, image::Rgb([120, 200, 60]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    STANDARD.encode(bytes)
}

async fn post_classify(app: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/classify")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

#[tokio::test]
async fn classify_avocado_returns_five_sorted_predictions() {
    let (status, body) = post_classify(
        mock_app(),
        json!({ "image": sample_image_base64(), "produce_type": "avocado" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["produce_type"], json!("avocado"));

    let predictions = body["all_predictions"].as_array().unwrap();
    assert_eq!(predictions.len(), 5);

    let confidences: Vec<f64> = predictions
        .iter()
        .map(|p| p["confidence"].as_f64().unwrap())
        .collect();
    assert!(confidences.windows(2).all(|w| w[0] >= w[1]));

    let sum: f64 = confidences.iter().sum();
    assert!((sum - 1.0).abs() < 1e-5);

    let top = body["confidence"].as_f64().unwrap();
    assert!((0.70..=0.95).contains(&top));
    assert_eq!(body["predicted_class"], predictions[0]["class_name"]);
}

#[tokio::test]
async fn produce_type_defaults_to_avocado() {
    let (status, body) = post_classify(mock_app(), json!({ "image": sample_image_base64() })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["produce_type"], json!("avocado"));
    assert_eq!(body["all_predictions"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn banana_uses_its_three_class_table() {
    let (status, body) = post_classify(
        mock_app(),
        json!({ "image": sample_image_base64(), "produce_type": "banana" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["all_predictions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["class_name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 3);
    for expected in ["unripe", "ripe", "overripe"] {
        assert!(names.contains(&expected), "missing {expected}");
    }
}

#[tokio::test]
async fn data_url_prefix_is_accepted() {
    let (status, body) = post_classify(
        mock_app(),
        json!({
            "image": format!("data:image/png;base64,{}", sample_image_base64()),
            "produce_type": "avocado"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
}

#[tokio::test]
async fn invalid_base64_is_a_400_with_an_error_body() {
    let (status, body) = post_classify(
        mock_app(),
        json!({ "image": "not-base64!!", "produce_type": "avocado" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn unsupported_produce_type_is_a_400() {
    let (status, body) = post_classify(
        mock_app(),
        json!({ "image": sample_image_base64(), "produce_type": "mango" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("mango"));
}

#[cfg(feature = "real-models")]
#[tokio::test]
async fn corrupt_model_artifact_still_classifies_via_mock() {
    let dir = tempfile::tempdir().unwrap();
    let model_dir = dir.path().join("avocado");
    std::fs::create_dir_all(&model_dir).unwrap();
    std::fs::write(model_dir.join("keras_model.h5"), b"garbage weights").unwrap();

    let service = ClassifierService::from_options(dir.path().to_path_buf(), false, true);
    let app = app(AppState::new(Arc::new(service)));

    let (status, body) = post_classify(
        app,
        json!({ "image": sample_image_base64(), "produce_type": "avocado" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
}

#[tokio::test]
async fn health_reports_available_produce_types() {
    let response = mock_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], json!("healthy"));
    assert_eq!(body["available_produce_types"], json!(["avocado", "banana"]));
}

#[tokio::test]
async fn root_reports_service_and_version() {
    let response = mock_app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], json!("healthy"));
    assert!(body["version"].as_str().unwrap().contains('.'));
}
