use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use sentiment_api::{create_router, AppState, Config};
use sentiment_core::logic::dataset::default_corpus;
use sentiment_core::logic::model::{fit, PredictionService};
use sentiment_core::logic::telemetry::{
    list_log_files, read_records, LogError, PredictionLogger, PredictionRecord, PredictionSink,
};

/// Sink whose disk is always full
#[derive(Default)]
struct FailingSink {
    attempts: AtomicUsize,
}

impl PredictionSink for FailingSink {
    fn record(&self, _entry: &PredictionRecord) -> Result<(), LogError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(LogError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "no space left on device",
        )))
    }
}

fn trained_service() -> Arc<PredictionService> {
    Arc::new(PredictionService::with_model(fit(&default_corpus()).unwrap()))
}

fn app_with_sink(sink: Arc<dyn PredictionSink>) -> Router {
    create_router(AppState {
        service: trained_service(),
        sink,
        config: Config::default(),
    })
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_predict(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_read_main() {
    let temp_dir = TempDir::new().unwrap();
    let app = app_with_sink(Arc::new(PredictionLogger::new(temp_dir.path()).unwrap()));

    let (status, body) = send(app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Sentiment Analysis API is running!"}));
}

#[tokio::test]
async fn test_predict_positive() {
    let temp_dir = TempDir::new().unwrap();
    let app = app_with_sink(Arc::new(PredictionLogger::new(temp_dir.path()).unwrap()));

    let (status, body) = send(app, post_predict(r#"{"text": "I love this product"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sentiment"], "Positive");
    assert_eq!(body["text"], "I love this product");
    assert_eq!(body["model_version"], "1.0");
}

#[tokio::test]
async fn test_predict_negative() {
    let temp_dir = TempDir::new().unwrap();
    let app = app_with_sink(Arc::new(PredictionLogger::new(temp_dir.path()).unwrap()));

    let (status, body) = send(app, post_predict(r#"{"text": "This is garbage"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sentiment"], "Negative");
}

#[tokio::test]
async fn test_prediction_is_logged() {
    let temp_dir = TempDir::new().unwrap();
    let app = app_with_sink(Arc::new(PredictionLogger::new(temp_dir.path()).unwrap()));

    let (status, _) = send(app, post_predict(r#"{"text": "Fantastic and helpful"}"#)).await;
    assert_eq!(status, StatusCode::OK);

    let files = list_log_files(temp_dir.path()).unwrap();
    assert_eq!(files.len(), 1);
    let records = read_records(&files[0]).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].input_text, "Fantastic and helpful");
    assert_eq!(records[0].predicted_label.as_str(), "Positive");
}

#[tokio::test]
async fn test_logging_failure_still_returns_prediction() {
    let sink = Arc::new(FailingSink::default());
    let app = app_with_sink(sink.clone());

    let (status, body) = send(app, post_predict(r#"{"text": "I love this product"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sentiment"], "Positive");
    assert_eq!(sink.attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_missing_text_is_unprocessable() {
    let sink = Arc::new(FailingSink::default());
    let app = app_with_sink(sink.clone());

    let (status, body) = send(app, post_predict(r#"{"message": "hi"}"#)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], 422);
    assert_eq!(sink.attempts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_malformed_json_is_unprocessable() {
    let app = app_with_sink(Arc::new(FailingSink::default()));

    let (status, _) = send(app.clone(), post_predict("{not json")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(app, post_predict(r#"{"text": 42}"#)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_empty_text_is_classified() {
    let app = app_with_sink(Arc::new(FailingSink::default()));

    let (status, body) = send(app, post_predict(r#"{"text": ""}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sentiment"], "Negative");
}

#[tokio::test]
async fn test_uninitialized_service_is_server_error() {
    let app = create_router(AppState {
        service: Arc::new(PredictionService::new()),
        sink: Arc::new(FailingSink::default()),
        config: Config::default(),
    });

    let (status, _) = send(app, post_predict(r#"{"text": "hello"}"#)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_status_reports_model() {
    let app = app_with_sink(Arc::new(FailingSink::default()));

    let (_, _) = send(app.clone(), post_predict(r#"{"text": "Best Product Ever!"}"#)).await;
    let (status, body) = send(app, get("/status")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model_loaded"], true);
    assert_eq!(body["model_version"], "1.0");
    assert_eq!(body["inference_count"], 1);
}

#[tokio::test]
async fn test_health() {
    let app = app_with_sink(Arc::new(FailingSink::default()));

    let (status, body) = send(app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}
