/// Health check and greeting routes
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// GET /health - Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /helloWorld - plain-text greeting
pub async fn hello_world() -> &'static str {
    tracing::info!("hello world requested");
    "Hello from Atlas Directory!"
}
