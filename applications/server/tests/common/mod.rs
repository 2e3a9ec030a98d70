/// Common test utilities and fixtures
use atlas_server::{api, config::GeoSettings, services::GeoResolver, state::AppState};
use atlas_store::RealtimeDb;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::util::ServiceExt;
use wiremock::MockServer;

/// Build the app router backed by a fresh store and the mocked upstream
pub fn create_test_app(upstream: &MockServer) -> (Router, RealtimeDb) {
    create_app_with_key(upstream, Some("test-key".to_string()))
}

/// Same, but without a geo credential configured
pub fn create_test_app_without_key(upstream: &MockServer) -> (Router, RealtimeDb) {
    create_app_with_key(upstream, None)
}

fn create_app_with_key(upstream: &MockServer, key: Option<String>) -> (Router, RealtimeDb) {
    let db = RealtimeDb::new();
    let geo = GeoResolver::new(&GeoSettings {
        key,
        url: upstream.uri(),
        country: "US".to_string(),
    })
    .unwrap();
    let app_state = AppState::new(db.clone(), Arc::new(geo));
    (api::router(app_state), db)
}

/// Weather payload the mock upstream returns
pub fn weather_body(lat: f64, lon: f64, tz_offset: i64) -> serde_json::Value {
    serde_json::json!({
        "coord": { "lat": lat, "lon": lon },
        "timezone": tz_offset,
    })
}

/// Drive one request through the router; returns status and raw body
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec();
    (status, bytes)
}

/// Decode a response body as JSON
pub fn json_body(bytes: &[u8]) -> serde_json::Value {
    serde_json::from_slice(bytes).unwrap()
}
