/// Geo resolver tests against a mocked OpenWeather upstream
use atlas_core::DirectoryError;
use atlas_server::{config::GeoSettings, services::GeoResolver};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(upstream: &MockServer, key: Option<&str>) -> GeoSettings {
    GeoSettings {
        key: key.map(str::to_string),
        url: upstream.uri(),
        country: "US".to_string(),
    }
}

#[tokio::test]
async fn resolves_coordinates_offset_and_zone() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("zip", "10001,US"))
        .and(query_param("appid", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "coord": { "lat": 40.7484, "lon": -73.9967 },
            "timezone": -18000,
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let resolver = GeoResolver::new(&settings(&upstream, Some("secret"))).unwrap();
    let location = resolver.resolve("10001", None).await.unwrap();

    assert_eq!(location.lat, 40.7484);
    assert_eq!(location.lon, -73.9967);
    assert_eq!(location.timezone, "America/New_York");
    assert_eq!(location.tz_offset_sec, -18000);
}

#[tokio::test]
async fn explicit_country_overrides_the_default() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("zip", "SW1A,GB"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "coord": { "lat": 51.5, "lon": -0.12 },
            "timezone": 0,
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let resolver = GeoResolver::new(&settings(&upstream, Some("secret"))).unwrap();
    let location = resolver.resolve("SW1A", Some("GB")).await.unwrap();

    assert_eq!(location.timezone, "Etc/GMT");
}

#[tokio::test]
async fn missing_offset_defaults_to_zero() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "coord": { "lat": 40.7484, "lon": -73.9967 },
        })))
        .mount(&upstream)
        .await;

    let resolver = GeoResolver::new(&settings(&upstream, Some("secret"))).unwrap();
    let location = resolver.resolve("10001", None).await.unwrap();

    assert_eq!(location.tz_offset_sec, 0);
}

#[tokio::test]
async fn missing_credential_is_a_config_error() {
    let upstream = MockServer::start().await;
    let resolver = GeoResolver::new(&settings(&upstream, None)).unwrap();

    match resolver.resolve("10001", None).await {
        Err(DirectoryError::Config(msg)) => assert!(msg.contains("API key")),
        other => panic!("expected Config error, got {:?}", other),
    }
    // no request leaves the process without a credential
    assert!(upstream.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn non_success_status_is_an_upstream_error_with_status_and_body() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(404).set_body_string("city not found"))
        .mount(&upstream)
        .await;

    let resolver = GeoResolver::new(&settings(&upstream, Some("secret"))).unwrap();

    match resolver.resolve("00000", None).await {
        Err(DirectoryError::Upstream { status, body }) => {
            assert_eq!(status, 404);
            assert_eq!(body, "city not found");
        }
        other => panic!("expected Upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn response_without_coordinates_is_a_data_error() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "coord": { "lat": "not a number" },
            "timezone": 0,
        })))
        .mount(&upstream)
        .await;

    let resolver = GeoResolver::new(&settings(&upstream, Some("secret"))).unwrap();

    match resolver.resolve("10001", None).await {
        Err(DirectoryError::Data(msg)) => assert!(msg.contains("coordinates")),
        other => panic!("expected Data error, got {:?}", other),
    }
}
