//! ZIP-to-location resolution via the OpenWeather API.
//!
//! The current-weather-by-ZIP endpoint carries coordinates and a UTC
//! offset; the IANA zone is then derived from the coordinates alone (see
//! [`tz`]). One outbound call per invocation, no caching; each call is
//! independent.

use super::tz;
use crate::config::GeoSettings;
use atlas_core::{DirectoryError, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Location data derived from a ZIP code
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub lat: f64,
    pub lon: f64,
    pub timezone: String,
    pub tz_offset_sec: i64,
}

/// Resolver handle; built once at startup from [`GeoSettings`]
pub struct GeoResolver {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    default_country: String,
}

impl GeoResolver {
    pub fn new(settings: &GeoSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| DirectoryError::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: settings.url.trim_end_matches('/').to_string(),
            api_key: settings.key.clone(),
            default_country: settings.country.clone(),
        })
    }

    /// Resolve a ZIP code to coordinates and timezone data.
    ///
    /// `country` falls back to the configured default. Fails when the
    /// credential is absent, the upstream answers non-success (the status
    /// code and body are preserved in the error), or the response lacks
    /// numeric coordinates. A missing offset reads as 0.
    pub async fn resolve(&self, zip: &str, country: Option<&str>) -> Result<ResolvedLocation> {
        let key = self.api_key.as_deref().ok_or_else(|| {
            DirectoryError::config("missing OpenWeather API key (set ATLAS_GEO_KEY)")
        })?;
        let country = country.unwrap_or(&self.default_country);
        let url = format!("{}/data/2.5/weather", self.base_url);

        debug!(zip = %zip, country = %country, "resolving location");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("zip", format!("{},{}", zip, country)),
                ("appid", key.to_string()),
            ])
            .send()
            .await
            .map_err(|e| DirectoryError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectoryError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| DirectoryError::data(format!("invalid geocoding response: {}", e)))?;

        let lat = data.pointer("/coord/lat").and_then(Value::as_f64);
        let lon = data.pointer("/coord/lon").and_then(Value::as_f64);
        let (Some(lat), Some(lon)) = (lat, lon) else {
            return Err(DirectoryError::data(
                "could not resolve coordinates from ZIP",
            ));
        };
        let tz_offset_sec = data.get("timezone").and_then(Value::as_i64).unwrap_or(0);

        // IANA zone from lat/lon; no further network call
        let timezone = tz::zone_for_coordinates(lat, lon);

        debug!(lat, lon, timezone = %timezone, "location resolved");

        Ok(ResolvedLocation {
            lat,
            lon,
            timezone,
            tz_offset_sec,
        })
    }
}
