/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_geo")]
    pub geo: GeoSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeoSettings {
    /// OpenWeather API key. The server boots without one; resolution
    /// calls fail until it is provided.
    #[serde(default)]
    pub key: Option<String>,

    #[serde(default = "default_geo_url")]
    pub url: String,

    /// Country code appended to ZIP lookups
    #[serde(default = "default_country")]
    pub country: String,
}

impl ServerConfig {
    /// Load configuration from file and environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        // Load from config file if it exists
        let config_path = path.unwrap_or_else(|| Path::new("config.toml"));
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path.to_path_buf()));
        }

        // Override with environment variables (prefixed with ATLAS_)
        settings = settings.add_source(
            config::Environment::with_prefix("ATLAS")
                .separator("_")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.server
            .host
            .parse::<std::net::IpAddr>()
            .map_err(|_| ServerError::Config(format!("invalid listen host {:?}", self.server.host)))?;

        if self.geo.url.is_empty() {
            return Err(ServerError::Config(
                "geo resolver URL must not be empty".to_string(),
            ));
        }

        if self.geo.key.is_none() {
            tracing::warn!("no OpenWeather API key configured (set ATLAS_GEO_KEY)");
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_geo() -> GeoSettings {
    GeoSettings {
        key: None,
        url: default_geo_url(),
        country: default_country(),
    }
}

fn default_geo_url() -> String {
    "https://api.openweathermap.org".to_string()
}

fn default_country() -> String {
    "US".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            geo: default_geo(),
        }
    }
}
