//! Typed HTTP client for the directory API.
//!
//! Mutations go through the REST surface; reads come from the realtime
//! feed. Failed calls are surfaced to the caller as-is; no retry is
//! attempted anywhere.

use crate::error::ClientError;
use atlas_core::types::{CreateUser, UpdateUser, UserRecord};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Client for the Atlas directory REST API.
///
/// # Example
///
/// ```ignore
/// let client = DirectoryClient::new("http://localhost:8080")?;
/// let user = client
///     .create_user(&CreateUser { name: "Alice".into(), zip: "10001".into() })
///     .await?;
/// client.delete_user(user.id.as_str()).await?;
/// ```
pub struct DirectoryClient {
    http: Client,
    base_url: String,
}

/// Error body shape returned by the API
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl DirectoryClient {
    /// Create a client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let url = base_url.into();
        if url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Normalize: strip the trailing slash, require an HTTP scheme
        let url = url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("AtlasDirectory/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: url,
        })
    }

    /// The normalized base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a user; the server assigns the id and derived geo fields.
    pub async fn create_user(&self, request: &CreateUser) -> Result<UserRecord, ClientError> {
        let url = format!("{}/users", self.base_url);
        debug!(url = %url, "creating user");

        let response = self.http.post(&url).json(request).send().await?;
        Self::decode(response).await
    }

    /// Fetch one user by id.
    pub async fn get_user(&self, id: &str) -> Result<UserRecord, ClientError> {
        let url = format!("{}/users/{}", self.base_url, id);
        debug!(url = %url, "fetching user");

        let response = self.http.get(&url).send().await?;
        Self::decode(response).await
    }

    /// Update a user's name and/or zip; a changed zip re-derives the geo
    /// fields server-side.
    pub async fn update_user(
        &self,
        id: &str,
        request: &UpdateUser,
    ) -> Result<UserRecord, ClientError> {
        let url = format!("{}/users/{}", self.base_url, id);
        debug!(url = %url, "updating user");

        let response = self.http.patch(&url).json(request).send().await?;
        Self::decode(response).await
    }

    /// Delete a user. The API answers 204 with an empty body.
    pub async fn delete_user(&self, id: &str) -> Result<(), ClientError> {
        let url = format!("{}/users/{}", self.base_url, id);
        debug!(url = %url, "deleting user");

        let response = self.http.delete(&url).send().await?;
        let status = response.status();
        if status.is_success() || status == StatusCode::NO_CONTENT {
            Ok(())
        } else {
            Err(Self::server_error(status, response).await)
        }
    }

    /// Fetch the plain-text greeting (connectivity check).
    pub async fn hello_world(&self) -> Result<String, ClientError> {
        let url = format!("{}/helloWorld", self.base_url);

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response.text().await?)
        } else {
            Err(Self::server_error(status, response).await)
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ClientError::Parse(format!("failed to parse response: {}", e)))
        } else {
            Err(Self::server_error(status, response).await)
        }
    }

    /// Build a `Server` error, decoding the `{"error"}` body when possible
    async fn server_error(status: StatusCode, response: Response) -> ClientError {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|decoded| decoded.error)
            .unwrap_or(body);
        ClientError::Server {
            status: status.as_u16(),
            message,
        }
    }
}
