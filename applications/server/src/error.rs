/// Server error types
use atlas_core::DirectoryError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Directory(#[from] DirectoryError),
}

impl From<atlas_store::StoreError> for ServerError {
    fn from(err: atlas_store::StoreError) -> Self {
        // Convert StoreError -> DirectoryError -> ServerError
        ServerError::Directory(err.into())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        // Everything except a missing record collapses to 400 with a bare
        // message string; callers cannot tell validation failures from
        // upstream ones by status code. The contract predates this
        // implementation and is kept as-is.
        let (status, error_message) = match self {
            ServerError::NotFound | ServerError::Directory(DirectoryError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, "Not found".to_string())
            }
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::Config(msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    format!("Configuration error: {}", msg),
                )
            }
            ServerError::Directory(err) => {
                tracing::warn!("Request failed: {}", err);
                (StatusCode::BAD_REQUEST, err.to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = ServerError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn directory_not_found_maps_to_404() {
        let err = ServerError::Directory(DirectoryError::not_found("user", "x"));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn upstream_errors_collapse_to_400() {
        let err = ServerError::Directory(DirectoryError::Upstream {
            status: 502,
            body: "bad gateway".to_string(),
        });
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn validation_errors_collapse_to_400() {
        let err = ServerError::Directory(DirectoryError::validation("name must not be empty"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
