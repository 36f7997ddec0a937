//! Error handling for the backend

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Prism Central could not be reached, or the request to it failed.
    #[error("API connection failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// Prism Central answered with a non-success status.
    #[error("API connection failed: Prism Central returned status {status}")]
    UpstreamStatus { status: u16, message: String },

    #[error("Server error: {0}")]
    Internal(String),
}

impl ServerError {
    pub async fn from_response(response: reqwest::Response) -> ServerError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        ServerError::UpstreamStatus { status, message }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Upstream(_) | ServerError::UpstreamStatus { .. } => {
                StatusCode::BAD_GATEWAY
            }
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        if let ServerError::UpstreamStatus { status, message } = &self {
            log::debug!("Prism Central {} body: {}", status, message);
        }
        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
