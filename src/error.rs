//! Error types for the avatar server
//!
//! Provides unified error handling using thiserror. Cache misses are not
//! errors and never appear here.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Avatar Error Enum ==
/// Unified error type for the avatar server.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AvatarError {
    /// Name is empty after trimming
    #[error("Name cannot be empty")]
    EmptyName,

    /// Name starts with a character that cannot be drawn
    #[error("Unsupported character: {0:?}")]
    UnsupportedCharacter(char),

    /// Requested image encoding is not available
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Rasterizing or encoding the image failed
    #[error("Render error: {0}")]
    Render(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for AvatarError {
    fn into_response(self) -> Response {
        let status = match &self {
            AvatarError::Render(msg) => {
                tracing::error!("Avatar render failed: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the avatar server.
pub type Result<T> = std::result::Result<T, AvatarError>;
