use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use likes::LikeError;
use serde_json::json;
use thiserror::Error;

/// HTTP-layer error taxonomy. Storage failures become 500s and are logged;
/// not-found and validation outcomes are plain responses, not log events.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid request")]
    InvalidBody,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Like(#[from] LikeError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidBody => (StatusCode::BAD_REQUEST, "Invalid request".to_string()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.to_string()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.to_string()),
            AppError::Like(LikeError::NotFound) => {
                (StatusCode::NOT_FOUND, "Like not found".to_string())
            }
            AppError::Database(e) | AppError::Like(LikeError::Database(e)) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
