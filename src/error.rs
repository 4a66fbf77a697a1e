use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub success: bool,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Missing and soft-deleted rows answer the same way: 404, empty body.
            AppError::NotFound => StatusCode::NOT_FOUND.into_response(),
            AppError::BadRequest(message) | AppError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    message,
                    success: false,
                }),
            )
                .into_response(),
            AppError::Database(err) => {
                error!("database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        message: "Database error occurred".to_string(),
                        success: false,
                    }),
                )
                    .into_response()
            }
        }
    }
}
