use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::db::DbError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid year")]
    InvalidYear,
    #[error(transparent)]
    Db(#[from] DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::InvalidYear => (StatusCode::BAD_REQUEST, "Invalid year"),
            ApiError::Db(e) if e.is_connection_error() => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to connect to database",
            ),
            ApiError::Db(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to query database",
            ),
        };

        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        (status, body).into_response()
    }
}
