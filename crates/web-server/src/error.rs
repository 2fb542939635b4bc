use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing;

use crate::envelope::ApiResponse;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] database::DbError),
    #[error("Statistics error: {0}")]
    Stats(#[from] stats::StatsError),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    /// Recompute failures name the step so operators can tell which part of
    /// the pipeline broke; the underlying cause is already logged.
    #[error("Recompute failed at step '{step}'")]
    RecomputeStep { step: &'static str },
}

/// Converts our custom `AppError` into an HTTP response.
///
/// The taxonomy is fixed: 400 for malformed input, 404 for a missing entity
/// or season, 409 when a write conflicts with existing data, and a generic
/// 500 for everything else. Internal details are logged, never sent over the
/// wire.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Database(database::DbError::NotFound) => (
                StatusCode::NOT_FOUND,
                "The requested resource was not found".to_string(),
            ),
            AppError::Database(database::DbError::SeasonNotFound(year)) => (
                StatusCode::NOT_FOUND,
                format!("Season {} does not exist", year),
            ),
            AppError::Database(database::DbError::Conflict(message)) => {
                (StatusCode::CONFLICT, message)
            }
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal database error occurred".to_string(),
                )
            }
            AppError::Stats(stats_err) => {
                tracing::error!(error = ?stats_err, "Statistics computation error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred while computing statistics".to_string(),
                )
            }
            AppError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            AppError::RecomputeStep { step } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Recompute failed at step: {}", step),
            ),
        };

        let body = Json(ApiResponse::error(error_message));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_not_found_maps_to_404() {
        let response = AppError::Database(database::DbError::NotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn season_not_found_maps_to_404() {
        let response = AppError::Database(database::DbError::SeasonNotFound(2031)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn conflict_maps_to_409() {
        let response =
            AppError::Database(database::DbError::Conflict("duplicate entry".to_string()))
                .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn validation_maps_to_400() {
        let response = AppError::Validation("limit must be positive".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
