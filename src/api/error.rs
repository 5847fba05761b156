use axum::{
    extract::{
        rejection::{BytesRejection, PathRejection},
        FromRequestParts,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use super::response::ErrorResponse;
use crate::db::RepositoryError;

#[derive(Debug)]
pub enum AppError {
    /// Malformed body, bad or missing path id, unknown entity
    BadRequest(String),
    NotFound,
    /// The store failed; details are logged, not returned
    Store,
    /// An extractor refused the request before the handler ran
    Rejected(StatusCode, String),
    Timeout,
    Internal,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest(message.into())
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => AppError::NotFound,
            // already logged by the repository
            RepositoryError::Database(_) => AppError::Store,
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        AppError::Rejected(rejection.status(), rejection.body_text())
    }
}

/// `Path` whose rejection is answered with the JSON error envelope.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Resource not found".to_string()),
            AppError::Store => (StatusCode::BAD_GATEWAY, "Database error".to_string()),
            AppError::Rejected(status, msg) => (status, msg),
            AppError::Timeout => (
                StatusCode::GATEWAY_TIMEOUT,
                "Request timed out".to_string(),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        if status.is_server_error() {
            tracing::error!(
                status = status.as_u16(),
                error = message.as_str(),
                "request failed"
            );
        } else {
            tracing::warn!(
                status = status.as_u16(),
                error = message.as_str(),
                "request rejected"
            );
        }

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::bad_request("x").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Store.into_response().status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::Rejected(StatusCode::PAYLOAD_TOO_LARGE, "too big".to_string())
                .into_response()
                .status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            AppError::Timeout.into_response().status(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            AppError::Internal.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_repository_error() {
        assert!(matches!(
            AppError::from(RepositoryError::NotFound),
            AppError::NotFound
        ));
        assert!(matches!(
            AppError::from(RepositoryError::Database(sqlx::Error::PoolTimedOut)),
            AppError::Store
        ));
    }
}
