//! Unified error handling for admin.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use roster_core::ConsoleError;
use serde::Serialize;
use thiserror::Error;

/// Application-level error type for the admin panel.
#[derive(Debug, Error)]
pub enum AppError {
    /// The console rejected an intent.
    #[error(transparent)]
    Console(#[from] ConsoleError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The console actor is not accepting commands.
    #[error("Console unavailable: {0}")]
    Unavailable(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON body returned for every error.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl AppError {
    /// HTTP status this error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Console(ConsoleError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Console(ConsoleError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Console(
                ConsoleError::NoOpenDraft | ConsoleError::DraftKindMismatch { .. },
            ) => StatusCode::CONFLICT,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    const fn code(&self) -> &'static str {
        match self {
            Self::Console(ConsoleError::NotFound { .. }) => "not_found",
            Self::Console(ConsoleError::Validation(_)) => "validation",
            Self::Console(ConsoleError::NoOpenDraft) => "no_open_draft",
            Self::Console(ConsoleError::DraftKindMismatch { .. }) => "draft_kind_mismatch",
            Self::BadRequest(_) => "bad_request",
            Self::Unavailable(_) => "unavailable",
            Self::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log server errors with Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        let body = ErrorBody {
            error: self.code(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use roster_core::{ValidationError, types::EmailError};

    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::from(ConsoleError::NotFound {
            entity: "user",
            id: 42,
        });
        assert_eq!(err.to_string(), "user 42 not found");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(ConsoleError::NotFound { entity: "role", id: 9 }.into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(ConsoleError::NoOpenDraft.into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(
                ConsoleError::DraftKindMismatch {
                    submitted: roster_core::DraftKind::User,
                    open: roster_core::DraftKind::Role,
                }
                .into()
            ),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(
                ConsoleError::Validation(ValidationError::InvalidEmail(EmailError::Empty)).into()
            ),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Unavailable("test".to_string())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
