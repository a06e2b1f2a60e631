//! # error
//!
//! Centralised application error type.
//!
//! Every handler returns `Result<_, AppError>`.  The `IntoResponse` impl
//! produces a plain JSON fallback body and stashes a [`Failure`] in the
//! response extensions; the error-dispatch middleware
//! ([`crate::dispatch::middleware`]) then picks the final shape (admin page,
//! redirect or JSON body) with the request's metadata in hand.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dispatch::context::{Failure, FailureKind};

// ─── ErrorCode ────────────────────────────────────────────────────────────────

/// Machine-readable error codes surfaced to API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    VenueNotFound,
    VenueStyleNotFound,
    UserNotFound,
    InternalError,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::BadRequest         => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized       => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden          => StatusCode::FORBIDDEN,
            ErrorCode::NotFound
            | ErrorCode::VenueNotFound
            | ErrorCode::VenueStyleNotFound
            | ErrorCode::UserNotFound     => StatusCode::NOT_FOUND,
            ErrorCode::InternalError      => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ErrorCode::BadRequest         => "BAD_REQUEST",
            ErrorCode::Unauthorized       => "UNAUTHORIZED",
            ErrorCode::Forbidden          => "FORBIDDEN",
            ErrorCode::NotFound           => "NOT_FOUND",
            ErrorCode::VenueNotFound      => "VENUE_NOT_FOUND",
            ErrorCode::VenueStyleNotFound => "VENUE_STYLE_NOT_FOUND",
            ErrorCode::UserNotFound       => "USER_NOT_FOUND",
            ErrorCode::InternalError      => "INTERNAL_ERROR",
        }
    }

    /// Default client-facing message. Never carries internal detail.
    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::BadRequest         => "Invalid request",
            ErrorCode::Unauthorized       => "Authentication is required",
            ErrorCode::Forbidden          => "You do not have permission to access this resource",
            ErrorCode::NotFound           => "Resource not found",
            ErrorCode::VenueNotFound      => "Venue not found",
            ErrorCode::VenueStyleNotFound => "Venue style not found",
            ErrorCode::UserNotFound       => "User not found",
            ErrorCode::InternalError      => "An unexpected error occurred",
        }
    }

    /// Generic code for a bare HTTP status, if there is one.
    pub fn from_status(status: StatusCode) -> Option<Self> {
        match status {
            StatusCode::BAD_REQUEST           => Some(ErrorCode::BadRequest),
            StatusCode::UNAUTHORIZED          => Some(ErrorCode::Unauthorized),
            StatusCode::FORBIDDEN             => Some(ErrorCode::Forbidden),
            StatusCode::NOT_FOUND             => Some(ErrorCode::NotFound),
            StatusCode::INTERNAL_SERVER_ERROR => Some(ErrorCode::InternalError),
            _ => None,
        }
    }
}

// ─── ErrorResponse ────────────────────────────────────────────────────────────

/// JSON error body: `{"status": 404, "code": "VENUE_NOT_FOUND", "message": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status:  u16,
    pub code:    String,
    pub message: String,
}

impl ErrorResponse {
    pub fn of(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Body for a status that no handler described more precisely.
    pub fn for_status(status: StatusCode) -> Self {
        match ErrorCode::from_status(status) {
            Some(code) => Self::from(code),
            None => {
                let reason = status.canonical_reason().unwrap_or("Error");
                Self::of(
                    status.as_u16(),
                    reason.to_uppercase().replace([' ', '-'], "_"),
                    reason,
                )
            }
        }
    }
}

impl From<ErrorCode> for ErrorResponse {
    fn from(code: ErrorCode) -> Self {
        Self::of(code.status().as_u16(), code.name(), code.message())
    }
}

// ─── AppError ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AppError {
    /// A failure that already carries its machine-readable code.
    #[error("{}", .0.message())]
    Api(ErrorCode),

    /// The caller is known but may not perform this action.
    #[error("{0}")]
    AccessDenied(String),

    /// The caller has not presented any credentials.
    #[error("{0}")]
    Unauthenticated(String),

    /// The request payload is malformed or fails validation.
    #[error("{0}")]
    BadRequest(String),

    /// Catch-all for unexpected failures.
    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn kind(&self) -> FailureKind {
        match self {
            AppError::Api(code)          => FailureKind::Typed(*code),
            AppError::AccessDenied(_)    => FailureKind::AccessDenied,
            AppError::Unauthenticated(_) => FailureKind::Unauthenticated,
            AppError::BadRequest(_)      => FailureKind::MalformedInput,
            AppError::Internal(_)        => FailureKind::Other,
        }
    }
}

impl From<&AppError> for Failure {
    fn from(err: &AppError) -> Self {
        let frames = match err {
            AppError::Internal(inner) => inner.chain().map(ToString::to_string).collect(),
            _ => Vec::new(),
        };
        Failure {
            kind: err.kind(),
            message: Some(err.to_string()),
            frames,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let failure = Failure::from(&self);
        let status = failure.kind.status();

        // Fallback shape only; the dispatch middleware normally replaces it.
        let body = match &self {
            AppError::Api(code)      => ErrorResponse::from(*code),
            AppError::BadRequest(msg) => ErrorResponse::of(
                status.as_u16(),
                ErrorCode::BadRequest.name(),
                msg.clone(),
            ),
            AppError::AccessDenied(_)    => ErrorResponse::from(ErrorCode::Forbidden),
            AppError::Unauthenticated(_) => ErrorResponse::from(ErrorCode::Unauthorized),
            AppError::Internal(_)        => ErrorResponse::from(ErrorCode::InternalError),
        };

        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(failure);
        response
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_error_code_status_and_name() {
        assert_eq!(ErrorCode::VenueNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::VenueNotFound.name(), "VENUE_NOT_FOUND");
        assert_eq!(ErrorCode::InternalError.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_code_serializes_like_name() {
        let json = serde_json::to_string(&ErrorCode::VenueStyleNotFound).unwrap();
        assert_eq!(json, format!("\"{}\"", ErrorCode::VenueStyleNotFound.name()));
    }

    #[test]
    fn test_error_response_for_known_status() {
        let body = ErrorResponse::for_status(StatusCode::NOT_FOUND);
        assert_eq!(body, ErrorResponse::from(ErrorCode::NotFound));
    }

    #[test]
    fn test_error_response_for_unmapped_status() {
        let body = ErrorResponse::for_status(StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body.status, 405);
        assert_eq!(body.code, "METHOD_NOT_ALLOWED");
        assert_eq!(body.message, "Method Not Allowed");
    }

    #[test]
    fn test_failure_from_bad_request_keeps_message() {
        let failure = Failure::from(&AppError::BadRequest("capacity must be positive".into()));
        assert_eq!(failure.kind, FailureKind::MalformedInput);
        assert_eq!(failure.message.as_deref(), Some("capacity must be positive"));
        assert!(failure.frames.is_empty());
    }

    #[test]
    fn test_failure_from_internal_collects_chain() {
        let err: anyhow::Result<()> = Err(anyhow::anyhow!("disk full"))
            .context("write venue")
            .context("create venue");
        let failure = Failure::from(&AppError::from(err.unwrap_err()));
        assert_eq!(failure.kind, FailureKind::Other);
        assert_eq!(failure.message.as_deref(), Some("create venue"));
        assert_eq!(failure.frames, vec!["create venue", "write venue", "disk full"]);
    }

    #[test]
    fn test_into_response_attaches_failure() {
        let response = AppError::Api(ErrorCode::UserNotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let failure = response.extensions().get::<Failure>().unwrap();
        assert_eq!(failure.kind, FailureKind::Typed(ErrorCode::UserNotFound));
    }
}
