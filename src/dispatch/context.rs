//! # dispatch::context
//!
//! [`ErrorContext`] — everything the classifier may look at for one failed
//! request. Built fresh per failure and dropped once a response exists.

use axum::{
    extract::Request,
    http::{header, HeaderMap, StatusCode},
};
use axum_extra::extract::cookie::CookieJar;

use crate::error::ErrorCode;

/// Cookie that marks a logged-in admin panel session.
pub const ADMIN_COOKIE: &str = "ACCESS_TOKEN";

// ─── Failure ──────────────────────────────────────────────────────────────────

/// The finite set of failure kinds the responder knows how to answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Application error with an explicit code (and therefore status).
    Typed(ErrorCode),
    AccessDenied,
    Unauthenticated,
    MalformedInput,
    /// Anything unclassified.
    Other,
}

impl FailureKind {
    pub fn status(self) -> StatusCode {
        match self {
            FailureKind::Typed(code)     => code.status(),
            FailureKind::AccessDenied    => StatusCode::FORBIDDEN,
            FailureKind::Unauthenticated => StatusCode::UNAUTHORIZED,
            FailureKind::MalformedInput  => StatusCode::BAD_REQUEST,
            FailureKind::Other           => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FailureKind::Typed(code)     => code.name(),
            FailureKind::AccessDenied    => "ACCESS_DENIED",
            FailureKind::Unauthenticated => "UNAUTHENTICATED",
            FailureKind::MalformedInput  => "MALFORMED_INPUT",
            FailureKind::Other           => "OTHER",
        }
    }
}

/// The underlying error of a failed request, detached from its concrete type
/// so it can travel in response extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind:    FailureKind,
    pub message: Option<String>,
    /// Diagnostic frames, innermost first. Only shown in development mode.
    pub frames:  Vec<String>,
}

impl Failure {
    pub fn other(message: impl Into<String>) -> Self {
        Self {
            kind:    FailureKind::Other,
            message: Some(message.into()),
            frames:  Vec::new(),
        }
    }

    pub fn with_frames(mut self, frames: Vec<String>) -> Self {
        self.frames = frames;
        self
    }
}

/// A failure that escaped the handlers entirely (a panic) and is forwarded to
/// the status-code route with the failure attached.
#[derive(Debug, Clone)]
pub struct ForwardedFailure(pub Failure);

// ─── ErrorContext ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Path of the original request (no query string).
    pub request_uri:      String,
    /// `None` when no status was recorded at all.
    pub http_status:      Option<u16>,
    pub accept:           Option<String>,
    pub content_type:     Option<String>,
    pub referer:          Option<String>,
    /// `ACCESS_TOKEN` cookie present with a non-empty value.
    pub has_admin_cookie: bool,
    pub failure:          Option<Failure>,
}

impl ErrorContext {
    pub fn new(request_uri: impl Into<String>) -> Self {
        Self {
            request_uri: request_uri.into(),
            ..Self::default()
        }
    }

    /// Snapshot the metadata of an inbound request before it is consumed.
    pub fn capture(request: &Request) -> Self {
        Self::from_parts(request.uri().path(), request.headers())
    }

    pub fn from_parts(path: &str, headers: &HeaderMap) -> Self {
        let jar = CookieJar::from_headers(headers);
        let has_admin_cookie = jar
            .get(ADMIN_COOKIE)
            .map(|c| !c.value().is_empty())
            .unwrap_or(false);

        Self {
            request_uri:  path.to_string(),
            http_status:  None,
            accept:       header_str(headers, header::ACCEPT),
            content_type: header_str(headers, header::CONTENT_TYPE),
            referer:      header_str(headers, header::REFERER),
            has_admin_cookie,
            failure:      None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    pub fn with_failure(mut self, failure: Failure) -> Self {
        self.failure = Some(failure);
        self
    }
}

fn header_str(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
