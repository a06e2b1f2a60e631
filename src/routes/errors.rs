//! # routes::errors
//!
//! The explicit `/error` route and the router fallback.
//!
//! Most failures never hit `/error` directly: the dispatch middleware answers
//! them in place. The route exists for callers (and upstream proxies) that
//! forward to it with `?status=<code>`; without a status it renders the
//! generic page.
//!
//! The forwarder names the failing request with `?uri=<path>` or an
//! `X-Original-URI` header (query wins). Classification runs against that
//! path, never against `/error` itself; without one, `requestUri` is left off
//! the page.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, HeaderName, StatusCode},
    response::Response,
};
use serde::Deserialize;

use crate::{dispatch::ErrorContext, render::render_dispatch, state::SharedState};

pub const ORIGINAL_URI_HEADER: HeaderName = HeaderName::from_static("x-original-uri");

#[derive(Debug, Deserialize)]
pub struct ErrorQuery {
    pub status: Option<u16>,
    /// Path of the request that actually failed.
    pub uri:    Option<String>,
}

/// GET /error
pub async fn error_page(
    State(state): State<SharedState>,
    Query(query): Query<ErrorQuery>,
    headers: HeaderMap,
) -> Response {
    let original_uri = query
        .uri
        .or_else(|| {
            headers
                .get(ORIGINAL_URI_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        })
        .map(|uri| strip_query(&uri).to_string())
        .unwrap_or_default();

    let mut ctx = ErrorContext::from_parts(&original_uri, &headers);
    let status = query
        .status
        .and_then(|code| StatusCode::from_u16(code).ok())
        .filter(|s| s.is_client_error() || s.is_server_error());

    if let Some(status) = status {
        ctx = ctx.with_status(status.as_u16());
    }

    render_dispatch(
        state.responder.dispatch_status(&ctx),
        status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
    )
}

/// Unknown route — a bare 404 for the dispatch middleware to dress up.
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

fn strip_query(uri: &str) -> &str {
    uri.split_once('?').map_or(uri, |(path, _)| path)
}
