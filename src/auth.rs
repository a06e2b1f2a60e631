//! # auth — access guards
//!
//! Two thin guards in front of the routes; neither issues sessions or keys.
//!
//! ## API writes (`require_api_key`)
//! - `API_KEY` unset → **Allow All** (dev mode)
//! - `API_KEY` set   → `POST`/`PUT`/`DELETE` must send `X-API-Key: <key>`
//!
//! ## Admin panel (`require_admin_session`)
//! - `ADMIN_TOKEN` unset → **Allow All** (dev mode)
//! - no `ACCESS_TOKEN` cookie → not authenticated (login redirect)
//! - cookie with the wrong value → access denied (403 page)
//!
//! Guards answer with [`AppError`]; the error-dispatch middleware decides
//! what the caller actually sees.
//!
//! ```bash
//! curl -H "X-API-Key: super-secret-key-here" -X DELETE http://localhost:8080/api/venues/3
//! ```

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;

use crate::{dispatch::context::ADMIN_COOKIE, error::AppError, state::SharedState};

pub const API_KEY_HEADER: &str = "X-API-Key";

/// Axum middleware — checks `X-API-Key` on mutating API calls.
pub async fn require_api_key(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = state.config.api_key.as_deref() else {
        return next.run(request).await;
    };

    if matches!(*request.method(), Method::GET | Method::HEAD | Method::OPTIONS) {
        return next.run(request).await;
    }

    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if provided == expected {
        next.run(request).await
    } else {
        let path = request.uri().path();
        warn!(path, "❌ Unauthorized API write — invalid or missing X-API-Key");
        AppError::Unauthenticated("invalid or missing X-API-Key header".into()).into_response()
    }
}

/// Axum middleware — checks the admin panel's `ACCESS_TOKEN` cookie.
pub async fn require_admin_session(
    State(state): State<SharedState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = state.config.admin_token.as_deref() else {
        return next.run(request).await;
    };

    match jar.get(ADMIN_COOKIE).map(|c| c.value()) {
        Some(token) if token == expected => next.run(request).await,
        Some(token) if !token.is_empty() => {
            warn!(path = request.uri().path(), "⛔ Admin cookie rejected");
            AppError::AccessDenied("Access is denied".into()).into_response()
        }
        _ => AppError::Unauthenticated("admin login required".into()).into_response(),
    }
}
