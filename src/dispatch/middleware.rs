//! # dispatch::middleware — error dispatch for every route
//!
//! Wraps the whole router. The request's metadata is captured before the
//! inner service runs; once the response comes back exactly one entry point
//! is chosen:
//!
//! 1. response carries a [`Failure`] (a handler returned `AppError`)
//!    → [`ErrorResponder::dispatch_failure`]
//! 2. response status is 4xx/5xx (no route, wrong method, extractor
//!    rejection, panic) → [`ErrorResponder::dispatch_status`]
//! 3. anything else passes through untouched.
//!
//! Responses that were already dispatched (e.g. the explicit `/error` route)
//! carry a [`Dispatched`] marker and are left alone.
//!
//! Panics are caught by `CatchPanicLayer` and forwarded with the frames the
//! panic hook recorded on the panicking thread (see [`capture_panic_frames`]).

use std::{any::Any, backtrace::Backtrace, cell::RefCell, panic, sync::Once};

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use super::context::{ErrorContext, Failure, ForwardedFailure};
use crate::{
    render::{render_dispatch, render_descriptor, Dispatched},
    state::SharedState,
};

pub async fn dispatch_errors(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    let ctx = ErrorContext::capture(&request);
    let response = next.run(request).await;

    if response.extensions().get::<Dispatched>().is_some() {
        return response;
    }

    // ── 1. Handler returned an AppError ───────────────────────────────────────
    if let Some(failure) = response.extensions().get::<Failure>().cloned() {
        let status = failure.kind.status();
        log_failure(&ctx.request_uri, status, failure.kind.label(), failure.message.as_deref());

        let descriptor = state.responder.dispatch_failure(&ctx, &failure);
        return render_descriptor(descriptor, status);
    }

    // ── 2. Bare error status ──────────────────────────────────────────────────
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let mut ctx = ctx.with_status(status.as_u16());
    if let Some(ForwardedFailure(failure)) = response.extensions().get::<ForwardedFailure>() {
        ctx = ctx.with_failure(failure.clone());
    }
    log_failure(
        &ctx.request_uri,
        status,
        "STATUS",
        ctx.failure.as_ref().and_then(|f| f.message.as_deref()),
    );

    render_dispatch(state.responder.dispatch_status(&ctx), status)
}

fn log_failure(uri: &str, status: StatusCode, kind: &str, message: Option<&str>) {
    let message = message.unwrap_or("");
    if status.is_server_error() {
        error!(uri, status = status.as_u16(), kind, message, "request failed");
    } else {
        warn!(uri, status = status.as_u16(), kind, message, "request rejected");
    }
}

// ─── Panics ───────────────────────────────────────────────────────────────────

thread_local! {
    static PANIC_FRAMES: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// Installs, once per process, a panic hook that records the panicking
/// thread's frames for [`forward_panic`]. The previous hook still runs.
pub fn capture_panic_frames() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let frames = backtrace_frames(&Backtrace::force_capture().to_string());
            PANIC_FRAMES.with(|slot| *slot.borrow_mut() = frames);
            previous(info);
        }));
    });
}

/// Symbol names from a rendered backtrace, innermost first, starting at the
/// frame that panicked (capture and unwinding machinery dropped).
fn backtrace_frames(rendered: &str) -> Vec<String> {
    rendered
        .lines()
        .filter_map(|line| {
            let (index, symbol) = line.trim_start().split_once(": ")?;
            index.parse::<usize>().ok()?;
            Some(symbol.trim().to_string())
        })
        .skip_while(|symbol| is_panic_machinery(symbol))
        .collect()
}

fn is_panic_machinery(symbol: &str) -> bool {
    const PREFIXES: [&str; 8] = [
        "std::", "core::", "alloc::", "<std::", "<core::", "<alloc::", "__rust", "rust_",
    ];
    PREFIXES.iter().any(|p| symbol.starts_with(p)) || symbol.contains("capture_panic_frames")
}

/// `CatchPanicLayer` callback: a 500 with the panic message (and any frames
/// recorded by the hook) forwarded to the status-code route.
pub fn forward_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    };

    let frames = PANIC_FRAMES.with(RefCell::take);

    let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
    response
        .extensions_mut()
        .insert(ForwardedFailure(Failure::other(message).with_frames(frames)));
    response
}

// ─── Tests ────────────────────────────────────────────────────────────────────
