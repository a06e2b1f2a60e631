//! # dispatch::responder
//!
//! **Error Responder** — turns one failed request into one response shape.
//!
//! ```text
//! failed request
//!     │
//!     ├─ handler returned AppError ──▶ dispatch_failure  (API? JSON : page/redirect)
//!     │
//!     └─ bare error status ──────────▶ dispatch_status   (admin? admin page : public page / Deferred)
//! ```
//!
//! The responder is pure apart from reading its clock: no logging, no I/O.
//! Development mode is fixed when it is built.

use chrono::{Local, NaiveDateTime};
use serde_json::json;

use super::{
    classify::{is_admin_request, is_api_request},
    context::{ErrorContext, Failure, FailureKind},
    descriptor::{Dispatch, Page, ResponseDescriptor},
};
use crate::error::{ErrorCode, ErrorResponse};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// How many diagnostic frames an admin error page may show.
const MAX_STACK_FRAMES: usize = 5;

pub const LOGIN_PATH: &str = "/admin/login";

// ─── Templates ────────────────────────────────────────────────────────────────

pub mod templates {
    pub const ADMIN_400:     &str = "admin/error/400";
    pub const ADMIN_401:     &str = "admin/error/401";
    pub const ADMIN_403:     &str = "admin/error/403";
    pub const ADMIN_404:     &str = "admin/error/404";
    pub const ADMIN_500:     &str = "admin/error/500";
    pub const ADMIN_DEFAULT: &str = "admin/error/default";
    pub const PUBLIC_404:    &str = "error/404";
    pub const PUBLIC_ERROR:  &str = "error/general";
    pub const GENERIC:       &str = "error";
}

// ─── Responder ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ErrorResponder {
    development_mode: bool,
    clock: fn() -> NaiveDateTime,
}

impl ErrorResponder {
    pub fn new(development_mode: bool) -> Self {
        Self {
            development_mode,
            clock: local_now,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    // ─── Status-code route ────────────────────────────────────────────────────

    /// Catch-all route for requests that ended in an error status.
    pub fn dispatch_status(&self, ctx: &ErrorContext) -> Dispatch {
        let admin = is_admin_request(ctx);

        let Some(status) = ctx.http_status else {
            let template = if admin { templates::ADMIN_500 } else { templates::GENERIC };
            return Dispatch::Handled(self.base_page(template, ctx).into());
        };

        if admin {
            return Dispatch::Handled(self.admin_status_page(status, ctx).into());
        }

        if ctx.request_uri.starts_with("/api/") {
            return Dispatch::Deferred;
        }

        let template = match status {
            404 => templates::PUBLIC_404,
            _   => templates::PUBLIC_ERROR,
        };
        Dispatch::Handled(self.base_page(template, ctx).into())
    }

    fn admin_status_page(&self, status: u16, ctx: &ErrorContext) -> Page {
        let mut page = self.base_page(templates::ADMIN_500, ctx);
        let message = ctx.failure.as_ref().and_then(|f| f.message.clone());

        if self.development_mode {
            if let Some(failure) = &ctx.failure {
                page = page
                    .with_opt("error", failure.message.clone())
                    .with_opt("stackTrace", stack_trace(&failure.frames));
            }
        }

        let template = match status {
            400 => templates::ADMIN_400,
            401 => templates::ADMIN_401,
            403 => templates::ADMIN_403,
            404 => templates::ADMIN_404,
            500 => {
                page = page.with_opt("error", message);
                templates::ADMIN_500
            }
            _ => {
                page = page.with("status", status).with_opt("error", message);
                templates::ADMIN_DEFAULT
            }
        };
        page.template = template;
        page
    }

    // ─── Exception route ──────────────────────────────────────────────────────

    /// Generic handler for failures a request handler returned.
    pub fn dispatch_failure(&self, ctx: &ErrorContext, failure: &Failure) -> ResponseDescriptor {
        let api = is_api_request(ctx);
        let message = failure.message.clone();

        match failure.kind {
            FailureKind::Typed(code) => json_error(code),

            FailureKind::AccessDenied if api => json_error(ErrorCode::Forbidden),
            FailureKind::AccessDenied => Page::new(templates::ADMIN_403)
                .with_opt("error", message)
                .into(),

            FailureKind::Unauthenticated if api => json_error(ErrorCode::Unauthorized),
            FailureKind::Unauthenticated => ResponseDescriptor::redirect(LOGIN_PATH),

            FailureKind::MalformedInput if api => {
                let code = ErrorCode::BadRequest;
                ResponseDescriptor::JsonError(ErrorResponse::of(
                    code.status().as_u16(),
                    code.name(),
                    message.unwrap_or_else(|| code.message().to_string()),
                ))
            }
            FailureKind::MalformedInput => Page::new(templates::ADMIN_400)
                .with_opt("error", message)
                .into(),

            FailureKind::Other if api => json_error(ErrorCode::InternalError),
            FailureKind::Other => Page::new(templates::ADMIN_500)
                .with_opt("error", message)
                .with("timestamp", self.timestamp())
                .with_opt("stackTrace", self.diagnostics(&failure.frames))
                .into(),
        }
    }

    // ─── Helpers ──────────────────────────────────────────────────────────────

    fn base_page(&self, template: &'static str, ctx: &ErrorContext) -> Page {
        let uri = Some(ctx.request_uri.as_str()).filter(|u| !u.is_empty());
        Page::new(template)
            .with("timestamp", self.timestamp())
            .with_opt("requestUri", uri)
    }

    fn diagnostics(&self, frames: &[String]) -> Option<serde_json::Value> {
        self.development_mode.then(|| stack_trace(frames)).flatten()
    }

    fn timestamp(&self) -> String {
        (self.clock)().format(TIMESTAMP_FORMAT).to_string()
    }
}

fn json_error(code: ErrorCode) -> ResponseDescriptor {
    ResponseDescriptor::JsonError(ErrorResponse::from(code))
}

/// First frames, one per line; `None` when there is nothing to show.
fn stack_trace(frames: &[String]) -> Option<serde_json::Value> {
    if frames.is_empty() {
        return None;
    }
    let trace: String = frames
        .iter()
        .take(MAX_STACK_FRAMES)
        .map(|frame| format!("{frame}\n"))
        .collect();
    Some(json!(trace))
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(9, 30, 5))
            .unwrap()
    }

    fn make_responder(dev: bool) -> ErrorResponder {
        ErrorResponder::new(dev).with_clock(fixed_now)
    }

    fn make_frames(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("frame {i}")).collect()
    }

    fn page_of(dispatch: &Dispatch) -> &Page {
        dispatch.descriptor().and_then(|d| d.page()).expect("expected a page")
    }

    // ── status route ──────────────────────────────────────────────────────────

    #[test]
    fn test_admin_404_page() {
        let ctx = ErrorContext::new("/admin/venues/42").with_status(404);
        let dispatch = make_responder(false).dispatch_status(&ctx);
        let page = page_of(&dispatch);

        assert_eq!(page.template, "admin/error/404");
        assert_eq!(page.attr("timestamp"), Some(&json!("2024-05-01 09:30:05")));
        assert_eq!(page.attr("requestUri"), Some(&json!("/admin/venues/42")));
        assert_eq!(page.attr("error"), None);
    }

    #[test]
    fn test_admin_status_table() {
        let responder = make_responder(false);
        for (status, template) in [
            (400, "admin/error/400"),
            (401, "admin/error/401"),
            (403, "admin/error/403"),
            (500, "admin/error/500"),
            (418, "admin/error/default"),
        ] {
            let ctx = ErrorContext::new("/admin").with_status(status);
            let dispatch = responder.dispatch_status(&ctx);
            assert_eq!(page_of(&dispatch).template, template, "{status}");
        }
    }

    #[test]
    fn test_admin_500_attaches_message() {
        let ctx = ErrorContext::new("/admin/venues")
            .with_status(500)
            .with_failure(Failure::other("pool exhausted"));
        let dispatch = make_responder(false).dispatch_status(&ctx);
        let page = page_of(&dispatch);

        assert_eq!(page.attr("error"), Some(&json!("pool exhausted")));
        assert_eq!(page.attr("stackTrace"), None);
    }

    #[test]
    fn test_admin_default_attaches_status() {
        let ctx = ErrorContext::new("/admin/venues").with_status(405);
        let dispatch = make_responder(false).dispatch_status(&ctx);
        let page = page_of(&dispatch);

        assert_eq!(page.template, "admin/error/default");
        assert_eq!(page.attr("status"), Some(&json!(405)));
    }

    #[test]
    fn test_dev_mode_stack_trace_is_capped() {
        let failure = Failure::other("boom").with_frames(make_frames(7));
        let ctx = ErrorContext::new("/admin/venues")
            .with_status(500)
            .with_failure(failure);
        let dispatch = make_responder(true).dispatch_status(&ctx);
        let page = page_of(&dispatch);

        let trace = page.attr("stackTrace").and_then(|v| v.as_str()).unwrap();
        assert_eq!(trace.lines().count(), 5);
        assert!(trace.starts_with("frame 0\n"));
        assert_eq!(page.attr("error"), Some(&json!("boom")));
    }

    #[test]
    fn test_dev_mode_failure_without_frames_has_no_trace() {
        let ctx = ErrorContext::new("/admin/venues")
            .with_status(500)
            .with_failure(Failure::other("boom"));
        let dispatch = make_responder(true).dispatch_status(&ctx);
        let page = page_of(&dispatch);

        assert_eq!(page.attr("error"), Some(&json!("boom")));
        assert_eq!(page.attr("stackTrace"), None);
    }

    #[test]
    fn test_dev_mode_without_failure_has_no_trace() {
        let ctx = ErrorContext::new("/admin/venues").with_status(404);
        let dispatch = make_responder(true).dispatch_status(&ctx);
        assert_eq!(page_of(&dispatch).attr("stackTrace"), None);
    }

    #[test]
    fn test_api_status_is_deferred() {
        let ctx = ErrorContext::new("/api/widgets").with_status(404);
        assert_eq!(make_responder(false).dispatch_status(&ctx), Dispatch::Deferred);
    }

    #[test]
    fn test_public_pages() {
        let responder = make_responder(false);

        let not_found = ErrorContext::new("/shop/items").with_status(404);
        let dispatch = responder.dispatch_status(&not_found);
        assert_eq!(page_of(&dispatch).template, "error/404");

        let other = ErrorContext::new("/shop/items").with_status(503);
        let dispatch = responder.dispatch_status(&other);
        assert_eq!(page_of(&dispatch).template, "error/general");
    }

    #[test]
    fn test_missing_status() {
        let responder = make_responder(false);

        let admin = ErrorContext::new("/admin/venues");
        assert_eq!(page_of(&responder.dispatch_status(&admin)).template, "admin/error/500");

        let public = ErrorContext::new("/shop");
        assert_eq!(page_of(&responder.dispatch_status(&public)).template, "error");
    }

    // ── exception route ───────────────────────────────────────────────────────

    fn failure(kind: FailureKind, message: &str) -> Failure {
        Failure {
            kind,
            message: Some(message.to_string()),
            frames: Vec::new(),
        }
    }

    fn json_ctx(uri: &str) -> ErrorContext {
        let mut ctx = ErrorContext::new(uri);
        ctx.accept = Some("application/json".into());
        ctx
    }

    #[test]
    fn test_malformed_input_api_keeps_message() {
        let descriptor = make_responder(false).dispatch_failure(
            &json_ctx("/bookings"),
            &failure(FailureKind::MalformedInput, "capacity must be positive"),
        );
        assert_eq!(
            descriptor,
            ResponseDescriptor::JsonError(ErrorResponse::of(400, "BAD_REQUEST", "capacity must be positive"))
        );
    }

    #[test]
    fn test_malformed_input_web_page() {
        let descriptor = make_responder(false).dispatch_failure(
            &ErrorContext::new("/admin/venues"),
            &failure(FailureKind::MalformedInput, "bad id"),
        );
        let page = descriptor.page().unwrap();
        assert_eq!(page.template, "admin/error/400");
        assert_eq!(page.attr("error"), Some(&json!("bad id")));
    }

    #[test]
    fn test_access_denied() {
        let responder = make_responder(false);
        let denied = failure(FailureKind::AccessDenied, "Access is denied");

        assert_eq!(
            responder.dispatch_failure(&json_ctx("/x"), &denied),
            ResponseDescriptor::JsonError(ErrorResponse::from(ErrorCode::Forbidden))
        );
        let web = responder.dispatch_failure(&ErrorContext::new("/admin/venues"), &denied);
        assert_eq!(web.page().unwrap().template, "admin/error/403");
    }

    #[test]
    fn test_unauthenticated() {
        let responder = make_responder(false);
        let anon = failure(FailureKind::Unauthenticated, "no session");

        assert_eq!(
            responder.dispatch_failure(&ErrorContext::new("/api/venues"), &anon),
            ResponseDescriptor::JsonError(ErrorResponse::from(ErrorCode::Unauthorized))
        );
        assert_eq!(
            responder.dispatch_failure(&ErrorContext::new("/admin/venues"), &anon),
            ResponseDescriptor::redirect("/admin/login")
        );
    }

    #[test]
    fn test_other_never_leaks_to_api() {
        let descriptor = make_responder(true).dispatch_failure(
            &ErrorContext::new("/api/venues"),
            &failure(FailureKind::Other, "connection refused: 10.0.0.3:5432"),
        );
        let ResponseDescriptor::JsonError(body) = descriptor else {
            panic!("expected JSON");
        };
        assert_eq!(body.status, 500);
        assert_eq!(body.code, "INTERNAL_ERROR");
        assert!(!body.message.contains("10.0.0.3"));
    }

    #[test]
    fn test_other_web_page_has_message_and_timestamp() {
        let descriptor = make_responder(false).dispatch_failure(
            &ErrorContext::new("/admin/venues"),
            &failure(FailureKind::Other, "store poisoned"),
        );
        let page = descriptor.page().unwrap();
        assert_eq!(page.template, "admin/error/500");
        assert_eq!(page.attr("error"), Some(&json!("store poisoned")));
        assert_eq!(page.attr("timestamp"), Some(&json!("2024-05-01 09:30:05")));
    }

    #[test]
    fn test_other_web_page_trace_only_in_dev_mode() {
        let internal = failure(FailureKind::Other, "create venue").with_frames(make_frames(3));
        let ctx = ErrorContext::new("/admin/venues");

        let dev = make_responder(true).dispatch_failure(&ctx, &internal);
        let trace = dev.page().and_then(|p| p.attr("stackTrace")).and_then(|v| v.as_str());
        assert_eq!(trace, Some("frame 0\nframe 1\nframe 2\n"));

        let prod = make_responder(false).dispatch_failure(&ctx, &internal);
        assert_eq!(prod.page().unwrap().attr("stackTrace"), None);
    }

    #[test]
    fn test_typed_error_is_always_json() {
        let descriptor = make_responder(false).dispatch_failure(
            &ErrorContext::new("/admin/venues/9/verify"),
            &failure(FailureKind::Typed(ErrorCode::VenueNotFound), "Venue not found"),
        );
        assert_eq!(
            descriptor,
            ResponseDescriptor::JsonError(ErrorResponse::from(ErrorCode::VenueNotFound))
        );
    }
}
