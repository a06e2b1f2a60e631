//! # dispatch::classify
//!
//! Two independent questions about a failed request:
//! - [`is_admin_request`] — did it come from (or belong to) the admin panel?
//! - [`is_api_request`]   — does the caller expect JSON?
//!
//! Both look only at request metadata, never at the failure itself.

use super::context::ErrorContext;

const ADMIN_PREFIX: &str = "/admin";
const API_PREFIX: &str = "/api/";
const JSON_MEDIA_TYPE: &str = "application/json";

/// First match wins:
/// 1. path starts with `/admin`
/// 2. referer contains `/admin`
/// 3. `ACCESS_TOKEN` cookie set and the path is `/admin…` or `/`
pub fn is_admin_request(ctx: &ErrorContext) -> bool {
    if ctx.request_uri.starts_with(ADMIN_PREFIX) {
        return true;
    }

    if ctx
        .referer
        .as_deref()
        .is_some_and(|r| r.contains(ADMIN_PREFIX))
    {
        return true;
    }

    ctx.has_admin_cookie && ctx.request_uri == "/"
}

/// First match wins:
/// 1. path starts with `/api/`
/// 2. `Accept` mentions `application/json`
/// 3. `Content-Type` mentions `application/json`
pub fn is_api_request(ctx: &ErrorContext) -> bool {
    ctx.request_uri.starts_with(API_PREFIX)
        || mentions_json(ctx.accept.as_deref())
        || mentions_json(ctx.content_type.as_deref())
}

fn mentions_json(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.contains(JSON_MEDIA_TYPE))
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::context::Failure;

    fn make_ctx(uri: &str) -> ErrorContext {
        ErrorContext::new(uri)
    }

    #[test]
    fn test_admin_prefix_wins_over_everything() {
        for uri in ["/admin", "/admin/venues", "/administrator", "/admin/error/x"] {
            let mut ctx = make_ctx(uri);
            ctx.accept = Some("application/json".into());
            ctx.referer = Some("http://example.com/shop".into());
            assert!(is_admin_request(&ctx), "{uri}");
        }
    }

    #[test]
    fn test_admin_referer() {
        let mut ctx = make_ctx("/shop/items");
        ctx.referer = Some("http://localhost:8080/admin/venues?page=2".into());
        assert!(is_admin_request(&ctx));
    }

    #[test]
    fn test_admin_cookie_only_counts_on_root() {
        let mut ctx = make_ctx("/");
        ctx.has_admin_cookie = true;
        assert!(is_admin_request(&ctx));

        ctx.has_admin_cookie = false;
        assert!(!is_admin_request(&ctx));

        let mut elsewhere = make_ctx("/shop");
        elsewhere.has_admin_cookie = true;
        assert!(!is_admin_request(&elsewhere));
    }

    #[test]
    fn test_admin_ignores_failure_content() {
        let ctx = make_ctx("/shop").with_failure(Failure::other("/admin exploded"));
        assert!(!is_admin_request(&ctx));
    }

    #[test]
    fn test_api_prefix_wins_over_headers() {
        let mut ctx = make_ctx("/api/venues");
        ctx.accept = Some("text/html".into());
        ctx.content_type = Some("application/x-www-form-urlencoded".into());
        assert!(is_api_request(&ctx));
    }

    #[test]
    fn test_api_by_accept_or_content_type() {
        let mut by_accept = make_ctx("/admin/venues");
        by_accept.accept = Some("application/json, text/plain".into());
        assert!(is_api_request(&by_accept));

        let mut by_body = make_ctx("/admin/venues");
        by_body.content_type = Some("application/json; charset=utf-8".into());
        assert!(is_api_request(&by_body));
    }

    #[test]
    fn test_web_request() {
        let mut ctx = make_ctx("/apiary");
        ctx.accept = Some("text/html".into());
        assert!(!is_api_request(&ctx));
    }
}
