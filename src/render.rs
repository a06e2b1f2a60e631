//! # render
//!
//! Turns [`ResponseDescriptor`]s into Axum responses.
//!
//! Pages are rendered as a minimal HTML document naming the template and
//! listing its attributes; the template id is also exposed in the
//! `X-Template` header so clients and tests can tell pages apart without
//! parsing HTML.

use axum::{
    http::{HeaderName, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde_json::Value;

use crate::{
    dispatch::{Dispatch, Page, ResponseDescriptor},
    error::ErrorResponse,
};

pub const TEMPLATE_HEADER: HeaderName = HeaderName::from_static("x-template");

/// Marker extension: this response is final, do not dispatch it again.
#[derive(Debug, Clone, Copy)]
pub struct Dispatched;

// ─── Entry points ─────────────────────────────────────────────────────────────

/// `status` is used for pages; JSON bodies carry their own status.
pub fn render_descriptor(descriptor: ResponseDescriptor, status: StatusCode) -> Response {
    let mut response = match descriptor {
        ResponseDescriptor::RenderPage(page) => (status, page).into_response(),
        ResponseDescriptor::JsonError(body) => json_error(body),
        ResponseDescriptor::Redirect { location } => Redirect::to(&location).into_response(),
    };
    response.extensions_mut().insert(Dispatched);
    response
}

/// A deferred failure falls through to the generic JSON handler.
pub fn render_dispatch(dispatch: Dispatch, status: StatusCode) -> Response {
    match dispatch {
        Dispatch::Handled(descriptor) => render_descriptor(descriptor, status),
        Dispatch::Deferred => {
            let mut response = json_error(ErrorResponse::for_status(status));
            response.extensions_mut().insert(Dispatched);
            response
        }
    }
}

fn json_error(body: ErrorResponse) -> Response {
    let status = StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(body)).into_response()
}

// ─── Page → HTML ──────────────────────────────────────────────────────────────

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        let mut html = String::with_capacity(256);
        html.push_str("<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>");
        html.push_str(&escape_html(self.template));
        html.push_str("</title></head>\n<body>\n<main data-template=\"");
        html.push_str(&escape_html(self.template));
        html.push_str("\">\n<dl>\n");
        for (name, value) in &self.attributes {
            html.push_str("<dt>");
            html.push_str(&escape_html(name));
            html.push_str("</dt><dd>");
            html.push_str(&escape_html(&display_value(value)));
            html.push_str("</dd>\n");
        }
        html.push_str("</dl>\n</main>\n</body>\n</html>\n");

        let mut response = Html(html).into_response();
        response
            .headers_mut()
            .insert(TEMPLATE_HEADER, HeaderValue::from_static(self.template));
        response
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&'  => out.push_str("&amp;"),
            '<'  => out.push_str("&lt;"),
            '>'  => out.push_str("&gt;"),
            '"'  => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c    => out.push(c),
        }
    }
    out
}

// ─── Tests ────────────────────────────────────────────────────────────────────
