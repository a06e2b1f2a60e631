//! # routes::admin
//!
//! Admin panel pages. Everything except `/admin/login` sits behind
//! [`crate::auth::require_admin_session`].

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
};
use serde_json::json;
use tracing::info;

use crate::{
    converter::VenueConverter,
    dispatch::Page,
    error::{AppError, ErrorCode},
    models::{VenueFilter, VenueId, VenueView},
    state::SharedState,
};

/// GET / — landing page
pub async fn home(State(state): State<SharedState>) -> Page {
    let venues = state.store.venues(&VenueFilter { verified: Some(true) }).await;
    Page::new("index").with("verifiedVenues", venues.len())
}

/// GET /admin/login
pub async fn login_page() -> Page {
    Page::new("admin/login").with("cookie", crate::dispatch::context::ADMIN_COOKIE)
}

/// GET /admin/venues — venue list, optionally `?verified=false` for the
/// review queue
pub async fn venues_page(
    State(state): State<SharedState>,
    Query(filter): Query<VenueFilter>,
) -> Page {
    let views: Vec<VenueView> = state
        .store
        .venues(&filter)
        .await
        .iter()
        .map(VenueConverter::to_view)
        .collect();

    Page::new("admin/venues/list")
        .with("count", views.len())
        .with("venues", json!(views))
}

/// POST /admin/venues/:id/verify — approve a listing
pub async fn verify_venue(
    State(state): State<SharedState>,
    Path(id): Path<VenueId>,
) -> Result<Redirect, AppError> {
    state
        .store
        .update_venue(id, |venue| venue.verified = true)
        .await
        .ok_or(AppError::Api(ErrorCode::VenueNotFound))?;

    info!(id, "✅ Venue verified");
    Ok(Redirect::to("/admin/venues"))
}
