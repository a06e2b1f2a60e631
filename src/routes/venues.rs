//! # routes::venues
//!
//! Venue catalogue JSON API.
//!
//! | Method | Path                 | Description                     |
//! |--------|----------------------|---------------------------------|
//! | GET    | `/api/venues`        | List venues (`?verified=bool`)  |
//! | POST   | `/api/venues`        | Create an (unverified) venue    |
//! | GET    | `/api/venues/:id`    | One venue                       |
//! | PUT    | `/api/venues/:id`    | Overwrite the mutable fields    |
//! | DELETE | `/api/venues/:id`    | Remove a venue                  |
//! | GET    | `/api/venue-styles`  | List venue styles               |
//! | GET    | `/api/health`        | Liveness                        |

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tracing::info;

use crate::{
    converter::VenueConverter,
    error::{AppError, ErrorCode},
    models::{
        CreateVenuePayload, UpdateVenuePayload, VenueFilter, VenueId, VenueStyle, VenueStyleId,
        VenueView,
    },
    state::SharedState,
};

/// Unwraps a JSON body, turning extractor rejections into malformed-input
/// errors so the client sees the reason.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

async fn resolve_style(
    state: &SharedState,
    id: Option<VenueStyleId>,
) -> Result<Option<VenueStyle>, AppError> {
    match id {
        Some(id) => state
            .store
            .style(id)
            .await
            .map(Some)
            .ok_or(AppError::Api(ErrorCode::VenueStyleNotFound)),
        None => Ok(None),
    }
}

// ─── GET /api/venues ──────────────────────────────────────────────────────────

pub async fn list_venues(
    State(state): State<SharedState>,
    Query(filter): Query<VenueFilter>,
) -> Json<Vec<VenueView>> {
    let venues = state.store.venues(&filter).await;
    Json(venues.iter().map(VenueConverter::to_view).collect())
}

// ─── GET /api/venues/:id ──────────────────────────────────────────────────────

pub async fn get_venue(
    State(state): State<SharedState>,
    Path(id): Path<VenueId>,
) -> Result<Json<VenueView>, AppError> {
    let venue = state
        .store
        .venue(id)
        .await
        .ok_or(AppError::Api(ErrorCode::VenueNotFound))?;

    Ok(Json(VenueConverter::to_view(&venue)))
}

// ─── POST /api/venues ─────────────────────────────────────────────────────────

pub async fn create_venue(
    State(state): State<SharedState>,
    payload: Result<Json<CreateVenuePayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let payload = json_body(payload)?;
    payload.venue.validate()?;

    let owner = state
        .store
        .user(payload.owner_id)
        .await
        .ok_or(AppError::Api(ErrorCode::UserNotFound))?;
    let style = resolve_style(&state, payload.venue_style_id).await?;

    let venue = VenueConverter::to_entity(&payload.venue, Some(&owner), style.as_ref());
    let stored = state.store.insert_venue(venue).await;

    info!(id = ?stored.id, name = %stored.name, owner = owner.id, "🏢 Venue created");
    Ok((StatusCode::CREATED, Json(VenueConverter::to_view(&stored))))
}

// ─── PUT /api/venues/:id ──────────────────────────────────────────────────────

pub async fn update_venue(
    State(state): State<SharedState>,
    Path(id): Path<VenueId>,
    payload: Result<Json<UpdateVenuePayload>, JsonRejection>,
) -> Result<Json<VenueView>, AppError> {
    let payload = json_body(payload)?;
    payload.venue.validate()?;

    let style = resolve_style(&state, payload.venue_style_id).await?;
    let updated = state
        .store
        .update_venue(id, |venue| VenueConverter::apply_update(venue, &payload.venue, style))
        .await
        .ok_or(AppError::Api(ErrorCode::VenueNotFound))?;

    info!(id, "✏️ Venue updated");
    Ok(Json(VenueConverter::to_view(&updated)))
}

// ─── DELETE /api/venues/:id ───────────────────────────────────────────────────

pub async fn delete_venue(
    State(state): State<SharedState>,
    Path(id): Path<VenueId>,
) -> Result<StatusCode, AppError> {
    state
        .store
        .remove_venue(id)
        .await
        .ok_or(AppError::Api(ErrorCode::VenueNotFound))?;

    info!(id, "🗑️ Venue deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ─── GET /api/venue-styles ────────────────────────────────────────────────────

pub async fn list_styles(State(state): State<SharedState>) -> Json<Vec<VenueStyle>> {
    Json(state.store.styles().await)
}

// ─── GET /api/health ──────────────────────────────────────────────────────────

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "ok":      true,
        "service": "venuebook",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
