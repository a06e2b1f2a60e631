//! # models::dto
//!
//! Wire-facing records for the venue endpoints.

use serde::{Deserialize, Serialize};

use super::venue::{UserId, VenueId, VenueStyleId};
use crate::error::AppError;

/// The five mutable fields of a venue, as sent by clients on create and
/// update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueCreateRequest {
    pub name:        String,
    #[serde(default)]
    pub description: Option<String>,
    pub capacity:    u32,
    pub location:    String,
    #[serde(default)]
    pub image:       Option<String>,
}

impl VenueCreateRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest("name must not be blank".into()));
        }
        if self.location.trim().is_empty() {
            return Err(AppError::BadRequest("location must not be blank".into()));
        }
        if self.capacity == 0 {
            return Err(AppError::BadRequest("capacity must be greater than zero".into()));
        }
        Ok(())
    }
}

/// Response-side projection of a venue and its relations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueView {
    pub id:               Option<VenueId>,
    pub name:             String,
    pub description:      Option<String>,
    pub capacity:         u32,
    pub location:         String,
    pub image:            Option<String>,
    pub verified:         bool,
    pub venue_style_name: Option<String>,
    pub owner_name:       Option<String>,
}

// ─── Endpoint payloads ────────────────────────────────────────────────────────

/// `POST /api/venues`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVenuePayload {
    #[serde(flatten)]
    pub venue:          VenueCreateRequest,
    pub owner_id:       UserId,
    #[serde(default)]
    pub venue_style_id: Option<VenueStyleId>,
}

/// `PUT /api/venues/:id` — omitting `venue_style_id` keeps the current style.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateVenuePayload {
    #[serde(flatten)]
    pub venue:          VenueCreateRequest,
    #[serde(default)]
    pub venue_style_id: Option<VenueStyleId>,
}

/// `GET /api/venues?verified=true`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VenueFilter {
    pub verified: Option<bool>,
}

// ─── Tests ────────────────────────────────────────────────────────────────────
