//! # models::venue
//!
//! Persisted aggregates: [`Venue`] and the entities it references
//! ([`User`] as owner, [`VenueStyle`]).
//!
//! Relations are held as loaded copies (`Option<User>`, `Option<VenueStyle>`):
//! `None` means "not attached", which every consumer must tolerate.

use serde::{Deserialize, Serialize};

pub type VenueId = u32;
pub type UserId = u32;
pub type VenueStyleId = u32;

// ─── User ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Owner,
    Renter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id:    UserId,
    pub name:  String,
    pub email: String,
    pub role:  Role,
}

// ─── VenueStyle ───────────────────────────────────────────────────────────────

/// Kind of space on offer, e.g. "Coworking" or "Meeting Room".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueStyle {
    pub id:   VenueStyleId,
    pub name: String,
}

// ─── Venue ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    /// `None` until the store assigns one.
    pub id:          Option<VenueId>,
    pub name:        String,
    pub description: Option<String>,
    pub capacity:    u32,
    pub location:    String,
    pub image:       Option<String>,
    /// Set by an admin once the listing has been checked.
    pub verified:    bool,
    pub owner:       Option<User>,
    pub venue_style: Option<VenueStyle>,
}

/// Every field of a not-yet-stored [`Venue`].
#[derive(Debug, Clone)]
pub struct NewVenue {
    pub name:        String,
    pub description: Option<String>,
    pub capacity:    u32,
    pub location:    String,
    pub image:       Option<String>,
    pub verified:    bool,
    pub owner:       Option<User>,
    pub venue_style: Option<VenueStyle>,
}

impl Venue {
    pub fn new(fields: NewVenue) -> Self {
        let NewVenue {
            name,
            description,
            capacity,
            location,
            image,
            verified,
            owner,
            venue_style,
        } = fields;

        Self {
            id: None,
            name,
            description,
            capacity,
            location,
            image,
            verified,
            owner,
            venue_style,
        }
    }

    pub fn owner_id(&self) -> Option<UserId> {
        self.owner.as_ref().map(|o| o.id)
    }
}
