//! # converter
//!
//! Mapping between stored [`Venue`]s and the wire records in
//! [`crate::models::dto`].
//!
//! [`VenueConverter`] has no variants, so it can never be instantiated; it is
//! only a namespace for the three mappings.

use crate::models::{NewVenue, User, Venue, VenueCreateRequest, VenueStyle, VenueView};

pub enum VenueConverter {}

impl VenueConverter {
    /// New, unverified venue built from a create request.
    pub fn to_entity(
        request: &VenueCreateRequest,
        owner: Option<&User>,
        venue_style: Option<&VenueStyle>,
    ) -> Venue {
        Venue::new(NewVenue {
            name:        request.name.clone(),
            description: request.description.clone(),
            capacity:    request.capacity,
            location:    request.location.clone(),
            image:       request.image.clone(),
            verified:    false,
            owner:       owner.cloned(),
            venue_style: venue_style.cloned(),
        })
    }

    pub fn to_view(venue: &Venue) -> VenueView {
        VenueView {
            id:               venue.id,
            name:             venue.name.clone(),
            description:      venue.description.clone(),
            capacity:         venue.capacity,
            location:         venue.location.clone(),
            image:            venue.image.clone(),
            verified:         venue.verified,
            venue_style_name: venue.venue_style.as_ref().map(|s| s.name.clone()),
            owner_name:       venue.owner.as_ref().map(|o| o.name.clone()),
        }
    }

    /// Overwrite the mutable fields in place. `verified` and the owner are
    /// never touched; the style only changes when a new one is given.
    pub fn apply_update(
        venue: &mut Venue,
        request: &VenueCreateRequest,
        venue_style: Option<VenueStyle>,
    ) {
        venue.name        = request.name.clone();
        venue.description = request.description.clone();
        venue.capacity    = request.capacity;
        venue.location    = request.location.clone();
        venue.image       = request.image.clone();

        if let Some(style) = venue_style {
            venue.venue_style = Some(style);
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
