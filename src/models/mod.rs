//! Domain models shared across the venue service.

pub mod dto;
pub mod venue;

pub use dto::{CreateVenuePayload, UpdateVenuePayload, VenueCreateRequest, VenueFilter, VenueView};
pub use venue::{NewVenue, Role, User, UserId, Venue, VenueId, VenueStyle, VenueStyleId};
