//! # store — in-memory venue catalogue
//!
//! Holds users, venue styles and venues behind one `RwLock`. Venue ids are
//! assigned on insert and never reused.

use std::collections::BTreeMap;

use tokio::sync::RwLock;
use tracing::info;

use crate::models::{
    Role, User, UserId, Venue, VenueFilter, VenueId, VenueStyle, VenueStyleId,
};

#[derive(Debug, Default)]
struct Catalog {
    users:         BTreeMap<UserId, User>,
    styles:        BTreeMap<VenueStyleId, VenueStyle>,
    venues:        BTreeMap<VenueId, Venue>,
    last_venue_id: VenueId,
}

impl Catalog {
    fn insert_venue(&mut self, mut venue: Venue) -> Venue {
        self.last_venue_id += 1;
        venue.id = Some(self.last_venue_id);
        self.venues.insert(self.last_venue_id, venue.clone());
        venue
    }
}

#[derive(Debug, Default)]
pub struct VenueStore {
    inner: RwLock<Catalog>,
}

impl VenueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with a handful of owners, styles and venues.
    pub fn with_demo_data() -> Self {
        let mut catalog = Catalog::default();

        let users = [
            (1, "Site Admin", "admin@venuebook.local", Role::Admin),
            (2, "Mai Tran", "mai@venuebook.local", Role::Owner),
            (3, "Omar Haddad", "omar@venuebook.local", Role::Owner),
        ];
        for (id, name, email, role) in users {
            catalog.users.insert(id, User { id, name: name.into(), email: email.into(), role });
        }

        for (id, name) in [(1, "Coworking"), (2, "Meeting Room"), (3, "Private Office")] {
            catalog.styles.insert(id, VenueStyle { id, name: name.into() });
        }

        let venues = [
            ("Harbour Loft", "12 Harbour St", 24, 2, Some(1), true),
            ("Quiet Corner", "3 Elm Lane", 4, 3, Some(3), false),
            ("Board Room B", "88 Market Sq", 12, 2, None, false),
        ];
        for (name, location, capacity, owner_id, style_id, verified) in venues {
            let venue = Venue {
                id:          None,
                name:        name.into(),
                description: None,
                capacity,
                location:    location.into(),
                image:       None,
                verified,
                owner:       catalog.users.get(&owner_id).cloned(),
                venue_style: style_id.and_then(|id| catalog.styles.get(&id).cloned()),
            };
            catalog.insert_venue(venue);
        }

        info!(
            users  = catalog.users.len(),
            styles = catalog.styles.len(),
            venues = catalog.venues.len(),
            "Demo catalogue seeded"
        );

        Self {
            inner: RwLock::new(catalog),
        }
    }

    // ── Users / styles ────────────────────────────────────────────────────────

    pub async fn insert_user(&self, user: User) {
        self.inner.write().await.users.insert(user.id, user);
    }

    pub async fn user(&self, id: UserId) -> Option<User> {
        self.inner.read().await.users.get(&id).cloned()
    }

    pub async fn insert_style(&self, style: VenueStyle) {
        self.inner.write().await.styles.insert(style.id, style);
    }

    pub async fn style(&self, id: VenueStyleId) -> Option<VenueStyle> {
        self.inner.read().await.styles.get(&id).cloned()
    }

    pub async fn styles(&self) -> Vec<VenueStyle> {
        self.inner.read().await.styles.values().cloned().collect()
    }

    // ── Venues ────────────────────────────────────────────────────────────────

    /// Venues in id order.
    pub async fn venues(&self, filter: &VenueFilter) -> Vec<Venue> {
        let catalog = self.inner.read().await;
        catalog
            .venues
            .values()
            .filter(|v| filter.verified.map_or(true, |want| v.verified == want))
            .cloned()
            .collect()
    }

    pub async fn venue(&self, id: VenueId) -> Option<Venue> {
        self.inner.read().await.venues.get(&id).cloned()
    }

    /// Stores `venue` under a fresh id and returns the stored copy.
    pub async fn insert_venue(&self, venue: Venue) -> Venue {
        self.inner.write().await.insert_venue(venue)
    }

    /// Runs `update` against the stored venue; `None` if there is no such id.
    pub async fn update_venue<F>(&self, id: VenueId, update: F) -> Option<Venue>
    where
        F: FnOnce(&mut Venue),
    {
        let mut catalog = self.inner.write().await;
        let venue = catalog.venues.get_mut(&id)?;
        update(venue);
        Some(venue.clone())
    }

    pub async fn remove_venue(&self, id: VenueId) -> Option<Venue> {
        self.inner.write().await.venues.remove(&id)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
