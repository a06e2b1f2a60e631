//! # state
//!
//! AppState injected into every Axum handler and middleware.

use std::sync::Arc;

use crate::{config::AppConfig, dispatch::ErrorResponder, store::VenueStore};

/// Top-level shared state.
pub struct AppState {
    pub config: AppConfig,

    /// Venue catalogue (users, styles, venues).
    pub store: VenueStore,

    /// Dev mode is baked in at startup and never re-read.
    pub responder: ErrorResponder,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let store = if config.seed_demo {
            VenueStore::with_demo_data()
        } else {
            VenueStore::new()
        };

        Self {
            responder: ErrorResponder::new(config.is_development_mode()),
            store,
            config,
        }
    }
}

/// Convenience type alias
pub type SharedState = Arc<AppState>;

pub fn build_state(config: AppConfig) -> SharedState {
    Arc::new(AppState::new(config))
}
