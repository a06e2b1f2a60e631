//! # Venuebook — workspace/venue booking backend
//!
//! ```text
//!  ┌─────────────┐  /api/venues…  (JSON)        ┌──────────────────────────┐
//!  │ API client  │ ───────────────────────────▶ │ routes ──▶ VenueStore    │
//!  └─────────────┘                              │    │         ▲           │
//!                                               │    ▼         │           │
//!  ┌─────────────┐  /admin/…      (HTML)        │ VenueConverter           │
//!  │ Admin panel │ ───────────────────────────▶ │                          │
//!  └─────────────┘                              └────────────┬─────────────┘
//!                                                            │ failure
//!                                                            ▼
//!                                   dispatch_errors ──▶ ErrorResponder
//!                                                       ├─ admin page
//!                                                       ├─ public page
//!                                                       ├─ JSON error body
//!                                                       └─ login redirect
//! ```

pub mod auth;
pub mod config;
pub mod converter;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod render;
pub mod routes;
pub mod state;
pub mod store;
