//! HTTP surface: JSON API, admin pages, and the error route.

pub mod admin;
pub mod errors;
pub mod venues;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    auth::{require_admin_session, require_api_key},
    dispatch::middleware::{capture_panic_frames, dispatch_errors, forward_panic},
    state::SharedState,
};

/// Full application router with every layer attached.
pub fn router(state: SharedState) -> Router {
    with_layers(routes(&state), state)
}

/// Every route plus the per-group guards, before the global layers.
pub fn routes(state: &SharedState) -> Router<SharedState> {
    // ── JSON API ──────────────────────────────────────────────────────────────
    let api = Router::new()
        .route("/api/venues",       get(venues::list_venues).post(venues::create_venue))
        .route(
            "/api/venues/:id",
            get(venues::get_venue)
                .put(venues::update_venue)
                .delete(venues::delete_venue),
        )
        .route("/api/venue-styles", get(venues::list_styles))
        .route_layer(from_fn_with_state(state.clone(), require_api_key))
        .route("/api/health",       get(venues::health_check));

    // ── Admin panel ───────────────────────────────────────────────────────────
    let admin = Router::new()
        .route("/admin/venues",            get(admin::venues_page))
        .route("/admin/venues/:id/verify", post(admin::verify_venue))
        .route_layer(from_fn_with_state(state.clone(), require_admin_session))
        .route("/admin/login",             get(admin::login_page));

    Router::new()
        .route("/",      get(admin::home))
        .route("/error", get(errors::error_page))
        .merge(api)
        .merge(admin)
        .fallback(errors::not_found)
}

/// Global middleware (outermost first): tracing, CORS, error dispatch, panic
/// catching.
pub fn with_layers(routes: Router<SharedState>, state: SharedState) -> Router {
    capture_panic_frames();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    routes
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(from_fn_with_state(state.clone(), dispatch_errors))
                .layer(CatchPanicLayer::custom(forward_panic)),
        )
        .with_state(state)
}
