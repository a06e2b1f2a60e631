//! # Venuebook server
//!
//! ## Environment Variables
//!
//! See [`venuebook::config`] for the full table. `RUST_LOG` overrides the
//! default tracing filter (`venuebook=debug,tower_http=info`).

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use venuebook::{config::AppConfig, routes, state::build_state};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Load .env ──────────────────────────────────────────────────────────
    dotenvy::dotenv().ok();

    // ── 2. Structured logging ─────────────────────────────────────────────────
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("venuebook=debug".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    // ── 3. Config & shared state ──────────────────────────────────────────────
    let config = AppConfig::from_env()?;
    let addr = config.bind_addr;

    info!(
        profile     = config.profile.as_deref().unwrap_or("default"),
        dev_mode    = config.is_development_mode(),
        admin_guard = config.admin_token.is_some(),
        api_guard   = config.api_key.is_some(),
        "Configuration loaded"
    );

    let state = build_state(config);

    // ── 4. Router ─────────────────────────────────────────────────────────────
    let app = routes::router(state);

    // ── 5. Bind & Serve ───────────────────────────────────────────────────────
    info!(?addr, "🚀 Venuebook server starting");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
