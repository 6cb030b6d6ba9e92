//! # sdiv-api: HTTP Surface for Smart Divination
//!
//! A thin axum layer over `sdiv-draw` and `sdiv-pack`.
//!
//! ## API Surface
//!
//! | Route                               | Module              |
//! |-------------------------------------|---------------------|
//! | `POST /api/draw/{coins,cards,runes}` | [`routes::draw`]   |
//! | `GET /api/packs*`                   | [`routes::packs`]   |
//! | `GET /openapi.json`                 | [`openapi`]         |
//! | `GET /health/{liveness,readiness}`  | this module         |
//!
//! Every request is traced through `TraceLayer`. Errors share one JSON
//! envelope, see [`error::AppError`].

pub mod bootstrap;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::draw::router())
        .merge(routes::packs::router())
        .merge(openapi::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness check: 200 while the process runs.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness check. The registry is loaded before the listener binds, so a
/// serving process is always ready.
async fn readiness() -> &'static str {
    "ready"
}
