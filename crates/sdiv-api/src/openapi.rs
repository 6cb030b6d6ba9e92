//! # OpenAPI Document
//!
//! Collects the utoipa-annotated handlers into one OpenAPI 3.1 document
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Smart Divination API",
        version = "0.1.0",
        description = "Seeded I Ching, tarot, and rune draws plus content-pack manifest delivery."
    ),
    paths(
        crate::routes::draw::draw_coins,
        crate::routes::draw::draw_cards,
        crate::routes::draw::draw_runes,
        crate::routes::packs::list_packs,
        crate::routes::packs::list_issues,
        crate::routes::packs::get_manifest,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::draw::CoinsDrawRequest,
        crate::routes::draw::CardsDrawRequest,
        crate::routes::draw::RunesDrawRequest,
        crate::routes::draw::HexagramDraw,
        crate::routes::draw::CoinsDrawResponse,
        crate::routes::draw::CardResult,
        crate::routes::draw::CardsDrawResponse,
        crate::routes::draw::RuneResult,
        crate::routes::draw::RunesDrawResponse,
    )),
    tags(
        (name = "draw", description = "Seeded divination draws"),
        (name = "packs", description = "Content-pack manifests"),
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
