//! # Pack Manifest Routes
//!
//! Read-only views over the registry loaded at startup.
//!
//! - GET /api/packs
//! - GET /api/packs/issues
//! - GET /api/packs/{pack_id}/manifest?version=
//!
//! Manifest responses are keyed on the content checksum so CDNs and
//! clients can cache them.

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use sdiv_pack::{ManifestValidationIssue, PackManifest};

use crate::error::AppError;
use crate::state::AppState;

const MANIFEST_CACHE_CONTROL: &str = "public, max-age=3600, s-maxage=3600";

#[derive(Debug, Default, Deserialize)]
pub struct ManifestQuery {
    /// When present, must equal the loaded version exactly.
    pub version: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PackListResponse {
    pub packs: Vec<PackManifest>,
}

#[derive(Debug, Serialize)]
pub struct IssueLogResponse {
    pub issues: Vec<ManifestValidationIssue>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/packs", get(list_packs).fallback(get_only))
        .route("/api/packs/issues", get(list_issues).fallback(get_only))
        .route(
            "/api/packs/{pack_id}/manifest",
            get(get_manifest).fallback(get_only),
        )
}

async fn get_only() -> AppError {
    AppError::MethodNotAllowed { allow: "GET" }
}

/// GET /api/packs: Every loaded manifest, in file order.
#[utoipa::path(
    get,
    path = "/api/packs",
    responses(
        (status = 200, description = "Loaded pack manifests with checksums"),
    ),
    tag = "packs"
)]
pub(crate) async fn list_packs(State(state): State<AppState>) -> Json<PackListResponse> {
    Json(PackListResponse {
        packs: state.registry.list_pack_manifests().to_vec(),
    })
}

/// GET /api/packs/issues: Issues recorded while loading manifests.
#[utoipa::path(
    get,
    path = "/api/packs/issues",
    responses(
        (status = 200, description = "Load-time validation issues"),
    ),
    tag = "packs"
)]
pub(crate) async fn list_issues(State(state): State<AppState>) -> Json<IssueLogResponse> {
    Json(IssueLogResponse {
        issues: state.registry.collect_manifest_validation_issues(),
    })
}

/// GET /api/packs/{pack_id}/manifest: One manifest with cache headers.
#[utoipa::path(
    get,
    path = "/api/packs/{pack_id}/manifest",
    params(
        ("pack_id" = String, Path, description = "Pack identifier"),
        ("version" = Option<String>, Query, description = "Exact version the client expects"),
    ),
    responses(
        (status = 200, description = "Pack manifest; ETag carries the checksum"),
        (status = 404, description = "Unknown pack or version mismatch", body = crate::error::ErrorBody),
    ),
    tag = "packs"
)]
pub(crate) async fn get_manifest(
    State(state): State<AppState>,
    Path(pack_id): Path<String>,
    Query(query): Query<ManifestQuery>,
) -> Result<(HeaderMap, Json<PackManifest>), AppError> {
    let manifest = state
        .registry
        .get_pack_manifest(&pack_id)
        .ok_or_else(|| AppError::PackNotFound {
            pack_id: pack_id.clone(),
            available: state
                .registry
                .list_pack_manifests()
                .iter()
                .map(|m| m.id().to_string())
                .collect(),
        })?;

    if let Some(requested) = query.version {
        if requested != manifest.version() {
            return Err(AppError::VersionMismatch {
                pack_id,
                requested,
                available: manifest.version().to_string(),
            });
        }
    }

    let headers = cache_headers(manifest)?;
    tracing::debug!(pack_id = %pack_id, checksum = %manifest.checksum(), "manifest served");
    Ok((headers, Json(manifest.clone())))
}

fn cache_headers(manifest: &PackManifest) -> Result<HeaderMap, AppError> {
    let etag = HeaderValue::from_str(&format!("\"{}\"", manifest.checksum()))
        .map_err(|e| AppError::Internal(format!("etag header: {e}")))?;
    let mut headers = HeaderMap::new();
    headers.insert(header::ETAG, etag);
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(MANIFEST_CACHE_CONTROL),
    );
    Ok(headers)
}
