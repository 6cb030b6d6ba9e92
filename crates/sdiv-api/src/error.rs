//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps draw and registry failures to HTTP status codes with a JSON body
//! carrying a machine-readable code, a message, and optional details.
//! Internal error messages are logged, never returned.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use sdiv_draw::DrawError;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g. "PACK_NOT_FOUND", "VALIDATION_ERROR").
    pub code: String,
    pub message: String,
    /// Additional context, present only for some client errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

#[derive(Error, Debug)]
pub enum AppError {
    /// No loaded manifest has this pack id (404).
    #[error("pack {pack_id} not found")]
    PackNotFound {
        pack_id: String,
        available: Vec<String>,
    },

    /// The pack exists but not at the requested version (404).
    #[error("pack {pack_id} is not available at version {requested}")]
    VersionMismatch {
        pack_id: String,
        requested: String,
        available: String,
    },

    /// Well-formed request that breaks a rule: count out of range, seed
    /// too short (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Body is not JSON or has mistyped fields (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Route exists but not for this method (405).
    #[error("method not allowed; use {allow}")]
    MethodNotAllowed { allow: &'static str },

    /// Internal server error (500). Message is logged but not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::PackNotFound { .. } => (StatusCode::NOT_FOUND, "PACK_NOT_FOUND"),
            Self::VersionMismatch { .. } => (StatusCode::NOT_FOUND, "VERSION_MISMATCH"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::MethodNotAllowed { .. } => (StatusCode::METHOD_NOT_ALLOWED, "METHOD_NOT_ALLOWED"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::PackNotFound { pack_id, available } => Some(serde_json::json!({
                "packId": pack_id,
                "availablePacks": available,
            })),
            Self::VersionMismatch {
                requested,
                available,
                ..
            } => Some(serde_json::json!({
                "requestedVersion": requested,
                "availableVersion": available,
            })),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        if let Self::Internal(_) = &self {
            tracing::error!(error = %self, "internal server error");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details: self.details(),
            },
        };

        let mut response = (status, Json(body)).into_response();
        if let Self::MethodNotAllowed { allow } = self {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static(allow));
        }
        response
    }
}

/// Every draw failure is a rule violation on otherwise well-formed input.
impl From<DrawError> for AppError {
    fn from(err: DrawError) -> Self {
        Self::Validation(err.to_string())
    }
}
