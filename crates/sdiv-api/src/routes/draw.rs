//! # Draw Routes
//!
//! - POST /api/draw/coins: I Ching lines and hexagrams
//! - POST /api/draw/cards: tarot cards
//! - POST /api/draw/runes: Elder Futhark runes
//!
//! Every response echoes the seed the draw ran under, so any result can be
//! reproduced by sending that seed back.

use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use sdiv_draw::iching::{self, DrawRequest, DrawResult};
use sdiv_draw::runes::{self, RuneDrawRequest};
use sdiv_draw::tarot::{self, CardDrawRequest};

use crate::error::AppError;
use crate::extractors::{extract_json, extract_optional_json};
use crate::state::AppState;

const LOCALE_HEADER: &str = "x-locale";
const SEEDED_METHOD: &str = "seeded";

fn default_true() -> bool {
    true
}

fn default_rune_count() -> i64 {
    runes::DEFAULT_RUNES
}

/// Coin draw request. The body may be empty.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CoinsDrawRequest {
    /// Number of lines to cast; clamped to 1..=6, default 6. Any integral
    /// JSON number is accepted, including `6.0` and values past `i64`.
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub rounds: Option<f64>,
    /// Reuse a previous seed to reproduce its draw.
    #[serde(default)]
    pub seed: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CardsDrawRequest {
    /// 1..=10.
    pub count: i64,
    #[serde(rename = "allowReversed", default = "default_true")]
    pub allow_reversed: bool,
    /// At least 4 characters when present.
    #[serde(default)]
    pub seed: Option<String>,
}

/// Rune draw request. The body may be empty.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RunesDrawRequest {
    /// 1..=5, default 3.
    #[serde(default = "default_rune_count")]
    pub count: i64,
    #[serde(default = "default_true")]
    pub allow_reversed: bool,
    #[serde(default)]
    pub seed: Option<String>,
}

impl Default for RunesDrawRequest {
    fn default() -> Self {
        Self {
            count: runes::DEFAULT_RUNES,
            allow_reversed: true,
            seed: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HexagramDraw {
    pub lines: Vec<u8>,
    pub primary_hex: u8,
    pub changing_lines: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_hex: Option<u8>,
}

impl From<DrawResult> for HexagramDraw {
    fn from(r: DrawResult) -> Self {
        Self {
            lines: r.lines,
            primary_hex: r.primary_hex,
            changing_lines: r.changing_lines,
            result_hex: r.result_hex,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CoinsDrawResponse {
    pub result: HexagramDraw,
    pub seed: String,
    /// RFC 3339, UTC, millisecond precision.
    pub timestamp: String,
    pub locale: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CardResult {
    pub id: String,
    pub name: String,
    pub suit: String,
    pub number: u32,
    pub upright: bool,
    pub position: u32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CardsDrawResponse {
    pub result: Vec<CardResult>,
    pub seed: String,
    pub method: String,
    pub timestamp: String,
    pub locale: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RuneResult {
    pub id: String,
    pub reversed: bool,
    pub position: u32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RunesDrawResponse {
    pub result: Vec<RuneResult>,
    pub seed: String,
    pub method: String,
    pub timestamp: String,
    pub locale: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/draw/coins", post(draw_coins).fallback(post_only))
        .route("/api/draw/cards", post(draw_cards).fallback(post_only))
        .route("/api/draw/runes", post(draw_runes).fallback(post_only))
}

async fn post_only() -> AppError {
    AppError::MethodNotAllowed { allow: "POST" }
}

/// Integral values saturate into `i64` and are clamped by the draw;
/// fractional values are malformed.
fn integral_rounds(rounds: Option<f64>) -> Result<Option<i64>, AppError> {
    match rounds {
        Some(r) if !r.is_finite() || r.fract() != 0.0 => Err(AppError::BadRequest(format!(
            "rounds must be an integer, got {r}"
        ))),
        Some(r) => Ok(Some(r as i64)),
        None => Ok(None),
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `x-locale` when present and non-blank, otherwise the configured default.
fn request_locale(headers: &HeaderMap, fallback: &str) -> String {
    headers
        .get(LOCALE_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(fallback)
        .to_string()
}

/// POST /api/draw/coins: Cast I Ching lines.
#[utoipa::path(
    post,
    path = "/api/draw/coins",
    request_body = CoinsDrawRequest,
    responses(
        (status = 200, description = "Lines and hexagrams", body = CoinsDrawResponse),
        (status = 400, description = "Malformed body", body = crate::error::ErrorBody),
    ),
    tag = "draw"
)]
pub(crate) async fn draw_coins(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<CoinsDrawResponse>, AppError> {
    let req: CoinsDrawRequest = extract_optional_json(&body)?;
    let request = DrawRequest::new(integral_rounds(req.rounds)?, req.seed);
    let result = iching::draw(&request);
    tracing::debug!(
        rounds = request.rounds(),
        primary_hex = result.primary_hex,
        "coins draw"
    );

    Ok(Json(CoinsDrawResponse {
        result: result.into(),
        seed: request.seed().to_string(),
        timestamp: timestamp(),
        locale: request_locale(&headers, &state.config.default_locale),
    }))
}

/// POST /api/draw/cards: Draw tarot cards.
#[utoipa::path(
    post,
    path = "/api/draw/cards",
    request_body = CardsDrawRequest,
    responses(
        (status = 200, description = "Cards in spread order", body = CardsDrawResponse),
        (status = 400, description = "Malformed body", body = crate::error::ErrorBody),
        (status = 422, description = "Count out of range or seed too short", body = crate::error::ErrorBody),
    ),
    tag = "draw"
)]
pub(crate) async fn draw_cards(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<CardsDrawRequest>, JsonRejection>,
) -> Result<Json<CardsDrawResponse>, AppError> {
    let req = extract_json(body)?;
    let draw = tarot::draw_cards(CardDrawRequest {
        count: req.count,
        allow_reversed: req.allow_reversed,
        seed: req.seed,
    })?;
    tracing::debug!(count = draw.cards.len(), "cards draw");

    let result = draw
        .cards
        .into_iter()
        .map(|c| CardResult {
            id: c.id,
            name: c.name,
            suit: c.suit.to_string(),
            number: c.number,
            upright: c.upright,
            position: c.position,
        })
        .collect();

    Ok(Json(CardsDrawResponse {
        result,
        seed: draw.seed,
        method: SEEDED_METHOD.to_string(),
        timestamp: timestamp(),
        locale: request_locale(&headers, &state.config.default_locale),
    }))
}

/// POST /api/draw/runes: Draw runes.
#[utoipa::path(
    post,
    path = "/api/draw/runes",
    request_body = RunesDrawRequest,
    responses(
        (status = 200, description = "Runes in spread order", body = RunesDrawResponse),
        (status = 400, description = "Malformed body", body = crate::error::ErrorBody),
        (status = 422, description = "Count out of range or seed too short", body = crate::error::ErrorBody),
    ),
    tag = "draw"
)]
pub(crate) async fn draw_runes(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<RunesDrawResponse>, AppError> {
    let req: RunesDrawRequest = extract_optional_json(&body)?;
    let draw = runes::draw_runes(RuneDrawRequest {
        count: req.count,
        allow_reversed: req.allow_reversed,
        seed: req.seed,
    })?;
    tracing::debug!(count = draw.runes.len(), "runes draw");

    let result = draw
        .runes
        .into_iter()
        .map(|r| RuneResult {
            id: r.id,
            reversed: r.reversed,
            position: r.position,
        })
        .collect();

    Ok(Json(RunesDrawResponse {
        result,
        seed: draw.seed,
        method: SEEDED_METHOD.to_string(),
        timestamp: timestamp(),
        locale: request_locale(&headers, &state.config.default_locale),
    }))
}
