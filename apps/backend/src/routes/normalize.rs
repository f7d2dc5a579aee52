//! Text normalization endpoint

use axum::{extract::State, Json};
use recitation_core::normalize_arabic_text;

use crate::error::Result;
use crate::models::{NormalizeRequest, NormalizeResponse};
use crate::AppState;

/// POST /api/normalize
pub async fn normalize(
    State(state): State<AppState>,
    Json(payload): Json<NormalizeRequest>,
) -> Result<Json<NormalizeResponse>> {
    payload.validate(state.config.max_transcript_chars)?;

    Ok(Json(NormalizeResponse {
        normalized: normalize_arabic_text(&payload.text),
    }))
}
