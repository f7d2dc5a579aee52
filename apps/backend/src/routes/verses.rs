//! Verse lookup and identification endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::{MatchVersesRequest, MatchVersesResponse, QuranVerseEntry, VerseKey};
use crate::AppState;

/// GET /api/verses/:key
pub async fn get(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<QuranVerseEntry>> {
    let key: VerseKey = key.parse()?;

    let verse = state
        .index
        .get(&key)
        .ok_or_else(|| ApiError::NotFound(format!("Verse {} not found", key)))?;

    Ok(Json(verse.to_entry()))
}

/// POST /api/verses/match
/// Ranks corpus verses against a transcript
pub async fn find_matches(
    State(state): State<AppState>,
    Json(payload): Json<MatchVersesRequest>,
) -> Result<Json<MatchVersesResponse>> {
    let options = payload.validate(state.config.max_match_chars)?;

    // Scoring touches every verse; keep it off the async workers.
    let index = state.index;
    let transcript = payload.transcript;
    let matches =
        tokio::task::spawn_blocking(move || index.find_best_matches(&transcript, options))
            .await
            .map_err(|err| ApiError::Internal(format!("Verse matching failed: {}", err)))?;

    tracing::debug!(
        "Matched transcript against {} verses, {} candidates",
        state.index.len(),
        matches.len()
    );

    Ok(Json(MatchVersesResponse { matches }))
}
