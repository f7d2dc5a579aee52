//! Recitation analysis endpoint

use axum::{extract::State, Json};
use chrono::Utc;
use recitation_core::create_live_session_summary;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::{AnalyzeRequest, AnalyzeResponse};
use crate::AppState;

/// POST /api/recitation/analyze
/// Aligns a transcription against the expected verse text and scores it
pub async fn analyze(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>> {
    let key = payload.validate(
        state.config.max_transcript_chars,
        state.config.max_transcript_words,
    )?;

    let expected_text = match (&payload.expected_text, key) {
        (Some(text), _) => text.clone(),
        (None, Some(key)) => state
            .index
            .get(&key)
            .map(|verse| verse.text.clone())
            .ok_or_else(|| ApiError::NotFound(format!("Verse {} not found", key)))?,
        (None, None) => {
            return Err(ApiError::BadRequest(
                "either expectedText or ayahId is required".to_string(),
            ))
        }
    };

    // Alignment is CPU-bound; keep it off the async workers.
    let options = payload.summary_options();
    let transcription = payload.transcription;
    let summary = tokio::task::spawn_blocking(move || {
        create_live_session_summary(&transcription, &expected_text, options)
    })
    .await
    .map_err(|err| ApiError::Internal(format!("Recitation analysis failed: {}", err)))?;
    let session_id = Uuid::new_v4();

    tracing::info!(
        "Analyzed session {}: score {:.2}, {} mistakes",
        session_id,
        summary.overall_score,
        summary.mistakes.len()
    );

    Ok(Json(AnalyzeResponse {
        session_id,
        created_at: Utc::now(),
        summary,
    }))
}
