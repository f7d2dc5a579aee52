//! API request and response types
//!
//! Request bodies are validated here, at the HTTP boundary, so the core only
//! ever sees sanitized values.

use chrono::{DateTime, Utc};
use recitation_core::split_words;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, Result};

// Re-export shared types from recitation-core
pub use recitation_core::{
    AnalysisEngine, Dialect, MatchOptions, QuranVerseEntry, SessionSummary, SummaryOptions,
    TajweedHint, VerseKey, VerseMatch,
};

/// Largest `limit` accepted by the verse match endpoint.
pub const MAX_MATCH_LIMIT: usize = 50;

fn check_length(field: &str, value: &str, max_chars: usize) -> Result<()> {
    if value.chars().count() > max_chars {
        return Err(ApiError::BadRequest(format!(
            "{} exceeds {} characters",
            field, max_chars
        )));
    }
    Ok(())
}

fn check_word_count(field: &str, value: &str, max_words: usize) -> Result<()> {
    if split_words(value).len() > max_words {
        return Err(ApiError::BadRequest(format!(
            "{} exceeds {} words",
            field, max_words
        )));
    }
    Ok(())
}

fn check_unit_interval(field: &str, value: Option<f64>) -> Result<()> {
    match value {
        Some(v) if !v.is_finite() || !(0.0..=1.0).contains(&v) => Err(ApiError::BadRequest(
            format!("{} must be between 0 and 1", field),
        )),
        _ => Ok(()),
    }
}

// === Normalization ===

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeRequest {
    pub text: String,
}

impl NormalizeRequest {
    pub fn validate(&self, max_chars: usize) -> Result<()> {
        check_length("text", &self.text, max_chars)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeResponse {
    pub normalized: String,
}

// === Verse matching ===

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchVersesRequest {
    pub transcript: String,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub threshold: Option<f64>,
}

impl MatchVersesRequest {
    /// Validate and convert to matcher options (defaults filled in).
    pub fn validate(&self, max_chars: usize) -> Result<MatchOptions> {
        check_length("transcript", &self.transcript, max_chars)?;
        check_unit_interval("threshold", self.threshold)?;

        let defaults = MatchOptions::default();
        let limit = self.limit.unwrap_or(defaults.limit);
        if limit == 0 || limit > MAX_MATCH_LIMIT {
            return Err(ApiError::BadRequest(format!(
                "limit must be between 1 and {}",
                MAX_MATCH_LIMIT
            )));
        }

        Ok(MatchOptions {
            limit,
            threshold: self.threshold.unwrap_or(defaults.threshold),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchVersesResponse {
    pub matches: Vec<VerseMatch>,
}

// === Recitation analysis ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub transcription: String,
    #[serde(default)]
    pub expected_text: Option<String>,
    #[serde(default)]
    pub ayah_id: Option<String>,
    #[serde(default)]
    pub dialect: Option<Dialect>,
    #[serde(default)]
    pub substitution_threshold: Option<f64>,
    #[serde(default)]
    pub duration_seconds: Option<f64>,
    #[serde(default)]
    pub locale_hint: Option<String>,
    #[serde(default)]
    pub engine: Option<AnalysisEngine>,
    #[serde(default)]
    pub tajweed_hints: Vec<TajweedHint>,
}

impl AnalyzeRequest {
    /// Check bounds and parse the verse key, if any.
    ///
    /// Word limits bound the aligner, whose work grows with the product of
    /// both word counts.
    ///
    /// Either `expectedText` or `ayahId` must be present; when both are, the
    /// explicit text wins and the key is only carried through.
    pub fn validate(&self, max_chars: usize, max_words: usize) -> Result<Option<VerseKey>> {
        check_length("transcription", &self.transcription, max_chars)?;
        check_word_count("transcription", &self.transcription, max_words)?;
        if let Some(expected) = &self.expected_text {
            check_length("expectedText", expected, max_chars)?;
            check_word_count("expectedText", expected, max_words)?;
        }
        check_unit_interval("substitutionThreshold", self.substitution_threshold)?;

        if let Some(seconds) = self.duration_seconds {
            if !seconds.is_finite() || seconds < 0.0 {
                return Err(ApiError::BadRequest(
                    "durationSeconds must be a non-negative number".to_string(),
                ));
            }
        }

        let key = self
            .ayah_id
            .as_deref()
            .map(str::parse::<VerseKey>)
            .transpose()?;

        if self.expected_text.is_none() && key.is_none() {
            return Err(ApiError::BadRequest(
                "either expectedText or ayahId is required".to_string(),
            ));
        }

        Ok(key)
    }

    /// Summary options carried into the core.
    pub fn summary_options(&self) -> SummaryOptions {
        SummaryOptions {
            ayah_id: self.ayah_id.clone(),
            dialect: self.dialect.unwrap_or_default(),
            locale_hint: self.locale_hint.clone(),
            duration_seconds: self.duration_seconds,
            substitution_threshold: self.substitution_threshold,
            engine: self.engine.clone(),
            tajweed_hints: self.tajweed_hints.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub summary: SessionSummary,
}
