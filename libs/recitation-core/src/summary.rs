//! Session summary: aggregates detected mistakes into a scored report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::alignment::{comparable_word_count, detect_mistakes, DetectorOptions};
use crate::normalize::split_words;
use crate::types::{
    AnalysisEngine, Dialect, LiveMistake, MistakeCategory, MistakeType, TajweedHint,
};

/// Context for [`create_live_session_summary`].
///
/// Only `dialect` and `substitution_threshold` influence detection; the rest
/// is carried through to the summary.
#[derive(Debug, Clone, Default)]
pub struct SummaryOptions {
    pub ayah_id: Option<String>,
    pub dialect: Dialect,
    pub locale_hint: Option<String>,
    pub duration_seconds: Option<f64>,
    pub substitution_threshold: Option<f64>,
    pub engine: Option<AnalysisEngine>,
    pub tajweed_hints: Vec<TajweedHint>,
}

/// Mistake counts per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MistakeCounts {
    pub substitutions: usize,
    pub omissions: usize,
    pub insertions: usize,
}

impl MistakeCounts {
    fn from_mistakes(mistakes: &[LiveMistake]) -> Self {
        let mut counts = Self::default();
        for mistake in mistakes {
            match mistake.kind {
                MistakeType::Substitution => counts.substitutions += 1,
                MistakeType::Omission => counts.omissions += 1,
                MistakeType::Insertion => counts.insertions += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.substitutions + self.omissions + self.insertions
    }
}

/// Scored report of one recitation attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub transcription: String,
    pub expected_text: String,
    pub mistakes: Vec<LiveMistake>,
    /// Whitespace-split words of the expected text; the space `LiveMistake::index` lives in.
    pub word_count: usize,
    /// Expected words that take part in alignment (verse markers and stray
    /// punctuation excluded); the score denominator.
    pub scored_word_count: usize,
    pub mistake_counts: MistakeCounts,
    pub category_counts: BTreeMap<MistakeCategory, usize>,
    /// Between 0.0 and 1.0.
    pub overall_score: f64,
    pub weakest_metric: Option<MistakeCategory>,
    pub feedback: String,
    pub dialect: Dialect,
    pub substitution_threshold: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ayah_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale_hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub words_per_minute: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<AnalysisEngine>,
}

/// Run mistake detection and aggregate the result.
pub fn create_live_session_summary(
    transcription: &str,
    expected_text: &str,
    options: SummaryOptions,
) -> SessionSummary {
    let detector = DetectorOptions {
        substitution_threshold: options.substitution_threshold,
        dialect: options.dialect,
        tajweed_hints: options.tajweed_hints,
    };
    let mistakes = detect_mistakes(expected_text, transcription, &detector);

    let word_count = split_words(expected_text).len();
    let scored_word_count = comparable_word_count(expected_text);
    let mistake_counts = MistakeCounts::from_mistakes(&mistakes);
    let category_counts = count_categories(&mistakes);
    let overall_score = overall_score(mistake_counts.total(), scored_word_count);
    let weakest_metric = weakest_metric(&category_counts);
    let feedback = feedback_message(overall_score, weakest_metric);

    let words_per_minute = options
        .duration_seconds
        .filter(|seconds| seconds.is_finite() && *seconds > 0.0)
        .map(|seconds| comparable_word_count(transcription) as f64 * 60.0 / seconds);

    SessionSummary {
        transcription: transcription.to_string(),
        expected_text: expected_text.to_string(),
        mistakes,
        word_count,
        scored_word_count,
        mistake_counts,
        category_counts,
        overall_score,
        weakest_metric,
        feedback,
        dialect: options.dialect,
        substitution_threshold: detector.effective_threshold(),
        ayah_id: options.ayah_id,
        locale_hint: options.locale_hint,
        duration_seconds: options.duration_seconds,
        words_per_minute,
        engine: options.engine,
    }
}

/// `1 - mistakes / words`, clamped to [0, 1].
pub fn overall_score(mistake_count: usize, word_count: usize) -> f64 {
    if word_count == 0 {
        return if mistake_count == 0 { 1.0 } else { 0.0 };
    }
    (1.0 - mistake_count as f64 / word_count as f64).clamp(0.0, 1.0)
}

fn count_categories(mistakes: &[LiveMistake]) -> BTreeMap<MistakeCategory, usize> {
    let mut counts = BTreeMap::new();
    for category in mistakes.iter().flat_map(|m| m.categories.iter()) {
        *counts.entry(*category).or_insert(0) += 1;
    }
    counts
}

/// Most frequent category; ties go to the category declared first.
fn weakest_metric(counts: &BTreeMap<MistakeCategory, usize>) -> Option<MistakeCategory> {
    let mut best: Option<(MistakeCategory, usize)> = None;
    for category in MistakeCategory::ALL {
        let count = counts.get(&category).copied().unwrap_or(0);
        if count > 0 && best.map_or(true, |(_, top)| count > top) {
            best = Some((category, count));
        }
    }
    best.map(|(category, _)| category)
}

fn feedback_message(score: f64, weakest: Option<MistakeCategory>) -> String {
    let Some(weakest) = weakest else {
        return "Excellent recitation: every word matched the expected text.".to_string();
    };

    let opening = if score >= 0.9 {
        "Very good recitation with minor slips."
    } else if score >= 0.7 {
        "Good effort, a few words need attention."
    } else {
        "Keep practicing this passage."
    };

    let focus = match weakest {
        MistakeCategory::Pronunciation => {
            "Focus on pronunciation: listen to a reciter and repeat the highlighted words slowly."
        }
        MistakeCategory::Memorization => {
            "Focus on memorization: review the passage and recite the skipped words from memory."
        }
        MistakeCategory::Fluency => {
            "Focus on fluency: recite steadily without adding or repeating words."
        }
        MistakeCategory::Tajweed => {
            "Focus on tajweed: revisit the rules marked on the highlighted words."
        }
    };

    format!("{} {}", opening, focus)
}
