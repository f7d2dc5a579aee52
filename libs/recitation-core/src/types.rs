//! Core types for recitation alignment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::alignment::{DEFAULT_SUBSTITUTION_THRESHOLD, LENIENT_SUBSTITUTION_THRESHOLD};
use crate::error::CorpusError;

/// `surah:ayah` identifier of a single verse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VerseKey {
    pub surah: u16,
    pub ayah: u16,
}

impl VerseKey {
    /// Create a key; both numbers must be positive.
    pub fn new(surah: u16, ayah: u16) -> Option<Self> {
        if surah == 0 || ayah == 0 {
            return None;
        }
        Some(Self { surah, ayah })
    }
}

impl fmt::Display for VerseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.surah, self.ayah)
    }
}

impl FromStr for VerseKey {
    type Err = CorpusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CorpusError::InvalidKey {
            value: s.to_string(),
        };

        let (surah, ayah) = s.trim().split_once(':').ok_or_else(invalid)?;
        let surah = surah.parse::<u16>().map_err(|_| invalid())?;
        let ayah = ayah.parse::<u16>().map_err(|_| invalid())?;
        Self::new(surah, ayah).ok_or_else(invalid)
    }
}

impl TryFrom<String> for VerseKey {
    type Error = CorpusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VerseKey> for String {
    fn from(key: VerseKey) -> Self {
        key.to_string()
    }
}

/// Canonical text of one verse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuranVerseEntry {
    pub key: VerseKey,
    pub surah_number: u16,
    pub ayah_number: u16,
    pub text: String,
}

impl QuranVerseEntry {
    /// Create an entry, deriving the key from the surah and ayah numbers.
    pub fn new(surah_number: u16, ayah_number: u16, text: impl Into<String>) -> Option<Self> {
        let key = VerseKey::new(surah_number, ayah_number)?;
        Some(Self {
            key,
            surah_number,
            ayah_number,
            text: text.into(),
        })
    }
}

/// Candidate verse identification for a transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerseMatch {
    pub key: VerseKey,
    pub surah_number: u16,
    pub ayah_number: u16,
    pub text: String,
    /// Similarity between 0.0 and 1.0 after normalization.
    pub similarity: f64,
}

/// Kind of divergence between expected and recited words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MistakeType {
    /// Expected word recited as a different word.
    Substitution,
    /// Expected word missing from the recitation.
    Omission,
    /// Extra word with no expected counterpart.
    Insertion,
}

/// Coaching category a mistake is tagged with.
///
/// Declaration order is the tie-break order when picking the weakest metric.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MistakeCategory {
    Pronunciation,
    Memorization,
    Fluency,
    Tajweed,
}

impl MistakeCategory {
    pub const ALL: [MistakeCategory; 4] = [
        Self::Pronunciation,
        Self::Memorization,
        Self::Fluency,
        Self::Tajweed,
    ];
}

/// One detected divergence, positioned on the expected text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveMistake {
    /// Word position in the whitespace-split expected text.
    pub index: usize,
    #[serde(rename = "type")]
    pub kind: MistakeType,
    /// Transcribed word (empty for omissions).
    pub word: String,
    /// Expected word (empty for insertions).
    pub correct: String,
    pub confidence: f64,
    pub categories: Vec<MistakeCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tajweed_rules: Option<Vec<String>>,
}

/// Tajweed rules that apply to one expected word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TajweedHint {
    pub index: usize,
    pub rules: Vec<String>,
}

/// Reciter dialect hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    Auto,
    Standard,
    MiddleEastern,
    SouthAsian,
    NorthAfrican,
}

impl Default for Dialect {
    fn default() -> Self {
        Self::Auto
    }
}

impl Dialect {
    /// Word similarity below which an aligned pair is a substitution.
    ///
    /// Accents whose transcriptions drift further from the canonical
    /// spelling get a more lenient threshold.
    pub fn substitution_threshold(&self) -> f64 {
        match self {
            Self::Auto | Self::Standard | Self::MiddleEastern => DEFAULT_SUBSTITUTION_THRESHOLD,
            Self::SouthAsian | Self::NorthAfrican => LENIENT_SUBSTITUTION_THRESHOLD,
        }
    }
}

/// Speech recognition engine that produced the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisEngine {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}
