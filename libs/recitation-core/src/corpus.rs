//! Canonical verse corpus loading.
//!
//! # Format
//! ```json
//! [
//!   { "surahNumber": 1, "ayahNumber": 1, "text": "بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ" },
//!   { "surahNumber": 1, "ayahNumber": 2, "text": "الْحَمْدُ لِلَّهِ رَبِّ الْعَالَمِينَ" }
//! ]
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::{CorpusError, Result};
use crate::types::QuranVerseEntry;

/// Bundled sample corpus: Al-Fatiha and surahs 112-114.
const SAMPLE_CORPUS: &str = include_str!("../data/sample_corpus.json");

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawVerse {
    surah_number: u16,
    ayah_number: u16,
    text: String,
}

/// Parse and validate a JSON corpus.
pub fn load_corpus_json(content: &str) -> Result<Vec<QuranVerseEntry>> {
    let raw: Vec<RawVerse> = serde_json::from_str(content)?;
    validate(raw)
}

/// Read, parse and validate a JSON corpus file.
pub fn load_corpus_file(path: impl AsRef<Path>) -> Result<Vec<QuranVerseEntry>> {
    let content = std::fs::read_to_string(path.as_ref())?;
    load_corpus_json(&content)
}

/// The corpus shipped with the crate.
pub fn bundled_corpus() -> Result<Vec<QuranVerseEntry>> {
    load_corpus_json(SAMPLE_CORPUS)
}

fn validate(raw: Vec<RawVerse>) -> Result<Vec<QuranVerseEntry>> {
    let mut seen = HashSet::with_capacity(raw.len());
    let mut entries = Vec::with_capacity(raw.len());

    for (position, verse) in raw.into_iter().enumerate() {
        if verse.text.trim().is_empty() {
            return Err(CorpusError::InvalidVerse {
                position,
                reason: "empty text".to_string(),
            });
        }

        let entry = QuranVerseEntry::new(verse.surah_number, verse.ayah_number, verse.text)
            .ok_or_else(|| CorpusError::InvalidVerse {
                position,
                reason: format!(
                    "surah and ayah numbers must be positive, got {}:{}",
                    verse.surah_number, verse.ayah_number
                ),
            })?;

        if !seen.insert(entry.key) {
            return Err(CorpusError::DuplicateKey {
                key: entry.key.to_string(),
                position,
            });
        }

        entries.push(entry);
    }

    Ok(entries)
}
