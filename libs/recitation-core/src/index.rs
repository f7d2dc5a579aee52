//! Verse index: every canonical verse with its normalized text.
//!
//! The process-wide index is built at most once. A host that loads the full
//! corpus calls [`install_corpus`] at startup; otherwise the first call to
//! [`ensure_index`] builds it from the bundled sample corpus.

use std::sync::OnceLock;

use serde::Serialize;

use crate::corpus::bundled_corpus;
use crate::error::{CorpusError, Result};
use crate::normalize::normalize_arabic_text;
use crate::types::{QuranVerseEntry, VerseKey};

static INDEX: OnceLock<VerseIndex> = OnceLock::new();

/// A corpus verse with its cached normalized text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexedVerse {
    pub key: VerseKey,
    pub surah_number: u16,
    pub ayah_number: u16,
    pub text: String,
    pub normalized: String,
    /// Char count of `normalized`.
    #[serde(skip)]
    pub normalized_len: usize,
}

impl IndexedVerse {
    /// Drop the cached normalized text.
    pub fn to_entry(&self) -> QuranVerseEntry {
        QuranVerseEntry {
            key: self.key,
            surah_number: self.surah_number,
            ayah_number: self.ayah_number,
            text: self.text.clone(),
        }
    }
}

/// Flat, corpus-ordered list of indexed verses.
#[derive(Debug, Clone, Default)]
pub struct VerseIndex {
    entries: Vec<IndexedVerse>,
}

impl VerseIndex {
    /// Build an index with one entry per corpus verse, in corpus order.
    pub fn build(corpus: &[QuranVerseEntry]) -> Self {
        let entries = corpus
            .iter()
            .map(|verse| {
                let normalized = normalize_arabic_text(&verse.text);
                IndexedVerse {
                    key: verse.key,
                    surah_number: verse.surah_number,
                    ayah_number: verse.ayah_number,
                    text: verse.text.clone(),
                    normalized_len: normalized.chars().count(),
                    normalized,
                }
            })
            .collect();

        Self { entries }
    }

    pub fn entries(&self) -> &[IndexedVerse] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a verse by key.
    pub fn get(&self, key: &VerseKey) -> Option<&IndexedVerse> {
        self.entries.iter().find(|entry| entry.key == *key)
    }
}

/// Install the corpus the process-wide index is built from.
///
/// Fails with [`CorpusError::AlreadyInstalled`] once the index exists,
/// whether from an earlier install or from a call to [`ensure_index`].
pub fn install_corpus(corpus: Vec<QuranVerseEntry>) -> Result<&'static VerseIndex> {
    let count = corpus.len();
    INDEX
        .set(VerseIndex::build(&corpus))
        .map_err(|_| CorpusError::AlreadyInstalled)?;

    tracing::info!("Installed verse corpus with {} verses", count);
    Ok(ensure_index())
}

/// The process-wide verse index, built on first use.
pub fn ensure_index() -> &'static VerseIndex {
    INDEX.get_or_init(|| {
        // Compiled in and covered by the corpus tests.
        let corpus = bundled_corpus().expect("bundled verse corpus is valid");
        tracing::debug!("Building verse index from bundled corpus ({} verses)", corpus.len());
        VerseIndex::build(&corpus)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_caches_normalized_text() {
        let corpus = vec![
            QuranVerseEntry::new(1, 1, "بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ").unwrap(),
            QuranVerseEntry::new(1, 2, "الْحَمْدُ لِلَّهِ رَبِّ الْعَالَمِينَ").unwrap(),
        ];
        let index = VerseIndex::build(&corpus);

        assert_eq!(index.len(), 2);
        assert_eq!(index.entries()[0].normalized, "بسم الله الرحمن الرحيم");
        assert_eq!(index.entries()[1].normalized, "الحمد لله رب العالمين");
        assert_eq!(index.entries()[1].to_entry(), corpus[1]);
        assert_eq!(index.entries()[0].normalized_len, 22);
    }

    #[test]
    fn test_get_by_key() {
        let corpus = vec![QuranVerseEntry::new(112, 2, "اللَّهُ الصَّمَدُ").unwrap()];
        let index = VerseIndex::build(&corpus);

        let key = VerseKey::new(112, 2).unwrap();
        assert_eq!(index.get(&key).map(|v| v.normalized.as_str()), Some("الله الصمد"));
        assert!(index.get(&VerseKey::new(1, 1).unwrap()).is_none());
    }

    #[test]
    fn test_empty_index() {
        let index = VerseIndex::build(&[]);
        assert!(index.is_empty());
    }

    #[test]
    fn test_ensure_index_is_memoized() {
        let first = ensure_index();
        let second = ensure_index();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.len(), bundled_corpus().unwrap().len());
    }

    #[test]
    fn test_install_after_build_fails() {
        ensure_index();
        let err = install_corpus(Vec::new()).unwrap_err();
        assert!(matches!(err, CorpusError::AlreadyInstalled));
    }
}
