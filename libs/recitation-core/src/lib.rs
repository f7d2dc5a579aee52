//! Core recitation alignment library used by the backend service.
//!
//! Provides:
//! - Arabic text normalization (diacritics, tatweel, punctuation)
//! - Verse corpus loading and a process-wide verse index
//! - Edit-distance similarity scoring
//! - Verse identification from a transcript
//! - Word alignment and mistake detection
//! - Scored session summaries

pub mod alignment;
pub mod corpus;
pub mod error;
pub mod index;
pub mod matcher;
pub mod normalize;
pub mod similarity;
pub mod summary;
pub mod types;

pub use alignment::{
    align_words, comparable_word_count, detect_mistakes, AlignedPair, DetectorOptions,
    DEFAULT_SUBSTITUTION_THRESHOLD, LENIENT_SUBSTITUTION_THRESHOLD,
};
pub use corpus::{bundled_corpus, load_corpus_file, load_corpus_json};
pub use error::{CorpusError, Result};
pub use index::{ensure_index, install_corpus, IndexedVerse, VerseIndex};
pub use matcher::{find_best_verse_matches, MatchOptions};
pub use normalize::{normalize_arabic_text, split_words};
pub use similarity::{levenshtein_distance, similarity, similarity_upper_bound};
pub use summary::{create_live_session_summary, MistakeCounts, SessionSummary, SummaryOptions};
pub use types::{
    AnalysisEngine, Dialect, LiveMistake, MistakeCategory, MistakeType, QuranVerseEntry,
    TajweedHint, VerseKey, VerseMatch,
};
