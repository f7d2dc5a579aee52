//! Verse identification from an arbitrary transcript.

use crate::index::{ensure_index, VerseIndex};
use crate::normalize::normalize_arabic_text;
use crate::similarity::{similarity, similarity_upper_bound};
use crate::types::VerseMatch;

/// Number of best-effort candidates returned when too few verses clear the
/// threshold (capped by `limit`).
pub const FALLBACK_FLOOR: usize = 3;

/// Options for [`find_best_verse_matches`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOptions {
    pub limit: usize,
    pub threshold: f64,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            limit: 5,
            threshold: 0.6,
        }
    }
}

/// Find the verses of the process-wide index that best match `transcript`.
pub fn find_best_verse_matches(transcript: &str, options: MatchOptions) -> Vec<VerseMatch> {
    ensure_index().find_best_matches(transcript, options)
}

impl VerseIndex {
    /// Rank indexed verses by similarity to `transcript`.
    ///
    /// Returns up to `limit` verses scoring at least `threshold`, best first.
    /// When fewer than `min(limit, 3)` verses clear the threshold the list is
    /// topped up with the next best verses regardless of score; such
    /// low-similarity entries are advisory only.
    pub fn find_best_matches(&self, transcript: &str, options: MatchOptions) -> Vec<VerseMatch> {
        let normalized = normalize_arabic_text(transcript);
        if normalized.is_empty() || options.limit == 0 {
            return Vec::new();
        }
        let transcript_len = normalized.chars().count();
        let entries = self.entries();

        // Visit verses by descending score ceiling; sort_by is stable, so
        // equal ceilings keep index order.
        let mut candidates: Vec<(usize, f64)> = entries
            .iter()
            .enumerate()
            .map(|(position, verse)| {
                (
                    position,
                    similarity_upper_bound(transcript_len, verse.normalized_len),
                )
            })
            .collect();
        candidates.sort_by(|a, b| b.1.total_cmp(&a.1));

        // Best `limit` verses so far, by score then index order.
        let mut best: Vec<(usize, f64)> = Vec::with_capacity(options.limit + 1);
        let mut evaluated = 0;
        for (position, ceiling) in candidates {
            if best.len() == options.limit && ceiling < best[options.limit - 1].1 {
                break;
            }

            let score = similarity(&normalized, &entries[position].normalized);
            evaluated += 1;
            let at = best.partition_point(|&(p, s)| s > score || (s == score && p < position));
            best.insert(at, (position, score));
            best.truncate(options.limit);
        }

        let passing = best
            .iter()
            .take_while(|(_, score)| *score >= options.threshold)
            .count();
        let take = passing.max(options.limit.min(FALLBACK_FLOOR));

        tracing::debug!(
            "Scored {} of {} verses, {} cleared threshold {:.2}",
            evaluated,
            entries.len(),
            passing,
            options.threshold
        );

        best.into_iter()
            .take(take)
            .map(|(position, score)| {
                let verse = &entries[position];
                VerseMatch {
                    key: verse.key,
                    surah_number: verse.surah_number,
                    ayah_number: verse.ayah_number,
                    text: verse.text.clone(),
                    similarity: score,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::bundled_corpus;
    use crate::types::QuranVerseEntry;

    fn fatiha_index() -> VerseIndex {
        let corpus = vec![
            QuranVerseEntry::new(1, 1, "بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ").unwrap(),
            QuranVerseEntry::new(1, 2, "الْحَمْدُ لِلَّهِ رَبِّ الْعَالَمِينَ").unwrap(),
            QuranVerseEntry::new(1, 3, "الرَّحْمَٰنِ الرَّحِيمِ").unwrap(),
            QuranVerseEntry::new(1, 4, "مَالِكِ يَوْمِ الدِّينِ").unwrap(),
            QuranVerseEntry::new(1, 5, "إِيَّاكَ نَعْبُدُ وَإِيَّاكَ نَسْتَعِينُ").unwrap(),
        ];
        VerseIndex::build(&corpus)
    }

    #[test]
    fn test_exact_transcript_matches_first() {
        let matches = fatiha_index().find_best_matches("بسم الله الرحمن الرحيم", MatchOptions::default());
        assert_eq!(matches[0].key.to_string(), "1:1");
        assert_eq!(matches[0].similarity, 1.0);
    }

    #[test]
    fn test_empty_transcript_returns_nothing() {
        let index = fatiha_index();
        assert!(index.find_best_matches("", MatchOptions::default()).is_empty());
        assert!(index.find_best_matches(" ،. ", MatchOptions::default()).is_empty());
    }

    #[test]
    fn test_sorted_descending() {
        let matches = fatiha_index().find_best_matches(
            "الحمد لله رب العلمين",
            MatchOptions {
                limit: 5,
                threshold: 0.0,
            },
        );
        assert_eq!(matches.len(), 5);
        assert_eq!(matches[0].key.to_string(), "1:2");
        assert!(matches.windows(2).all(|w| w[0].similarity >= w[1].similarity));
    }

    #[test]
    fn test_respects_limit() {
        let matches = fatiha_index().find_best_matches(
            "الرحمن",
            MatchOptions {
                limit: 2,
                threshold: 0.0,
            },
        );
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn test_fallback_when_nothing_clears_threshold() {
        let matches = fatiha_index().find_best_matches(
            "xyz",
            MatchOptions {
                limit: 5,
                threshold: 0.6,
            },
        );
        assert_eq!(matches.len(), 3);
        assert!(matches.iter().all(|m| m.similarity < 0.6));
    }

    #[test]
    fn test_fallback_capped_by_limit() {
        let matches = fatiha_index().find_best_matches(
            "xyz",
            MatchOptions {
                limit: 1,
                threshold: 0.9,
            },
        );
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_zero_limit() {
        let matches = fatiha_index().find_best_matches(
            "بسم الله",
            MatchOptions {
                limit: 0,
                threshold: 0.0,
            },
        );
        assert!(matches.is_empty());
    }

    #[test]
    fn test_ties_keep_index_order() {
        let corpus = vec![
            QuranVerseEntry::new(1, 1, "ab").unwrap(),
            QuranVerseEntry::new(1, 2, "ac").unwrap(),
            QuranVerseEntry::new(1, 3, "ad").unwrap(),
        ];
        let index = VerseIndex::build(&corpus);
        let matches = index.find_best_matches(
            "ax",
            MatchOptions {
                limit: 3,
                threshold: 0.0,
            },
        );
        let keys: Vec<String> = matches.iter().map(|m| m.key.to_string()).collect();
        assert_eq!(keys, vec!["1:1", "1:2", "1:3"]);
    }

    #[test]
    fn test_threshold_monotonicity() {
        let index = fatiha_index();
        let transcripts = ["بسم الله الرحمن", "الحمد لله رب", "مالك يوم", "xyz", "الرحمن الرحيم"];
        let thresholds = [0.0, 0.2, 0.4, 0.6, 0.8, 0.95, 1.0, 1.5];

        for transcript in transcripts {
            let mut previous = usize::MAX;
            for threshold in thresholds {
                let count = index
                    .find_best_matches(transcript, MatchOptions { limit: 5, threshold })
                    .len();
                assert!(count <= previous, "{transcript:?} at {threshold}");
                previous = count;
            }
        }
    }

    #[test]
    fn test_global_index_matches_bundled_corpus() {
        let matches = find_best_verse_matches("قل هو الله احد", MatchOptions::default());
        assert_eq!(matches[0].key.to_string(), "112:1");
        assert!(find_best_verse_matches("", MatchOptions::default()).is_empty());
    }

    #[test]
    fn test_length_pruning_keeps_exhaustive_ranking() {
        let index = VerseIndex::build(&bundled_corpus().unwrap());
        let transcripts = [
            "قل هو الله احد",
            "الرحمن",
            "قل اعوذ برب الناس ملك الناس اله الناس من شر الوسواس الخناس",
            "صراط الذين انعمت عليهم غير المغضوب عليهم ولا الضالين",
            "xyz",
        ];

        for transcript in transcripts {
            let normalized = normalize_arabic_text(transcript);
            let mut exhaustive: Vec<(String, f64)> = index
                .entries()
                .iter()
                .map(|v| (v.key.to_string(), similarity(&normalized, &v.normalized)))
                .collect();
            exhaustive.sort_by(|a, b| b.1.total_cmp(&a.1));

            for limit in [1, 3, 5, 22] {
                let matches = index.find_best_matches(
                    transcript,
                    MatchOptions {
                        limit,
                        threshold: 0.0,
                    },
                );
                let got: Vec<(String, f64)> = matches
                    .iter()
                    .map(|m| (m.key.to_string(), m.similarity))
                    .collect();
                assert_eq!(got, exhaustive[..limit].to_vec(), "{transcript:?} limit {limit}");
            }
        }
    }
}
