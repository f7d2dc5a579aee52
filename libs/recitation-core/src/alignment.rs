//! Word-level alignment of a recitation transcript against the expected text.
//!
//! The two word sequences are aligned with a Needleman-Wunsch style dynamic
//! program that minimizes cost:
//! - pairing two words costs `1 - similarity`, so near-homophones are cheap
//! - leaving an expected word unpaired (omission) costs 1
//! - leaving a transcribed word unpaired (insertion) costs 1
//!
//! The minimum-cost path is backtracked and every divergence becomes a
//! [`LiveMistake`] positioned on the expected text.

use std::collections::BTreeMap;

use crate::normalize::{normalize_arabic_text, split_words};
use crate::similarity::similarity;
use crate::types::{Dialect, LiveMistake, MistakeCategory, MistakeType, TajweedHint};

/// Word similarity below which a paired word is reported as a substitution,
/// used when neither the caller nor the dialect picks one.
pub const DEFAULT_SUBSTITUTION_THRESHOLD: f64 = 0.9;

/// Threshold for dialects whose transcriptions drift further from the
/// canonical spelling.
pub const LENIENT_SUBSTITUTION_THRESHOLD: f64 = 0.85;

const GAP_COST: f64 = 1.0;

/// Tuning for [`detect_mistakes`].
#[derive(Debug, Clone, Default)]
pub struct DetectorOptions {
    /// Explicit threshold; overrides the dialect default.
    pub substitution_threshold: Option<f64>,
    pub dialect: Dialect,
    pub tajweed_hints: Vec<TajweedHint>,
}

impl DetectorOptions {
    /// Threshold actually applied, clamped to [0, 1].
    pub fn effective_threshold(&self) -> f64 {
        self.substitution_threshold
            .filter(|t| t.is_finite())
            .unwrap_or_else(|| self.dialect.substitution_threshold())
            .clamp(0.0, 1.0)
    }
}

/// One step of a word alignment. Indices are word positions in the
/// whitespace-split input texts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlignedPair {
    Paired {
        expected: usize,
        transcribed: usize,
        similarity: f64,
    },
    Omitted {
        expected: usize,
    },
    Inserted {
        transcribed: usize,
    },
}

/// A comparable word: its whitespace-split position, raw text and
/// normalized form.
#[derive(Debug, Clone)]
struct Token<'a> {
    index: usize,
    raw: &'a str,
    normalized: String,
}

/// Words whose normalized form is empty (verse markers, stray punctuation)
/// are skipped but later words keep their original positions.
fn tokenize(text: &str) -> Vec<Token<'_>> {
    split_words(text)
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            let normalized = normalize_arabic_text(raw);
            (!normalized.is_empty()).then_some(Token {
                index,
                raw,
                normalized,
            })
        })
        .collect()
}

/// Number of expected words that take part in alignment.
pub fn comparable_word_count(text: &str) -> usize {
    tokenize(text).len()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Choice {
    Diagonal,
    Omit,
    Insert,
}

/// Minimum-cost alignment over token slices. Returned indices point into the
/// slices, not into the original texts.
///
/// Costs are kept two rows at a time; only the one-byte backtrack table is
/// `(n + 1) x (m + 1)`.
fn align_tokens(expected: &[Token<'_>], transcribed: &[Token<'_>]) -> Vec<AlignedPair> {
    let n = expected.len();
    let m = transcribed.len();
    let width = m + 1;

    let mut choices = vec![Choice::Diagonal; (n + 1) * width];
    let mut previous: Vec<f64> = (0..=m).map(|j| j as f64 * GAP_COST).collect();
    let mut current = vec![0.0; width];

    for choice in choices.iter_mut().take(width).skip(1) {
        *choice = Choice::Insert;
    }

    for i in 1..=n {
        current[0] = i as f64 * GAP_COST;
        choices[i * width] = Choice::Omit;

        for j in 1..=m {
            let pair_similarity =
                similarity(&expected[i - 1].normalized, &transcribed[j - 1].normalized);
            let diagonal = previous[j - 1] + (1.0 - pair_similarity);
            let omit = previous[j] + GAP_COST;
            let insert = current[j - 1] + GAP_COST;

            // Ties prefer pairing, then omission, then insertion.
            let (cost, choice) = if diagonal <= omit && diagonal <= insert {
                (diagonal, Choice::Diagonal)
            } else if omit <= insert {
                (omit, Choice::Omit)
            } else {
                (insert, Choice::Insert)
            };
            current[j] = cost;
            choices[i * width + j] = choice;
        }

        std::mem::swap(&mut previous, &mut current);
    }

    let mut path = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (n, m);
    while i > 0 || j > 0 {
        let choice = if i == 0 {
            Choice::Insert
        } else if j == 0 {
            Choice::Omit
        } else {
            choices[i * width + j]
        };

        path.push(match choice {
            Choice::Diagonal => {
                i -= 1;
                j -= 1;
                AlignedPair::Paired {
                    expected: i,
                    transcribed: j,
                    similarity: similarity(&expected[i].normalized, &transcribed[j].normalized),
                }
            }
            Choice::Omit => {
                i -= 1;
                AlignedPair::Omitted { expected: i }
            }
            Choice::Insert => {
                j -= 1;
                AlignedPair::Inserted { transcribed: j }
            }
        });
    }

    path.reverse();
    path
}

/// Align expected and transcribed words. Indices in the result are word
/// positions in the whitespace-split texts.
pub fn align_words(expected: &str, transcribed: &str) -> Vec<AlignedPair> {
    let expected = tokenize(expected);
    let transcribed = tokenize(transcribed);

    align_tokens(&expected, &transcribed)
        .into_iter()
        .map(|step| match step {
            AlignedPair::Paired {
                expected: e,
                transcribed: t,
                similarity,
            } => AlignedPair::Paired {
                expected: expected[e].index,
                transcribed: transcribed[t].index,
                similarity,
            },
            AlignedPair::Omitted { expected: e } => AlignedPair::Omitted {
                expected: expected[e].index,
            },
            AlignedPair::Inserted { transcribed: t } => AlignedPair::Inserted {
                transcribed: transcribed[t].index,
            },
        })
        .collect()
}

/// Category tags for a mistake kind.
fn base_categories(kind: MistakeType) -> &'static [MistakeCategory] {
    match kind {
        MistakeType::Substitution => &[MistakeCategory::Pronunciation],
        MistakeType::Omission => &[MistakeCategory::Memorization],
        MistakeType::Insertion => &[MistakeCategory::Fluency],
    }
}

fn hint_table(hints: &[TajweedHint]) -> BTreeMap<usize, Vec<String>> {
    let mut table: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    for hint in hints {
        let rules = table.entry(hint.index).or_default();
        for rule in &hint.rules {
            if !rules.contains(rule) {
                rules.push(rule.clone());
            }
        }
    }
    table.retain(|_, rules| !rules.is_empty());
    table
}

fn build_mistake(
    index: usize,
    kind: MistakeType,
    word: &str,
    correct: &str,
    word_similarity: f64,
    tajweed_rules: Option<&Vec<String>>,
) -> LiveMistake {
    let mut categories = base_categories(kind).to_vec();
    if tajweed_rules.is_some() {
        categories.push(MistakeCategory::Tajweed);
    }

    LiveMistake {
        index,
        kind,
        word: word.to_string(),
        correct: correct.to_string(),
        confidence: (1.0 - word_similarity).clamp(0.0, 1.0),
        categories,
        tajweed_rules: tajweed_rules.cloned(),
    }
}

/// Detect recitation mistakes of `transcribed` against `expected`.
///
/// Deterministic and total: an empty transcription yields one omission per
/// expected word, an empty expected text one insertion per transcribed word.
pub fn detect_mistakes(
    expected: &str,
    transcribed: &str,
    options: &DetectorOptions,
) -> Vec<LiveMistake> {
    let expected_tokens = tokenize(expected);
    let transcribed_tokens = tokenize(transcribed);
    let threshold = options.effective_threshold();
    let hints = hint_table(&options.tajweed_hints);

    let mut mistakes = Vec::new();
    // Insertions anchor on the nearest preceding expected word.
    let mut anchor = 0;

    for step in align_tokens(&expected_tokens, &transcribed_tokens) {
        match step {
            AlignedPair::Paired {
                expected: e,
                transcribed: t,
                similarity,
            } => {
                let expected_word = &expected_tokens[e];
                anchor = expected_word.index;
                if similarity < threshold {
                    mistakes.push(build_mistake(
                        expected_word.index,
                        MistakeType::Substitution,
                        transcribed_tokens[t].raw,
                        expected_word.raw,
                        similarity,
                        hints.get(&expected_word.index),
                    ));
                }
            }
            AlignedPair::Omitted { expected: e } => {
                let expected_word = &expected_tokens[e];
                anchor = expected_word.index;
                mistakes.push(build_mistake(
                    expected_word.index,
                    MistakeType::Omission,
                    "",
                    expected_word.raw,
                    0.0,
                    hints.get(&expected_word.index),
                ));
            }
            AlignedPair::Inserted { transcribed: t } => {
                mistakes.push(build_mistake(
                    anchor,
                    MistakeType::Insertion,
                    transcribed_tokens[t].raw,
                    "",
                    0.0,
                    None,
                ));
            }
        }
    }

    tracing::debug!(
        "Aligned {} expected against {} transcribed words: {} mistakes (threshold {:.2})",
        expected_tokens.len(),
        transcribed_tokens.len(),
        mistakes.len(),
        threshold
    );

    mistakes
}
