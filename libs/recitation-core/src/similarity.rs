//! Edit-distance similarity between normalized strings.
//!
//! Used both for verse identification (whole transcript against whole verse)
//! and for word-level matching inside the aligner.

/// Calculate Levenshtein distance between two strings, over code points.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    levenshtein_chars(&a_chars, &b_chars)
}

fn levenshtein_chars(a: &[char], b: &[char]) -> usize {
    let m = a.len();
    let n = b.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Use two rows instead of full matrix for memory efficiency
    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };

            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Similarity in [0, 1]: `1 - distance / max(len(a), len(b))`.
///
/// Identical strings (including two empty strings) score 1, a single empty
/// side scores 0. Inputs are expected to be normalized already.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let max_len = a_chars.len().max(b_chars.len());
    if a_chars.is_empty() || b_chars.is_empty() {
        return 0.0;
    }

    let distance = levenshtein_chars(&a_chars, &b_chars);
    (1.0 - distance as f64 / max_len as f64).clamp(0.0, 1.0)
}

/// Ceiling on [`similarity`] for strings of `a_len` and `b_len` chars.
///
/// The edit distance is at least the length difference, so the score can be
/// no higher than `min / max`.
pub fn similarity_upper_bound(a_len: usize, b_len: usize) -> f64 {
    let max_len = a_len.max(b_len);
    if max_len == 0 {
        return 1.0;
    }
    a_len.min(b_len) as f64 / max_len as f64
}
