//! Arabic text normalization for fuzzy comparison.
//!
//! Produces the canonical comparable form used by the verse index, the
//! verse matcher and the word aligner:
//! - Unicode NFC composition
//! - removal of tashkeel and Qur'anic annotation marks
//! - removal of tatweel (kashida)
//! - every run of non letter/digit characters becomes one space
//! - lowercase, trimmed, single-spaced

use unicode_normalization::UnicodeNormalization;

const TATWEEL: char = '\u{0640}';

/// Whether `ch` is an Arabic diacritic or Qur'anic annotation mark.
pub fn is_arabic_diacritic(ch: char) -> bool {
    matches!(ch,
        '\u{0610}'..='\u{061A}' // honorifics, small high marks
        | '\u{064B}'..='\u{065F}' // tanween, harakat, shadda, sukun, maddah, hamza marks
        | '\u{0670}' // superscript alef
        | '\u{06D6}'..='\u{06ED}' // Qur'anic annotation signs
        | '\u{08D3}'..='\u{08E1}'
        | '\u{08E3}'..='\u{08FF}'
    )
}

/// Normalize Arabic (or mixed) text into its comparable form.
///
/// Total: never fails, empty input yields an empty string.
pub fn normalize_arabic_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    // Fold case before filtering: lowercasing may emit combining marks.
    let folded = text.nfc().collect::<String>().to_lowercase();

    let mut result = String::with_capacity(folded.len());
    // Start true so leading separators are dropped.
    let mut last_was_space = true;

    for ch in folded.chars() {
        if ch == TATWEEL || is_arabic_diacritic(ch) {
            continue;
        }

        if ch.is_alphanumeric() {
            result.push(ch);
            last_was_space = false;
        } else if !last_was_space {
            result.push(' ');
            last_was_space = true;
        }
    }

    if result.ends_with(' ') {
        result.pop();
    }

    result
}

/// Split text into whitespace-separated words.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}
