//! Test fixtures and factory functions for request bodies.

use serde_json::json;

/// Al-Fatiha 1:2 with full diacritics.
pub const AL_HAMD: &str = "الْحَمْدُ لِلَّهِ رَبِّ الْعَالَمِينَ";

/// Create a normalize request body.
pub fn normalize_request(text: &str) -> serde_json::Value {
    json!({ "text": text })
}

/// Create a verse match request body.
pub fn match_request(
    transcript: &str,
    limit: Option<usize>,
    threshold: Option<f64>,
) -> serde_json::Value {
    let mut obj = serde_json::Map::new();
    obj.insert("transcript".to_string(), json!(transcript));
    if let Some(l) = limit {
        obj.insert("limit".to_string(), json!(l));
    }
    if let Some(t) = threshold {
        obj.insert("threshold".to_string(), json!(t));
    }
    serde_json::Value::Object(obj)
}

/// Create an analyze request body against explicit expected text.
pub fn analyze_request(transcription: &str, expected_text: &str) -> serde_json::Value {
    json!({
        "transcription": transcription,
        "expectedText": expected_text
    })
}

/// Create an analyze request body that resolves the expected text by key.
pub fn analyze_by_key_request(transcription: &str, ayah_id: &str) -> serde_json::Value {
    json!({
        "transcription": transcription,
        "ayahId": ayah_id
    })
}
