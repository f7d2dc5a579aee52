//! Service configuration read from the environment.

use std::path::PathBuf;

use anyhow::Context;

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// JSON corpus installed at startup; the bundled sample corpus otherwise.
    pub corpus_path: Option<PathBuf>,
    /// Upper bound on transcript and expected text length, in characters.
    pub max_transcript_chars: usize,
    /// Upper bound on words per text sent to the aligner.
    pub max_transcript_words: usize,
    /// Upper bound on a verse-match transcript, in characters. Matching
    /// scores the transcript against every verse, so this stays near the
    /// length of the longest verse.
    pub max_match_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            corpus_path: None,
            max_transcript_chars: 10_000,
            max_transcript_words: 1_000,
            max_match_chars: 1_500,
        }
    }
}

impl Config {
    /// Load from `HOST`, `PORT`, `QURAN_CORPUS_PATH`, `MAX_TRANSCRIPT_CHARS`,
    /// `MAX_TRANSCRIPT_WORDS` and `MAX_MATCH_CHARS`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(value) => value
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got {:?}", value))?,
            None => defaults.port,
        };

        let max_transcript_chars =
            positive(&lookup, "MAX_TRANSCRIPT_CHARS", defaults.max_transcript_chars)?;
        let max_transcript_words =
            positive(&lookup, "MAX_TRANSCRIPT_WORDS", defaults.max_transcript_words)?;
        let max_match_chars = positive(&lookup, "MAX_MATCH_CHARS", defaults.max_match_chars)?;

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            corpus_path: lookup("QURAN_CORPUS_PATH")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            max_transcript_chars,
            max_transcript_words,
            max_match_chars,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn positive(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: usize,
) -> anyhow::Result<usize> {
    let value = match lookup(key) {
        Some(value) => value
            .parse::<usize>()
            .with_context(|| format!("{} must be a positive integer, got {:?}", key, value))?,
        None => default,
    };
    anyhow::ensure!(value > 0, "{} must be positive", key);
    Ok(value)
}
