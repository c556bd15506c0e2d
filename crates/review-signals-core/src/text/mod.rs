//! Text normalization.
//!
//! Pipeline: lowercase → strip punctuation → tokenize → drop stop words →
//! drop non-alphabetic tokens → lemmatize.
//!
//! Normalization is deterministic and idempotent: re-normalizing a joined
//! normalized sequence reproduces the sequence. Missing input yields an
//! empty sequence, never an error.

mod lemma;
mod stem;
mod stopwords;

pub use lemma::*;
pub use stem::*;
pub use stopwords::*;

use std::collections::HashSet;

/// Normalizer turning free text into canonical token sequences.
///
/// Holds its stop-word set and lemmatizer explicitly so per-run variation
/// and parallel use stay safe; construct once and share by reference.
pub struct TextNormalizer {
    stop_words: HashSet<String>,
    lemmatizer: Lemmatizer,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    /// Create a normalizer with the English stop-word set.
    pub fn new() -> Self {
        Self::with_stop_words(STOP_WORDS.iter().map(|s| s.to_string()).collect())
    }

    /// Create a normalizer with a custom stop-word set.
    pub fn with_stop_words(stop_words: HashSet<String>) -> Self {
        Self {
            stop_words,
            lemmatizer: Lemmatizer::new(),
        }
    }

    /// Normalize text into an ordered token sequence.
    ///
    /// Duplicates are retained and order is preserved: this is a sequence,
    /// not a set.
    pub fn normalize(&self, text: Option<&str>) -> Vec<String> {
        let Some(text) = text else {
            return Vec::new();
        };

        // Punctuation becomes a token boundary, so "side-effects" splits
        // into two tokens instead of merging into one word.
        let depunctuated: String = text
            .to_lowercase()
            .trim()
            .chars()
            .map(|c| if c.is_ascii_punctuation() { ' ' } else { c })
            .collect();

        depunctuated
            .split_whitespace()
            .filter(|token| !self.stop_words.contains(*token))
            .filter(|token| token.chars().all(|c| c.is_alphabetic()))
            .map(|token| self.lemmatizer.lemmatize(token))
            .filter(|lemma| !self.stop_words.contains(lemma))
            .collect()
    }

    /// Normalize text into a single space-joined string.
    ///
    /// Used where a multi-word name must compare as one unit.
    pub fn normalize_joined(&self, text: Option<&str>) -> String {
        self.normalize(text).join(" ")
    }

    /// Whether a token is in this normalizer's stop-word set.
    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_normalization() {
        let normalizer = TextNormalizer::new();

        assert_eq!(
            normalizer.normalize(Some("The Side-Effects were awful!!")),
            vec!["side", "effect", "awful"]
        );
    }

    #[test]
    fn test_missing_and_empty_input() {
        let normalizer = TextNormalizer::new();

        assert_eq!(normalizer.normalize(None), Vec::<String>::new());
        assert_eq!(normalizer.normalize(Some("")), Vec::<String>::new());
        assert_eq!(normalizer.normalize(Some("   ")), Vec::<String>::new());
    }

    #[test]
    fn test_non_alphabetic_tokens_dropped() {
        let normalizer = TextNormalizer::new();

        assert_eq!(
            normalizer.normalize(Some("took 40mg twice daily in 2021")),
            vec!["took", "twice", "daily"]
        );
    }

    #[test]
    fn test_duplicates_and_order_preserved() {
        let normalizer = TextNormalizer::new();

        assert_eq!(
            normalizer.normalize(Some("pain pain went away")),
            vec!["pain", "pain", "went", "away"]
        );
    }

    #[test]
    fn test_joined_form() {
        let normalizer = TextNormalizer::new();

        assert_eq!(
            normalizer.normalize_joined(Some("Crohn's Disease")),
            "crohn disease"
        );
    }

    #[test]
    fn test_idempotent() {
        let normalizer = TextNormalizer::new();

        for text in [
            "The Side-Effects were awful!!",
            "Humira worked wonders for my Crohn's Disease",
            "switched from Remicade after 2 years; no more cramps",
        ] {
            let once = normalizer.normalize(Some(text));
            let joined = once.join(" ");
            let twice = normalizer.normalize(Some(&joined));
            assert_eq!(once, twice, "normalization not idempotent for {text:?}");
        }
    }

    #[test]
    fn test_stop_word_lemma_dropped() {
        let normalizer = TextNormalizer::new();

        // "wills" survives the raw stop-word filter but lemmatizes to a
        // stop word; idempotence requires dropping it.
        assert_eq!(normalizer.normalize(Some("wills")), Vec::<String>::new());
    }
}
