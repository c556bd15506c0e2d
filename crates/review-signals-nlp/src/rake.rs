//! Deterministic co-occurrence phrase extraction.
//!
//! RAKE-style: stop words and punctuation delimit candidate phrases, word
//! scores come from degree/frequency over the co-occurrence graph, and a
//! phrase scores the sum of its word scores. No model, fully reproducible,
//! so the keyword path can run without inference.

use std::collections::HashMap;

use review_signals_core::text::is_stop_word;

use crate::services::{NlpResult, PhraseExtractor, RankedPhrase};

/// Phrase extractor scoring stopword-delimited candidate runs.
pub struct CooccurrenceExtractor {
    /// Minimum words per phrase
    min_words: usize,
    /// Maximum words per phrase
    max_words: usize,
}

impl Default for CooccurrenceExtractor {
    fn default() -> Self {
        Self::new(1, 2)
    }
}

impl CooccurrenceExtractor {
    /// Create an extractor keeping phrases of `min_words..=max_words`.
    pub fn new(min_words: usize, max_words: usize) -> Self {
        Self {
            min_words: min_words.max(1),
            max_words: max_words.max(min_words.max(1)),
        }
    }

    /// Split text into candidate phrases.
    ///
    /// A phrase is a maximal run of content words; stop words and any
    /// non-alphanumeric character break the run.
    fn candidate_phrases(&self, text: &str) -> Vec<Vec<String>> {
        let lower = text.to_lowercase();
        let mut phrases = Vec::new();
        let mut current: Vec<String> = Vec::new();

        for fragment in lower.split(|c: char| !c.is_alphanumeric() && !c.is_whitespace()) {
            for word in fragment.split_whitespace() {
                if is_stop_word(word) {
                    flush(&mut phrases, &mut current);
                } else {
                    current.push(word.to_string());
                }
            }
            flush(&mut phrases, &mut current);
        }
        flush(&mut phrases, &mut current);

        phrases
            .into_iter()
            .filter(|p| p.len() >= self.min_words && p.len() <= self.max_words)
            .collect()
    }
}

fn flush(phrases: &mut Vec<Vec<String>>, current: &mut Vec<String>) {
    if !current.is_empty() {
        phrases.push(std::mem::take(current));
    }
}

impl PhraseExtractor for CooccurrenceExtractor {
    fn extract(&self, text: &str) -> NlpResult<Vec<RankedPhrase>> {
        let phrases = self.candidate_phrases(text);

        // Word frequency and degree over the co-occurrence graph.
        let mut frequency: HashMap<&str, f64> = HashMap::new();
        let mut degree: HashMap<&str, f64> = HashMap::new();
        for phrase in &phrases {
            for word in phrase {
                *frequency.entry(word.as_str()).or_default() += 1.0;
                *degree.entry(word.as_str()).or_default() += (phrase.len() - 1) as f64;
            }
        }
        for (word, freq) in &frequency {
            *degree.entry(*word).or_default() += *freq;
        }

        let mut ranked: Vec<RankedPhrase> = Vec::new();
        for phrase in &phrases {
            let joined = phrase.join(" ");
            if ranked.iter().any(|r| r.phrase == joined) {
                continue;
            }
            let score = phrase
                .iter()
                .map(|word| degree[word.as_str()] / frequency[word.as_str()])
                .sum();
            ranked.push(RankedPhrase {
                phrase: joined,
                score,
            });
        }

        // Highest score first; first occurrence wins ties (stable sort).
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        Ok(ranked)
    }
}
